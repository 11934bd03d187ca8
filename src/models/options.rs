use crate::error::{GenerationError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Boy,
    Girl,
    #[default]
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedGender {
    Boy,
    Girl,
}

impl Gender {
    /// Pick a concrete gender. `Random` draws from `rng`; the others are fixed.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> ResolvedGender {
        match self {
            Gender::Boy => ResolvedGender::Boy,
            Gender::Girl => ResolvedGender::Girl,
            Gender::Random => {
                if rng.gen_bool(0.5) {
                    ResolvedGender::Boy
                } else {
                    ResolvedGender::Girl
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
            Gender::Random => "random",
        }
    }
}

impl ResolvedGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedGender::Boy => "boy",
            ResolvedGender::Girl => "girl",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResolvedGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boy" | "male" => Ok(Gender::Boy),
            "girl" | "female" => Ok(Gender::Girl),
            "random" => Ok(Gender::Random),
            other => Err(GenerationError::InvalidOption(format!(
                "unknown gender '{}', expected boy, girl or random",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinTone {
    #[default]
    Automatic,
    VeryLight,
    Light,
    LightBrown,
    DarkBrown,
    Deep,
}

impl SkinTone {
    pub const ALL: [SkinTone; 6] = [
        SkinTone::Automatic,
        SkinTone::VeryLight,
        SkinTone::Light,
        SkinTone::LightBrown,
        SkinTone::DarkBrown,
        SkinTone::Deep,
    ];

    /// Text interpolated verbatim into the prompt.
    pub fn descriptor(&self) -> &'static str {
        match self {
            SkinTone::Automatic => "beautiful diverse heritage",
            SkinTone::VeryLight => "very light, pale caucasian skin",
            SkinTone::Light => "light, fair caucasian skin",
            SkinTone::LightBrown => "light brown, mediterranean skin",
            SkinTone::DarkBrown => "dark brown, south asian skin",
            SkinTone::Deep => "deep dark, african skin",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Automatic => "automatic",
            SkinTone::VeryLight => "very-light",
            SkinTone::Light => "light",
            SkinTone::LightBrown => "light-brown",
            SkinTone::DarkBrown => "dark-brown",
            SkinTone::Deep => "deep",
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinTone {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s
            .trim()
            .to_ascii_lowercase()
            .replace(|c: char| c == '_' || c == ' ', "-");
        SkinTone::ALL
            .iter()
            .copied()
            .find(|tone| tone.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = SkinTone::ALL.iter().map(|t| t.as_str()).collect();
                GenerationError::InvalidOption(format!(
                    "unknown skin tone '{}', expected one of: {}",
                    s.trim(),
                    names.join(", ")
                ))
            })
    }
}

/// Life stage of a generated portrait. Declaration order is generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Baby,
    Child,
    Teen,
    Adult,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Baby, Phase::Child, Phase::Teen, Phase::Adult];

    /// Phases offered by single-image mode.
    pub const SINGLE_SELECTABLE: [Phase; 3] = [Phase::Baby, Phase::Child, Phase::Teen];

    pub fn is_single_selectable(&self) -> bool {
        Self::SINGLE_SELECTABLE.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Baby => "baby",
            Phase::Child => "child",
            Phase::Teen => "teen",
            Phase::Adult => "adult",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Baby => "Baby",
            Phase::Child => "Child",
            Phase::Teen => "Teen",
            Phase::Adult => "Adult",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baby" => Ok(Phase::Baby),
            "child" => Ok(Phase::Child),
            "teen" | "teenager" => Ok(Phase::Teen),
            "adult" => Ok(Phase::Adult),
            other => Err(GenerationError::InvalidOption(format!(
                "unknown age '{}', expected baby, child, teen or adult",
                other
            ))),
        }
    }
}

/// Everything the user picked before pressing a generate button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub gender: Gender,
    pub skin_tone: SkinTone,
    pub selected_age: Phase,
    pub credential: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            gender: Gender::Random,
            skin_tone: SkinTone::Automatic,
            selected_age: Phase::Baby,
            credential: None,
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_skin_tone(mut self, skin_tone: SkinTone) -> Self {
        self.skin_tone = skin_tone;
        self
    }

    pub fn with_age(mut self, phase: Phase) -> Self {
        self.selected_age = phase;
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// The credential, if one was entered and is not just whitespace.
    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
