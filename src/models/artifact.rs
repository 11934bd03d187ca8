use crate::{
    error::{GenerationError, Result},
    grid,
    models::{Phase, ResolvedGender},
};
use chrono::{DateTime, Utc};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// JSON body of the inference call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: InferenceParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceParameters {
    pub negative_prompt: String,
}

/// Error payload returned with non-success statuses. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}

/// One successful phase response, kept only until the run finishes.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub phase: Phase,
    pub bytes: Vec<u8>,
    pub image: DynamicImage,
}

impl GeneratedImage {
    pub fn decode(phase: Phase, bytes: Vec<u8>) -> Result<Self> {
        let image = image::load_from_memory(&bytes).map_err(|e| {
            GenerationError::DecodeError(format!(
                "response for phase '{}' is not a valid image: {}",
                phase, e
            ))
        })?;

        Ok(Self {
            phase,
            bytes,
            image,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Single {
        gender: ResolvedGender,
        phase: Phase,
    },
    Grid {
        gender: ResolvedGender,
    },
}

/// The image offered for download after a successful generation.
#[derive(Debug, Clone)]
pub struct ResultArtifact {
    pub kind: ArtifactKind,
    pub image: DynamicImage,
    pub png: Vec<u8>,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

impl ResultArtifact {
    pub fn single(gender: ResolvedGender, generated: GeneratedImage) -> Result<Self> {
        let kind = ArtifactKind::Single {
            gender,
            phase: generated.phase,
        };
        Self::from_image(kind, generated.image)
    }

    pub fn grid(gender: ResolvedGender, image: DynamicImage) -> Result<Self> {
        Self::from_image(ArtifactKind::Grid { gender }, image)
    }

    fn from_image(kind: ArtifactKind, image: DynamicImage) -> Result<Self> {
        let png = grid::encode_png(&image)?;
        Ok(Self {
            file_name: Self::file_name_for(&kind),
            kind,
            image,
            png,
            created_at: Utc::now(),
        })
    }

    pub fn file_name_for(kind: &ArtifactKind) -> String {
        match kind {
            ArtifactKind::Single { gender, phase } => {
                format!("result_{}_{}.png", gender.as_str(), phase.as_str())
            }
            ArtifactKind::Grid { gender } => format!("age_progression_{}.png", gender.as_str()),
        }
    }

    pub fn caption(&self) -> String {
        match self.kind {
            ArtifactKind::Single { gender, phase } => format!("Result: {} - {}", gender, phase),
            ArtifactKind::Grid { gender } => format!("Age progression - {}", gender),
        }
    }

    pub fn gender(&self) -> ResolvedGender {
        match self.kind {
            ArtifactKind::Single { gender, .. } | ArtifactKind::Grid { gender } => gender,
        }
    }
}
