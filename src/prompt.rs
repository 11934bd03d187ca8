//! Prompt assembly for the portrait model.
//!
//! Every function here is pure: the same phase, gender and skin tone always
//! produce the same prompt text.

use crate::models::{InferenceParameters, InferenceRequest, Phase, ResolvedGender, SkinTone};

pub const BASE_PROMPT_TEMPLATE: &str = "ultra realistic 8k photo, {age_desc}, {skin_tone}, cinematic lighting, professional photography, sharp focus, incredibly detailed";

pub const NEGATIVE_PROMPT: &str = "hands, fingers, deformed hands, mutated hands, arms, blurry, deformed, ugly, disfigured, cartoon, anime, 3d render, painting, text, watermark, signature, extra limbs, missing limbs, body";

/// Base description of each phase before gender inflection.
pub fn phase_description(phase: Phase) -> &'static str {
    match phase {
        Phase::Baby => "extreme close-up face portrait of a cute newborn baby, 1 month old, sleeping peacefully, swaddled in a soft blanket with hands tucked under it, perfect smooth skin",
        Phase::Child => "cute happy child, 6 years old, smiling, headshot portrait",
        Phase::Teen => "portrait of a teenager, 16 years old, natural look, high school photo style",
        Phase::Adult => "professional headshot portrait of a young adult, 28 years old, confident expression",
    }
}

/// Replacement rules, applied in order.
/// Single-image and multi-phase generation share this one rule set.
fn inflections(gender: ResolvedGender) -> [(&'static str, &'static str); 4] {
    match gender {
        ResolvedGender::Boy => [
            ("child", "boy"),
            ("teenager", "male teenager"),
            ("adult", "man"),
            ("newborn baby", "newborn baby boy"),
        ],
        ResolvedGender::Girl => [
            ("child", "girl"),
            ("teenager", "female teenager"),
            ("adult", "woman"),
            ("newborn baby", "newborn baby girl"),
        ],
    }
}

pub fn inflect(description: &str, gender: ResolvedGender) -> String {
    inflections(gender)
        .iter()
        .fold(description.to_string(), |text, (from, to)| {
            text.replace(from, to)
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub negative_prompt: &'static str,
}

impl ComposedPrompt {
    pub fn to_request(&self) -> InferenceRequest {
        InferenceRequest {
            inputs: self.prompt.clone(),
            parameters: InferenceParameters {
                negative_prompt: self.negative_prompt.to_string(),
            },
        }
    }
}

pub fn compose(phase: Phase, gender: ResolvedGender, skin_tone: SkinTone) -> ComposedPrompt {
    let age_desc = inflect(phase_description(phase), gender);
    let prompt = BASE_PROMPT_TEMPLATE
        .replace("{age_desc}", &age_desc)
        .replace("{skin_tone}", skin_tone.descriptor());

    ComposedPrompt {
        prompt,
        negative_prompt: NEGATIVE_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_boy_child_light_brown() {
        let composed = compose(Phase::Child, ResolvedGender::Boy, SkinTone::LightBrown);
        assert_eq!(
            composed.prompt,
            "ultra realistic 8k photo, cute happy boy, 6 years old, smiling, headshot portrait, light brown, mediterranean skin, cinematic lighting, professional photography, sharp focus, incredibly detailed"
        );
        assert_eq!(composed.negative_prompt, NEGATIVE_PROMPT);
    }

    #[test]
    fn test_inflection_per_phase() {
        assert!(inflect(phase_description(Phase::Baby), ResolvedGender::Girl)
            .contains("cute newborn baby girl, 1 month old"));
        assert_eq!(
            inflect(phase_description(Phase::Teen), ResolvedGender::Boy),
            "portrait of a male teenager, 16 years old, natural look, high school photo style"
        );
        assert_eq!(
            inflect(phase_description(Phase::Adult), ResolvedGender::Girl),
            "professional headshot portrait of a young woman, 28 years old, confident expression"
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        for phase in Phase::ALL {
            for gender in [ResolvedGender::Boy, ResolvedGender::Girl] {
                for tone in SkinTone::ALL {
                    let first = compose(phase, gender, tone);
                    let second = compose(phase, gender, tone);
                    assert_eq!(first, second);
                    assert!(first.prompt.starts_with("ultra realistic 8k photo, "));
                    assert!(first.prompt.contains(tone.descriptor()));
                    assert!(!first.prompt.contains('{'));
                }
            }
        }
    }

    #[test]
    fn test_genders_differ() {
        for phase in Phase::ALL {
            let boy = compose(phase, ResolvedGender::Boy, SkinTone::Automatic);
            let girl = compose(phase, ResolvedGender::Girl, SkinTone::Automatic);
            assert_ne!(boy.prompt, girl.prompt);
        }
    }

    #[test]
    fn test_request_carries_negative_prompt() {
        let request = compose(Phase::Baby, ResolvedGender::Boy, SkinTone::Deep).to_request();
        assert_eq!(request.parameters.negative_prompt, NEGATIVE_PROMPT);
        assert!(request.inputs.contains("deep dark, african skin"));
    }
}
