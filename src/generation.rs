//! Single-image and four-phase generation runs.
//!
//! Remote calls are issued one at a time. A multi-phase run stops at the first
//! failing phase and drops whatever it had fetched, so the session only ever
//! sees complete results.

use crate::{
    client::ImageBackend,
    config::Config,
    error::{GenerationError, Result},
    grid,
    models::{GeneratedImage, GenerationOptions, Phase, ResolvedGender, ResultArtifact},
    prompt,
    session::Session,
};
use image::DynamicImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationProgress {
    PhaseStarted {
        index: usize,
        total: usize,
        phase: Phase,
    },
    PhaseCompleted {
        index: usize,
        total: usize,
        phase: Phase,
    },
    Composing,
    Failed {
        phase: Phase,
    },
}

pub struct Generator<B: ImageBackend> {
    backend: B,
    require_parent_photos: bool,
    rng: StdRng,
}

impl<B: ImageBackend> Generator<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        log::debug!("Image endpoint: {}", backend.endpoint());
        Self {
            backend,
            require_parent_photos: config.require_parent_photos,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fix the random source used to resolve `Gender::Random`.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate one portrait for the selected age and keep it in the session.
    pub async fn generate_single<'s>(
        &mut self,
        session: &'s mut Session,
        options: &GenerationOptions,
    ) -> Result<&'s ResultArtifact> {
        let credential = self.check_ready(session, options)?;
        let phase = options.selected_age;
        if !phase.is_single_selectable() {
            return Err(GenerationError::InvalidOption(format!(
                "'{}' is not available for single images",
                phase
            )));
        }

        let gender = options.gender.resolve(&mut self.rng);
        log::info!("🎨 Generating single image: {} - {}", gender, phase);

        let generated = self.fetch_phase(&credential, phase, gender, options).await?;
        let artifact = ResultArtifact::single(gender, generated)?;

        log::info!("✅ Generated {}", artifact.file_name);
        Ok(session.store_artifact(artifact))
    }

    /// Generate Baby, Child, Teen and Adult in order and keep the 2x2 grid in the session.
    pub async fn generate_all_phases<'s, F>(
        &mut self,
        session: &'s mut Session,
        options: &GenerationOptions,
        mut progress: F,
    ) -> Result<&'s ResultArtifact>
    where
        F: FnMut(GenerationProgress),
    {
        let credential = self.check_ready(session, options)?;
        let gender = options.gender.resolve(&mut self.rng);
        let total = Phase::ALL.len();
        log::info!("🎨 Generating age progression for a {}", gender);

        let mut images: Vec<DynamicImage> = Vec::with_capacity(total);
        for (index, phase) in Phase::ALL.into_iter().enumerate() {
            progress(GenerationProgress::PhaseStarted {
                index,
                total,
                phase,
            });
            log::info!("Generating phase {}/{}: {}", index + 1, total, phase);

            match self.fetch_phase(&credential, phase, gender, options).await {
                Ok(generated) => images.push(generated.image),
                Err(e) => {
                    log::error!("❌ Failed to generate phase '{}'. Aborting.", phase);
                    progress(GenerationProgress::Failed { phase });
                    return Err(GenerationError::PhaseFailed {
                        phase,
                        source: Box::new(e),
                    });
                }
            }

            progress(GenerationProgress::PhaseCompleted {
                index,
                total,
                phase,
            });
        }

        progress(GenerationProgress::Composing);
        let images: [DynamicImage; 4] = images.try_into().map_err(|_| {
            GenerationError::EncodeError("expected exactly four phase images".into())
        })?;
        let grid_image = DynamicImage::ImageRgb8(grid::compose_grid(&images));
        let artifact = ResultArtifact::grid(gender, grid_image)?;

        log::info!("✅ Generated {}", artifact.file_name);
        Ok(session.store_artifact(artifact))
    }

    /// Everything that must hold before the first network call.
    fn check_ready(&self, session: &Session, options: &GenerationOptions) -> Result<String> {
        let credential = options.credential().ok_or_else(|| {
            GenerationError::ConfigError(
                "API key not found. Enter your API key before generating.".into(),
            )
        })?;

        if self.require_parent_photos && !session.has_both_parent_photos() {
            return Err(GenerationError::ConfigError(
                "Attach both parent photos to enable generation.".into(),
            ));
        }

        Ok(credential.to_string())
    }

    async fn fetch_phase(
        &self,
        credential: &str,
        phase: Phase,
        gender: ResolvedGender,
        options: &GenerationOptions,
    ) -> Result<GeneratedImage> {
        let composed = prompt::compose(phase, gender, options.skin_tone);
        log::debug!("Prompt for {}: {}", phase, composed.prompt);

        let bytes = self
            .backend
            .generate(credential, &composed.to_request())
            .await?;
        let generated = GeneratedImage::decode(phase, bytes)?;
        log::debug!(
            "Received {} bytes for {} ({}x{})",
            generated.bytes.len(),
            phase,
            generated.image.width(),
            generated.image.height()
        );
        Ok(generated)
    }
}
