use crate::{
    error::{GenerationError, Result},
    models::ResultArtifact,
};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A parent photo attached by the user. Only its presence gates generation.
#[derive(Debug, Clone)]
pub struct ParentPhoto {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ParentPhoto {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !PHOTO_EXTENSIONS.contains(&extension.as_str()) {
            return Err(GenerationError::InvalidOption(format!(
                "{} is not a jpg, jpeg or png file",
                path.display()
            )));
        }

        let bytes = fs::read(path)?;
        let image = image::load_from_memory(&bytes).map_err(|e| {
            GenerationError::DecodeError(format!(
                "{} is not a readable image: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
        })
    }
}

/// State owned by one interactive session.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    last_artifact: Option<ResultArtifact>,
    parent_photos: [Option<ParentPhoto>; 2],
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            last_artifact: None,
            parent_photos: [None, None],
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }

    pub fn last_artifact(&self) -> Option<&ResultArtifact> {
        self.last_artifact.as_ref()
    }

    /// Replace the last artifact. Only successful generations call this.
    pub fn store_artifact(&mut self, artifact: ResultArtifact) -> &ResultArtifact {
        log::debug!("Session {} now holds {}", self.id, artifact.file_name);
        self.last_artifact.insert(artifact)
    }

    /// `slot` is 1 or 2.
    pub fn attach_parent_photo(
        &mut self,
        slot: usize,
        path: impl AsRef<Path>,
    ) -> Result<&ParentPhoto> {
        let index = Self::slot_index(slot)?;
        let photo = ParentPhoto::load(path)?;
        log::info!(
            "📷 Parent photo {} attached: {} ({}x{})",
            slot,
            photo.path.display(),
            photo.width,
            photo.height
        );
        Ok(self.parent_photos[index].insert(photo))
    }

    pub fn parent_photo(&self, slot: usize) -> Option<&ParentPhoto> {
        Self::slot_index(slot)
            .ok()
            .and_then(|index| self.parent_photos[index].as_ref())
    }

    pub fn has_both_parent_photos(&self) -> bool {
        self.parent_photos.iter().all(Option::is_some)
    }

    /// Write the last artifact into `dir` under its own file name.
    pub fn save_last(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let artifact = self
            .last_artifact
            .as_ref()
            .ok_or(GenerationError::NothingToSave)?;

        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&artifact.file_name);
        fs::write(&path, &artifact.png)?;

        log::info!("💾 Image saved to: {}", path.display());
        Ok(path)
    }

    fn slot_index(slot: usize) -> Result<usize> {
        match slot {
            1 | 2 => Ok(slot - 1),
            other => Err(GenerationError::InvalidOption(format!(
                "photo slot must be 1 or 2, got {}",
                other
            ))),
        }
    }
}
