use crate::{client::hugging_face::DEFAULT_ENDPOINT, logger::LogLevel};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub output_dir: PathBuf,
    pub require_parent_photos: bool,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            output_dir: PathBuf::from("."),
            require_parent_photos: false,
            log_level: LogLevel::Info,
            log_file: None,
            log_json: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_blank("BABYGEN_API_URL").unwrap_or(defaults.api_url);
        let api_token =
            non_blank("BABYGEN_API_TOKEN").or_else(|| non_blank("HUGGING_FACE_TOKEN"));
        let output_dir = non_blank("BABYGEN_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let require_parent_photos = non_blank("BABYGEN_REQUIRE_PARENT_PHOTOS")
            .map_or(false, |val| val.trim().eq_ignore_ascii_case("true"));
        let log_level = non_blank("BABYGEN_LOG_LEVEL")
            .and_then(|val| val.parse().ok())
            .unwrap_or(defaults.log_level);
        let log_file = non_blank("BABYGEN_LOG_FILE").map(PathBuf::from);
        let log_json = non_blank("BABYGEN_LOG_JSON")
            .map_or(false, |val| val.trim().eq_ignore_ascii_case("true"));

        Config {
            api_url,
            api_token,
            output_dir,
            require_parent_photos,
            log_level,
            log_file,
            log_json,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_parent_photos_required(mut self, required: bool) -> Self {
        self.require_parent_photos = required;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_log_json(mut self, enabled: bool) -> Self {
        self.log_json = enabled;
        self
    }
}
