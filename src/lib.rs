pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod grid;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod session;

pub use app::{App, Command, Outcome};
pub use client::{HuggingFaceClient, ImageBackend};
pub use config::Config;
pub use error::{GenerationError, Result};
pub use generation::{GenerationProgress, Generator};
pub use models::*;
pub use session::Session;
