use crate::{
    client::ImageBackend,
    config::Config,
    error::{GenerationError, Result},
    generation::{GenerationProgress, Generator},
    models::{Gender, GenerationOptions, Phase, SkinTone},
    session::Session,
};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  gender boy|girl|random     choose the child's gender
  skin <tone>                automatic, very-light, light, light-brown, dark-brown, deep
  age baby|child|teen        age used by `single`
  key <token>                API key for the image service
  photo 1|2 <path>           attach a parent photo (jpg, jpeg or png)
  single                     generate one image for the selected age
  all                        generate baby, child, teen and adult as a 2x2 grid
  save [dir]                 save the last generated image
  status                     show the current selections
  help                       show this message
  quit                       leave";

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetGender(Gender),
    SetSkinTone(SkinTone),
    SetAge(Phase),
    SetCredential(String),
    AttachPhoto { slot: usize, path: PathBuf },
    GenerateSingle,
    GenerateAll,
    Save(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let needs_arg = |what: &str| {
            if rest.is_empty() {
                Err(GenerationError::InvalidOption(format!(
                    "'{}' needs {}",
                    word, what
                )))
            } else {
                Ok(rest)
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "gender" => Ok(Command::SetGender(needs_arg("a gender")?.parse()?)),
            "skin" => Ok(Command::SetSkinTone(needs_arg("a skin tone")?.parse()?)),
            "age" => {
                let phase: Phase = needs_arg("an age")?.parse()?;
                if !phase.is_single_selectable() {
                    return Err(GenerationError::InvalidOption(format!(
                        "'{}' is only generated as part of `all`",
                        phase
                    )));
                }
                Ok(Command::SetAge(phase))
            }
            "key" => Ok(Command::SetCredential(needs_arg("a token")?.to_string())),
            "photo" => {
                let args = needs_arg("a slot and a path")?;
                let (slot, path) = args.split_once(char::is_whitespace).ok_or_else(|| {
                    GenerationError::InvalidOption("usage: photo 1|2 <path>".into())
                })?;
                let slot = slot.parse::<usize>().map_err(|_| {
                    GenerationError::InvalidOption(format!("'{}' is not a photo slot", slot))
                })?;
                Ok(Command::AttachPhoto {
                    slot,
                    path: PathBuf::from(path.trim()),
                })
            }
            "single" => Ok(Command::GenerateSingle),
            "all" => Ok(Command::GenerateAll),
            "save" => Ok(Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err(GenerationError::InvalidOption("empty command".into())),
            other => Err(GenerationError::InvalidOption(format!(
                "unknown command '{}', type `help`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated(String),
    Generated { caption: String, file_name: String },
    Saved(PathBuf),
    Status(String),
    Help,
    Quit,
}

/// Holds one session and applies each command to it.
pub struct App<B: ImageBackend> {
    config: Config,
    options: GenerationOptions,
    session: Session,
    generator: Generator<B>,
}

impl<B: ImageBackend> App<B> {
    pub fn new(config: Config, generator: Generator<B>) -> Self {
        let mut options = GenerationOptions::new();
        options.credential = config.api_token.clone();

        Self {
            config,
            options,
            session: Session::new(),
            generator,
        }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Why the generate commands are currently disabled, if they are.
    pub fn blockers(&self) -> Vec<&'static str> {
        let mut blockers = Vec::new();
        if self.options.credential().is_none() {
            blockers.push("enter your API key with `key <token>`");
        }
        if self.config.require_parent_photos && !self.session.has_both_parent_photos() {
            blockers.push("attach both parent photos with `photo 1|2 <path>`");
        }
        blockers
    }

    pub async fn handle<F>(&mut self, command: Command, progress: F) -> Result<Outcome>
    where
        F: FnMut(GenerationProgress),
    {
        match command {
            Command::SetGender(gender) => {
                self.options.gender = gender;
                Ok(Outcome::Updated(format!("Gender: {}", gender)))
            }
            Command::SetSkinTone(tone) => {
                self.options.skin_tone = tone;
                Ok(Outcome::Updated(format!(
                    "Skin tone: {} ({})",
                    tone,
                    tone.descriptor()
                )))
            }
            Command::SetAge(phase) => {
                self.options.selected_age = phase;
                Ok(Outcome::Updated(format!("Age: {}", phase)))
            }
            Command::SetCredential(token) => {
                self.options.credential = Some(token);
                Ok(Outcome::Updated("API key set".into()))
            }
            Command::AttachPhoto { slot, path } => {
                let photo = self.session.attach_parent_photo(slot, &path)?;
                Ok(Outcome::Updated(format!(
                    "Parent photo {}: {} ({}x{})",
                    slot,
                    photo.path.display(),
                    photo.width,
                    photo.height
                )))
            }
            Command::GenerateSingle => {
                let artifact = self
                    .generator
                    .generate_single(&mut self.session, &self.options)
                    .await?;
                Ok(Outcome::Generated {
                    caption: artifact.caption(),
                    file_name: artifact.file_name.clone(),
                })
            }
            Command::GenerateAll => {
                let artifact = self
                    .generator
                    .generate_all_phases(&mut self.session, &self.options, progress)
                    .await?;
                Ok(Outcome::Generated {
                    caption: artifact.caption(),
                    file_name: artifact.file_name.clone(),
                })
            }
            Command::Save(dir) => {
                let dir = dir.unwrap_or_else(|| self.config.output_dir.clone());
                Ok(Outcome::Saved(self.session.save_last(dir)?))
            }
            Command::Status => Ok(Outcome::Status(self.status())),
            Command::Help => Ok(Outcome::Help),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    pub fn status(&self) -> String {
        let mut lines = vec![
            format!("Gender:    {}", self.options.gender),
            format!(
                "Skin tone: {} ({})",
                self.options.skin_tone,
                self.options.skin_tone.descriptor()
            ),
            format!("Age:       {}", self.options.selected_age),
            format!(
                "API key:   {}",
                if self.options.credential().is_some() { "set" } else { "missing" }
            ),
        ];

        for slot in 1..=2 {
            let photo = self
                .session
                .parent_photo(slot)
                .map(|p| p.path.display().to_string())
                .unwrap_or_else(|| "-".into());
            lines.push(format!("Photo {}:   {}", slot, photo));
        }

        let last = self
            .session
            .last_artifact()
            .map(|a| a.file_name.clone())
            .unwrap_or_else(|| "-".into());
        lines.push(format!("Last image: {}", last));

        for blocker in self.blockers() {
            lines.push(format!("To generate: {}", blocker));
        }
        lines.join("\n")
    }
}
