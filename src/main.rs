use babygen::{
    logger, App, Command, Config, GenerationError, GenerationProgress, Generator,
    HuggingFaceClient, Outcome,
};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let config = Config::from_env();

    logger::init_with_config(logger::LoggerConfig::from_app_config(&config))?;
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::debug!("No .env file found, using system environment variables");
    }
    logger::log_config_info(&config);

    for (id, name, provider) in HuggingFaceClient::supported_models() {
        log::info!("🖼️  Model: {} - {} ({})", id, name, provider);
    }

    let client = HuggingFaceClient::new(config.api_url.clone());
    let generator = Generator::new(client, &config);
    let mut app = App::new(config, generator);

    println!("{}", "👶 AI Baby Generator".bold());
    println!("Results are artistic renderings, not a scientific prediction.");
    println!("Parent photos only enable the buttons; the model does not see them.");
    println!("{}", babygen::app::HELP);
    print_blockers(&app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".bright_blue().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                print_error(&e);
                continue;
            }
        };

        let spinner = matches!(command, Command::GenerateSingle | Command::GenerateAll)
            .then(|| start_spinner(&command));
        let progress_bar = spinner.clone();
        let result = app
            .handle(command, move |event| {
                if let Some(pb) = &progress_bar {
                    report_progress(pb, event);
                }
            })
            .await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match result {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => {
                print_error(&e);
                if matches!(e, GenerationError::ConfigError(_)) {
                    print_blockers(&app);
                }
            }
        }
    }

    let session = app.session();
    log::info!(
        "👋 Session {} finished after {}s (started {})",
        session.id,
        session.elapsed().num_seconds(),
        session.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

fn start_spinner(command: &Command) -> ProgressBar {
    let (pb, message) = match command {
        Command::GenerateAll => (
            ProgressBar::new(4),
            "Generating the age progression... this can take a minute!",
        ),
        _ => (ProgressBar::new_spinner(), "Generating your image... ⏳"),
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{bar:20.cyan/blue}] {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn report_progress(pb: &ProgressBar, event: GenerationProgress) {
    match event {
        GenerationProgress::PhaseStarted { index, phase, .. } => {
            pb.set_position(index as u64);
            pb.set_message(format!("Generating phase: {}...", phase));
        }
        GenerationProgress::PhaseCompleted { index, .. } => pb.set_position(index as u64 + 1),
        GenerationProgress::Composing => pb.set_message("Assembling the final grid..."),
        GenerationProgress::Failed { phase } => {
            pb.abandon_with_message(format!("Failed to generate phase '{}'. Aborting.", phase))
        }
    }
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Updated(message) => println!("{} {}", "✔".green(), message),
        Outcome::Generated { caption, file_name } => {
            println!("{} {}", "🖼️ ".green(), caption.bold());
            println!("   Ready to save as {} (type `save`)", file_name.cyan());
        }
        Outcome::Saved(path) => println!("{} Saved to {}", "📥".green(), path.display()),
        Outcome::Status(status) => println!("{}", status),
        Outcome::Help => println!("{}", babygen::app::HELP),
        Outcome::Quit => {}
    }
}

fn print_error(error: &GenerationError) {
    println!("{} {}", "✖".red().bold(), error.to_string().red());
    if let Some(hint) = error.hint() {
        println!("  {}", hint.yellow());
    }
}

fn print_blockers<B: babygen::ImageBackend>(app: &App<B>) {
    for blocker in app.blockers() {
        println!("{} To generate, {}", "⚠️ ".yellow(), blocker);
    }
}
