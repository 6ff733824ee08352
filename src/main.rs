use clap::Parser;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use profcalc::analyzer::{self, AnySummarizer};
use profcalc::clipboard::{ClipboardProvider, SystemClipboard};
use profcalc::preferences::{JsonFileStore, ThemeSetting};
use profcalc::{cli, clipboard, config, display, error, logging, shell};
use profcalc_common::{AnalysisOutcome, GradingSession, Theme, ANALYSIS_FAILURE_MESSAGE};
use cli::{Cli, Commands};
use config::Config;
use error::{ProfCalcError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}", e);
    }
    let config = Config::load()?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let session = GradingSession::new(config.grade_scale()?);
            let theme = ThemeSetting::load(JsonFileStore::open_default()?);
            let clipboard: Option<Box<dyn ClipboardProvider>> = match SystemClipboard::new() {
                Ok(c) => Some(Box::new(c)),
                Err(e) => {
                    warn!("clipboard unavailable: {:#}", e);
                    None
                }
            };
            let summarizer = Arc::new(AnySummarizer::for_provider(cli.ai_provider, &config)?);

            let shell = shell::Shell::new(session, theme, clipboard);
            shell::run_session(shell, summarizer).await?;
        }

        Commands::Sum { values, copy } => {
            let session = fill_session(&config, &values)?;
            let theme = ThemeSetting::load(JsonFileStore::open_default()?).theme();
            println!(
                "{} = {}",
                session.accumulator().expression(),
                display::styled_total(session.total(), theme)
            );

            if copy && !session.accumulator().is_empty() {
                let text = session.total().to_string();
                match clipboard::copy_to_clipboard(&text) {
                    Ok(()) => println!("✔ Copié : {}", text),
                    Err(e) => {
                        warn!("clipboard copy failed: {:#}", e);
                        println!("Copie impossible : {}", e);
                    }
                }
            }
        }

        Commands::Analyze { values } => {
            let mut session = fill_session(&config, &values)?;
            let summarizer = AnySummarizer::for_provider(cli.ai_provider, &config)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!(
                "Analyse IA de {} = {}",
                session.accumulator().expression(),
                session.total()
            ));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = analyzer::run_analysis(&mut session, &summarizer).await;
            spinner.finish_and_clear();

            match outcome {
                Ok(AnalysisOutcome::Applied) => {
                    println!("Analyse IA :\n");
                    println!("{}", session.analysis().unwrap_or_default());
                }
                Ok(_) => println!("{}", ANALYSIS_FAILURE_MESSAGE),
                Err(rejection) => println!("{}", rejection),
            }
        }

        Commands::Theme { name } => {
            let mut setting = ThemeSetting::load(JsonFileStore::open_default()?);

            let theme = match name {
                Some(theme) => theme,
                None => {
                    let items: Vec<&str> = Theme::ALL.iter().map(|t| t.as_str()).collect();
                    let current = Theme::ALL
                        .iter()
                        .position(|t| *t == setting.theme())
                        .unwrap_or(0);
                    let index = Select::new()
                        .with_prompt("Thème")
                        .items(&items)
                        .default(current)
                        .interact()
                        .map_err(|e| ProfCalcError::CliExecution(e.to_string()))?;
                    Theme::ALL[index]
                }
            };

            setting.set(theme)?;
            println!("✔ Thème : {}", display::styled_theme_name(theme));
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ Clé API enregistrée");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ Modèle enregistré");
            }

            if show {
                println!("Configuration :");
                println!("  Fichier : {}", Config::config_path()?.display());
                println!("  Préférences : {}", JsonFileStore::open_default()?.path().display());
                println!("  Modèle : {}", config.model);
                println!("  Délai : {} s", config.timeout_seconds);
                println!("  Clé API : {}", if config.get_api_key().is_ok() { "définie" } else { "non définie" });
                let scale = config.grade_scale()?;
                let values: Vec<String> = scale.entries().iter().map(|e| e.to_string()).collect();
                println!("  Points : {}", values.join(" "));
            }
        }
    }

    Ok(())
}

fn fill_session(config: &Config, values: &[String]) -> Result<GradingSession> {
    let mut session = GradingSession::new(config.grade_scale()?);
    for raw in values {
        session.append(shell::parse_grade_value(raw)?)?;
    }
    Ok(session)
}
