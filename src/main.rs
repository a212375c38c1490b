// Command-line front end: submits one piece of content, prints the verdict
// and optionally writes the HTML report.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossmod::app::App;
use crossmod::client::HttpModerationClient;
use crossmod::config::{AppConfig, Language};
use crossmod::error::{ModerationError, format_summary, summarize_error};
use crossmod::telemetry::{OutputFormat, SubscriberConfig, init_subscriber};
use crossmod::types::{ContentType, HealthStatus, ModerationResult, RiskThresholds, SelectedFile};
use crossmod::ui::render::{render_health_text, render_page, render_result_text, render_view};

/// Check text, images, audio and video against a moderation service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Origin of the moderation service.
    #[arg(long, env = "CROSSMOD_API_BASE")]
    api_base: Option<String>,

    /// Abort the moderation request after this many seconds.
    #[arg(long, env = "CROSSMOD_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// JSON configuration file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language of captions, labels and messages (en, zh).
    #[arg(long)]
    lang: Option<Language>,

    #[arg(long, env = "CROSSMOD_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// text, json or json-compact
    #[arg(long, env = "CROSSMOD_LOG_FORMAT", default_value = "text")]
    log_format: OutputFormat,

    /// Write logs to this file instead of stderr.
    #[arg(long, env = "CROSSMOD_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Write the HTML report page to this file.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Print the raw JSON result instead of the text summary.
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    json: bool,

    /// Include server-provided error details.
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Moderate a piece of text.
    Text { text: String },
    /// Moderate an image, audio or video file.
    File {
        path: PathBuf,
        /// Content type; inferred from the file when omitted.
        #[arg(long)]
        kind: Option<ContentType>,
    },
    /// Show the service status.
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = SubscriberConfig::builder()
        .log_level_str(&cli.log_level)
        .map(|b| b.output_format(cli.log_format));
    let telemetry = match (telemetry, cli.log_file.clone()) {
        (Ok(b), Some(path)) => Ok(b.log_file(path).build()),
        (Ok(b), None) => Ok(b.build()),
        (Err(e), _) => Err(e),
    };
    let _guard = match telemetry.and_then(init_subscriber) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "crossmod failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, ModerationError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_json_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(base) = &cli.api_base {
        config.client.base_url = base.clone();
    }
    if let Some(secs) = cli.timeout {
        config.client.timeout = Duration::from_secs(secs);
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<ExitCode, ModerationError> {
    let config = load_config(&cli)?;
    let language = config.language;
    let client = HttpModerationClient::new(config.client.clone())?;
    let app = App::new(client, config);

    match &cli.command {
        Command::Health => {
            let health = app.check_health().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                print!("{}", render_health_text(&health, app.copy()));
            }
            return Ok(ExitCode::from(health_exit(&health)));
        }
        Command::Text { text } => app.set_text(text.clone()),
        Command::File { path, kind } => {
            let file = SelectedFile::from_path(path).await?;
            let kind = (*kind)
                .or_else(|| ContentType::from_mime(&file.mime))
                .ok_or_else(|| {
                    ModerationError::InvalidInput(format!(
                        "Cannot tell the content type of {} ({}); pass --kind",
                        file.name, file.mime
                    ))
                })?;
            app.switch_tab(kind);
            app.select_file(file)?;
        }
    }

    let submit = app.submit();
    tokio::pin!(submit);
    // Polled first so the loading indicator is up before captions are read.
    let finished = tokio::select! {
        biased;
        outcome = &mut submit => Some(outcome),
        _ = print_captions(&app) => None,
    };
    let outcome = match finished {
        Some(outcome) => outcome,
        None => submit.await,
    };

    if let Some(out) = &cli.out {
        let body = render_view(&app.ui(), app.copy());
        let page = render_page(&app.copy().title, &body, language.code());
        tokio::fs::write(out, page).await?;
        tracing::info!(path = %out.display(), "Report written");
    }

    match &outcome {
        Ok(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!(
                    "{}",
                    render_result_text(result, app.copy(), &app.config().thresholds)
                );
            }
        }
        Err(e) => {
            let summary = summarize_error(e, app.copy());
            eprint!("{}", format_summary(&summary, cli.verbose));
        }
    }
    Ok(ExitCode::from(moderation_exit(&outcome, &app.config().thresholds)))
}

/// 0 for SAFE, 2 for WARNING or DANGER, 1 when no verdict came back.
fn moderation_exit(
    outcome: &Result<ModerationResult, ModerationError>,
    thresholds: &RiskThresholds,
) -> u8 {
    match outcome {
        Ok(result) if result.risk_level(thresholds).is_flagged() => 2,
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// 0 when healthy, 2 when degraded, 1 when unreachable or in error.
fn health_exit(health: &HealthStatus) -> u8 {
    if health.is_healthy() {
        0
    } else if health.is_reachable() && health.error.is_none() {
        2
    } else {
        1
    }
}

/// Mirror the loading caption on stderr until rotation stops.
async fn print_captions<A: crossmod::ModerationApi>(app: &App<A>) {
    let Some(mut captions) = app.loading_captions() else {
        return;
    };
    eprintln!("{}", *captions.borrow_and_update());
    while captions.changed().await.is_ok() {
        eprintln!("{}", *captions.borrow_and_update());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(violation: bool, confidence: f64) -> Result<ModerationResult, ModerationError> {
        Ok(ModerationResult {
            violation,
            confidence,
            ..Default::default()
        })
    }

    #[test]
    fn moderation_exit_codes() {
        let t = RiskThresholds::default();
        assert_eq!(moderation_exit(&verdict(false, 0.95), &t), 0);
        assert_eq!(moderation_exit(&verdict(true, 0.65), &t), 2);
        assert_eq!(moderation_exit(&verdict(true, 0.9), &t), 2);
        assert_eq!(moderation_exit(&Err(ModerationError::Busy), &t), 1);
    }

    #[test]
    fn health_exit_codes() {
        let healthy = HealthStatus {
            status: "healthy".into(),
            ..Default::default()
        };
        let degraded = HealthStatus {
            status: "degraded".into(),
            ..Default::default()
        };
        assert_eq!(health_exit(&healthy), 0);
        assert_eq!(health_exit(&degraded), 2);
        assert_eq!(health_exit(&HealthStatus::unreachable("refused")), 1);
        assert_eq!(health_exit(&HealthStatus::error("HTTP 500")), 1);
    }
}
