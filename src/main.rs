use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use cardio_assess::adapters::{HttpAssessmentApi, TracingNotifier};
use cardio_assess::application::{ReplayScript, SubmitAssessmentHandler};
use cardio_assess::config::AppConfig;
use cardio_assess::domain::foundation::AuthContext;
use cardio_assess::telemetry;

/// Replays a recorded wizard run and submits it to the risk backend.
#[derive(Parser, Debug)]
#[command(name = "cardio-assess", version, about)]
struct Cli {
    /// Replay script (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    script: PathBuf,

    /// Access token of the user the script answers for
    #[arg(
        long,
        env = "CARDIO_ASSESS_TOKEN",
        hide_env_values = true,
        required_unless_present = "dry_run"
    )]
    token: Option<String>,

    /// Replay and print the payload without calling the backend
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.logging)?;

    let script = ReplayScript::from_path(&cli.script)?;

    if cli.dry_run {
        let payload = script.payload()?;
        tracing::info!(script = %cli.script.display(), "Script replayed");
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let api = HttpAssessmentApi::new(config.api()?.clone())?;
    let token = cli.token.ok_or("an access token is required to submit")?;
    let auth = AuthContext::sign_in(token, script.profile.clone())?;
    let mut session = script.replay()?;
    tracing::info!(
        questions = session.questions().len(),
        script = %cli.script.display(),
        "Script replayed"
    );

    let handler = SubmitAssessmentHandler::new(
        Arc::new(api),
        Arc::new(TracingNotifier),
        config.progress.clone(),
    );
    let outcome = handler.handle(&mut session, &auth).await;
    auth.sign_out();

    let outcome = outcome?;
    println!("{}", outcome.redirect_path);
    Ok(())
}
