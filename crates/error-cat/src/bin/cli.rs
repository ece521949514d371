use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use error_cat::{
    init_tracing, BufferedResponse, CaughtError, Config, ErrorCat, ErrorData, ProcessEnv,
    ReportingGate, RollbarClient, StructuredError,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "error-cat",
    about = "Inspect and exercise error-cat reporting from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, help = "Output format", default_value = "pretty")]
    format: OutputFormat,

    #[arg(short, long, help = "TOML configuration file")]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show whether errors would be reported from this environment")]
    Check,

    #[command(about = "Create an error, log it and report it if allowed")]
    Report {
        #[arg(help = "HTTP status code")]
        status: u16,

        #[arg(help = "Error message")]
        message: String,

        #[arg(long, help = "Structured data as a JSON object")]
        data: Option<String>,
    },

    #[command(about = "Print the response a client would receive")]
    Respond {
        #[arg(help = "Error message")]
        message: String,

        #[arg(long, help = "HTTP status code; without it the error is unclassified")]
        status: Option<u16>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    config.validate()?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Check => check(&config, cli.format),
        Commands::Report {
            status,
            message,
            data,
        } => report(config, status, message, data, cli.format).await,
        Commands::Respond { message, status } => respond(message, status, cli.format),
    }
}

fn check(config: &Config, format: OutputFormat) -> Result<()> {
    let gate = ReportingGate::new(&config.gate);
    let rollbar = config.rollbar_config(&ProcessEnv);

    let summary = json!({
        "designation": gate.designation(&ProcessEnv),
        "credential_present": gate.credential(&ProcessEnv).is_some(),
        "can_report": gate.can_report(&ProcessEnv),
        "endpoint": rollbar.endpoint,
        "environment": rollbar.environment,
    });
    print_value(&summary, format)
}

async fn report(
    config: Config,
    status: u16,
    message: String,
    data: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let data = data.map(|raw| parse_data(&raw)).transpose()?;
    let client = Arc::new(RollbarClient::new(config.rollbar_config(&ProcessEnv))?);
    let timeout = Duration::from_secs(config.rollbar.timeout_secs + 1);

    let cat = ErrorCat::builder()
        .config(config)
        .reporter(client.clone())
        .install()?;

    let error = cat.create(status, message, data);
    let reported = cat.can_use_rollbar();
    let drained = client.drain(timeout).await;

    let summary = json!({
        "status": error.status_code(),
        "message": error.message(),
        "reported": reported,
        "drained": drained,
    });
    print_value(&summary, format)
}

fn respond(message: String, status: Option<u16>, format: OutputFormat) -> Result<()> {
    let error = match status {
        Some(status) => CaughtError::from(StructuredError::new(status, message, None)),
        None => CaughtError::unclassified(anyhow::anyhow!(message)),
    };

    let mut response = BufferedResponse::new();
    ErrorCat::responder(&error, &(), &mut response);

    let summary = json!({
        "status": response.status_code(),
        "body": response.body_json(),
    });
    print_value(&summary, format)
}

fn parse_data(raw: &str) -> Result<ErrorData> {
    let value: Value = serde_json::from_str(raw).context("--data is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow::anyhow!("--data must be a JSON object")),
    }
}

fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
