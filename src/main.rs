use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

mod args;
mod config;
mod error;
mod logging;
mod payload;
mod request;
mod settings;
mod templates;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "workflow-settings")]
#[command(about = "Front-end settings, result payloads and request checks from workflow.yml", long_about = None)]
struct Cli {
    /// Tracing filter (overrides RUST_LOG), e.g. "debug".
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the UI settings descriptor (parameters, upload options, results config).
    Settings {
        #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
        config: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Build the results payload and list extra artifacts.
    Payload {
        #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
        config: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Validate an execution request (JSON object) and fill in defaults.
    Validate {
        #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
        config: String,

        #[arg(long = "request")]
        request_path: String,

        #[arg(long)]
        job_id: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Parse workflow parameters from command-line flags; unknown flags are ignored.
    Args {
        #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
        config: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    match cli.cmd {
        Commands::Settings { config, out } => {
            let doc = config::load_document(&config)?;
            let settings = settings::build_ui_settings(&doc)?;
            emit(out.as_deref(), serde_json::to_string(&settings)?)?;
        }
        Commands::Payload { config, out } => {
            let doc = config::load_document(&config)?;
            let (payload, artifacts) = payload::build_payload(&doc)?;
            let body = json!({ "payload": payload, "artifacts": artifacts });
            emit(out.as_deref(), serde_json::to_string(&body)?)?;
        }
        Commands::Validate {
            config,
            request_path,
            job_id,
            out,
        } => {
            let doc = config::load_document(&config)?;
            let text = std::fs::read_to_string(&request_path)
                .with_context(|| format!("read request file {}", request_path))?;
            let mut req: request::Request = serde_json::from_str(&text).with_context(|| {
                format!("request file {} must hold a JSON object", request_path)
            })?;

            let validated = request::validate_request(&doc, &mut req, &job_id)?;
            info!(
                workflow = validated.name,
                job_id = %job_id,
                parameters = validated.parameters.len(),
                untyped = validated.untyped.len(),
                wrong_type = validated.wrong_type.len(),
                "request validated"
            );

            let body = json!({
                "request": req,
                "name": validated.name,
                "entry_points": validated.entry_points,
            });
            emit(out.as_deref(), serde_json::to_string(&body)?)?;
        }
        Commands::Args { config, tokens } => {
            let doc = config::load_document(&config)?;
            let parsed = args::parse_parameter_args(&doc, tokens)?;
            emit(None, serde_json::to_string(&parsed)?)?;
        }
    }

    Ok(())
}

/// Write JSON to `out`, or stdout when no path is given.
fn emit(out: Option<&str>, body: String) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, body).with_context(|| format!("write {}", path))?;
            info!(path, "wrote output");
        }
        None => println!("{}", body),
    }
    Ok(())
}
