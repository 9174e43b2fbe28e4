//! Mocksmith - LLM-backed mock tabular data generation service.
//!
//! Describe the data you want (in prose or as a type schema) and stream back
//! synthetic records as JSON, then re-render them as SQL inserts or CSV
//! without another model call.

use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use clap::{Parser, Subcommand};

pub mod ai;
pub mod api;
pub mod cli;
pub mod config;
pub mod prompt;
pub mod session;
pub mod transform;

pub use ai::{AiError, LlmProvider, ProviderId};
pub use prompt::{InputMode, OutputFormat, PromptPair};
pub use session::GeneratorSession;

#[derive(Parser)]
#[command(name = "mocksmith")]
#[command(about = "Generate mock tabular data with an LLM", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the generation server (default)
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
        /// Path to a config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate mock data against a running server
    Generate {
        /// Server to connect to
        #[arg(long, default_value = "http://localhost:8080")]
        host: String,
        /// Provider id: openai, anthropic, google or groq
        #[arg(short, long, default_value = "openai")]
        provider: String,
        /// API key for the provider (falls back to the provider's env var)
        #[arg(short = 'k', long)]
        api_key: Option<String>,
        /// What to generate, e.g. "10 users with names and emails"
        input: String,
        /// Treat the input as a type schema instead of natural language
        #[arg(long)]
        schema: bool,
        /// Number of rows to request (capped at 50 server-side)
        #[arg(short, long, default_value = "10")]
        rows: i64,
        /// Output format: json, sql or csv (sql/csv are rendered locally)
        #[arg(short, long, default_value = "json")]
        format: String,
        /// SQL table name for --format sql
        #[arg(long, default_value = "mock_data")]
        table: String,
    },
    /// Initialize a new configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "mocksmith.toml")]
        output: String,
    },
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    match cli.command {
        Some(Commands::Serve { port, config }) => {
            start_server(port, config).await?;
        }
        Some(Commands::Generate {
            host,
            provider,
            api_key,
            input,
            schema,
            rows,
            format,
            table,
        }) => {
            let opts = cli::GenerateOpts {
                host,
                provider,
                api_key,
                input,
                schema,
                rows,
                format,
                table,
            };
            cli::run_generate(opts).await?;
        }
        Some(Commands::Init { output }) => {
            cli::run_init(&output).await?;
        }
        None => {
            start_server(None, None).await?;
        }
    }

    Ok(())
}

async fn start_server(
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => config::Config::load(&path).await?,
        None => config::Config::default(),
    };
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().map_err(|errors| errors.join("; "))?;

    let app = api::router(&config);

    let addr = std::net::SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Mocksmith listening on {}", addr);
    info!("API Endpoints:");
    info!("  - Generate: POST http://{}/api/generate", addr);
    info!("  - Health: http://{}/health", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
