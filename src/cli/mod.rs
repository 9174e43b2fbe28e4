//! CLI Module - client-side driver for a running generation server.
//!
//! Mirrors the workbench flow: always request JSON over the wire, stream
//! chunks into the session buffer, then render SQL/CSV locally from the
//! captured array without another network call.

use std::io::Write;
use futures::StreamExt;

use crate::ai::ProviderId;
use crate::config::Config;
use crate::prompt::{InputMode, OutputFormat};
use crate::session::GeneratorSession;
use crate::transform;

pub struct GenerateOpts {
    pub host: String,
    pub provider: String,
    pub api_key: Option<String>,
    pub input: String,
    pub schema: bool,
    pub rows: i64,
    pub format: String,
    pub table: String,
}

pub async fn run_generate(opts: GenerateOpts) -> Result<(), Box<dyn std::error::Error>> {
    let format = match opts.format.as_str() {
        "json" => OutputFormat::Json,
        "sql" => OutputFormat::Sql,
        "csv" => OutputFormat::Csv,
        other => return Err(format!("Unknown format: {}", other).into()),
    };

    let provider = ProviderId::from_header(&opts.provider);
    let api_key = match opts.api_key {
        Some(key) => key,
        None => std::env::var(provider.api_key_env_var()).map_err(|_| {
            format!(
                "No API key for {}: pass --api-key or set {}",
                provider.display_name(),
                provider.api_key_env_var()
            )
        })?,
    };

    let mut session = GeneratorSession::new();
    session.active_provider = provider;
    session.set_provider_key(provider, api_key);
    session.row_count = opts.rows;
    if opts.schema {
        session.input_mode = InputMode::Schema;
        session.schema_input = opts.input.clone();
    } else {
        session.natural_language_input = opts.input.clone();
    }

    session.begin()?;

    // Always request JSON; downstream formats are rendered locally.
    let body = serde_json::json!({
        "inputMode": session.input_mode,
        "input": session.active_input(),
        "format": OutputFormat::Json,
        "rowCount": session.row_count,
    });

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/generate", opts.host.trim_end_matches('/')))
        .header("X-Provider", provider.as_str())
        .header("X-Api-Key", session.provider_key(provider).unwrap_or_default())
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| format!("HTTP Error: {}", status.as_u16()));
        session.fail(message.clone());
        return Err(message.into());
    }

    // Echo chunks live when the caller wants the raw JSON; for SQL/CSV the
    // rendered result is printed once the array is complete.
    let live = format == OutputFormat::Json;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                if live {
                    print!("{}", text);
                    std::io::stdout().flush()?;
                }
                session.append_chunk(&text);
            }
            Err(e) => {
                session.fail(e.to_string());
                return Err(e.into());
            }
        }
    }
    session.complete();

    match format {
        OutputFormat::Json => println!(),
        OutputFormat::Sql => {
            let records: Vec<serde_json::Value> = serde_json::from_str(&session.output)?;
            println!("{}", transform::to_sql(&records, &opts.table));
        }
        OutputFormat::Csv => {
            session.output_format = OutputFormat::Csv;
            println!("{}", session.display_content());
        }
    }

    Ok(())
}

pub async fn run_init(output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let toml_str = config.export_toml()?;
    tokio::fs::write(output, toml_str).await?;
    println!("Wrote default config to {}", output);
    Ok(())
}
