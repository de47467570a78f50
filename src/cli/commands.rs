//! CLI command implementations
//!
//! Every command loads the config, builds one provider and runs a single
//! operation against it. `serve` is the only long-running command.

use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::http_server::HttpServer;
use crate::observability::{log_event, Event};
use crate::provider::{InsertOutcome, PetProvider, ProviderError};
use crate::schema::ContentValues;
use crate::store::PetStore;

use super::args::{Cli, Command};
use super::config::PetDbConfig;
use super::errors::{CliError, CliResult};
use super::io::{read_request_from, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(&cli.config, cli.command)
}

/// Run `cmd` against the database named in the config file
pub fn run_command(config_path: &Path, cmd: Command) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = PetDbConfig::load(config_path)?;
    tracing::info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        database_path = %config.database_path,
        "loaded config"
    );

    let provider = PetProvider::new(PetStore::new(config.to_store_config()?));

    match cmd {
        Command::Serve { port } => serve(&config, provider, port),
        cmd => {
            let data = execute(&provider, cmd, io::stdin().lock())?;
            write_response(data)
        }
    }
}

/// Run a one-shot command. `input` supplies the payload for insert and update.
pub fn execute<R: Read>(provider: &PetProvider, cmd: Command, input: R) -> CliResult<Value> {
    match cmd {
        Command::Init => {
            provider.store().open().map_err(ProviderError::from)?;
            Ok(json!({"initialized": true}))
        }

        Command::Query { uri, selection, sort } => {
            let selection = selection.to_selection();
            let pets = provider
                .query(&uri, selection.as_ref(), sort.as_deref())?
                .collect_all()
                .map_err(ProviderError::from)?;
            Ok(json!(pets))
        }

        Command::Insert { uri } => {
            let values = read_payload(input)?;
            match provider.insert(&uri, &values)? {
                InsertOutcome::Created { id, uri } => Ok(json!({
                    "id": id,
                    "uri": uri.to_string(),
                })),
                InsertOutcome::Failed => Err(CliError::insert_failed(&uri)),
            }
        }

        Command::Update { uri, selection } => {
            let values = read_payload(input)?;
            let selection = selection.to_selection();
            let rows = provider.update(&uri, &values, selection.as_ref())?;
            Ok(json!({"rows": rows}))
        }

        Command::Delete { uri, selection } => {
            let selection = selection.to_selection();
            let rows = provider.delete(&uri, selection.as_ref())?;
            Ok(json!({"rows": rows}))
        }

        Command::Type { uri } => Ok(json!({"type": provider.get_type(&uri)?})),

        Command::Serve { .. } => Err(CliError::serve_failed(
            "serve is not a one-shot command",
        )),
    }
}

fn read_payload<R: Read>(input: R) -> CliResult<ContentValues> {
    let request = read_request_from(input)?;
    Ok(ContentValues::from_json(&request).map_err(ProviderError::from)?)
}

/// Serve the provider over HTTP until the process is stopped
pub fn serve(config: &PetDbConfig, provider: PetProvider, port: Option<u16>) -> CliResult<()> {
    let mut http_config = config.http.clone();
    if let Some(port) = port {
        http_config.port = port;
    }

    let server = HttpServer::new(http_config, Arc::new(provider));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    log_event(Event::ShutdownComplete);
    Ok(())
}
