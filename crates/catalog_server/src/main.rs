//! `catalog-server` entry point.

use catalog_core::init_logging;
use catalog_server::{serve, shutdown_signal, ServerConfig};
use clap::Parser;
use log::error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("catalog-server: {err}");
        return ExitCode::FAILURE;
    }

    match serve(&config, shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=http status=error error={err}");
            eprintln!("catalog-server: {err}");
            ExitCode::FAILURE
        }
    }
}
