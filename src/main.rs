use crate::config::{Cli, Command, ImportArgs, ServeArgs};
use crate::db::{init_db, Database};
use crate::import::{import_file, RowStatus};
use crate::router::respond;
use crate::state::AppState;
use astra::Server;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod db;
mod domain;
mod errors;
mod import;
mod query;
mod requests;
mod responses;
mod router;
mod state;
mod templates;
mod web;

#[cfg(test)]
mod tests;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let db = Database::new(cli.database.clone());

    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, "database initialization failed");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::InitDb => ExitCode::SUCCESS,
        Command::Serve(args) => serve(AppState::new(db, &cli.media_url), args),
        Command::Import(args) => import(&db, args),
    }
}

fn serve(state: AppState, args: ServeArgs) -> ExitCode {
    tracing::info!(addr = %args.addr, workers = args.workers, "starting server");

    let server = Server::bind(&args.addr).max_workers(args.workers);
    let result = server.serve(move |req, _info| respond(req, &state));

    match result {
        Ok(()) => {
            tracing::info!("server shut down cleanly");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "server ended with error");
            ExitCode::FAILURE
        }
    }
}

/// Prints one line per row, then the totals.
fn import(db: &Database, args: ImportArgs) -> ExitCode {
    let summary = match import_file(db, &args.csv_file, args.skip_location) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    for row in &summary.rows {
        match row.status {
            RowStatus::Error => eprintln!("{row}"),
            _ => println!("{row}"),
        }
    }

    println!("\nImport Summary:");
    println!("Created: {}", summary.created);
    println!("Updated: {}", summary.updated);
    if summary.errors > 0 {
        println!("Errors: {}", summary.errors);
    }
    if args.skip_location && summary.created > 0 {
        println!("Assign locations to the new properties at /admin");
    }
    ExitCode::SUCCESS
}
