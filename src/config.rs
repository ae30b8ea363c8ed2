// src/config.rs
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Vacation rental listings: CSV import, JSON API and web pages.
#[derive(Debug, Parser)]
#[command(name = "rentals", version, about)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "RENTALS_DATABASE", default_value = "rentals.sqlite3")]
    pub database: String,

    /// Public URL prefix of stored image paths.
    #[arg(long, global = true, env = "RENTALS_MEDIA_URL", default_value = "/media/")]
    pub media_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Import properties from a CSV file.
    Import(ImportArgs),
    /// Create the database schema and exit.
    InitDb,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "RENTALS_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// Worker threads handling requests.
    #[arg(long, env = "RENTALS_WORKERS", default_value_t = 8)]
    pub workers: usize,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to the CSV file.
    pub csv_file: PathBuf,

    /// Import without locations; they are assigned later in the admin.
    #[arg(long)]
    pub skip_location: bool,
}
