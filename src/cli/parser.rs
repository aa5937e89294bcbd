use clap::{Parser, Subcommand};

/// Command-line interface definition for pinmap
/// Map pin board server backed by SQLite
#[derive(Parser)]
#[command(
    name = "pinmap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Map pin board: geolocated pins, admin-configurable view, filtered spreadsheet export",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the database schema
    Init,

    /// Run the HTTP server
    Serve {
        /// Bind address, overriding the configured one (host:port)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}
