use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lockbox")]
#[command(author = "LockBox Team")]
#[command(version = "0.2.0")]
#[command(about = "Sports betting picks backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (reads default.toml plus the LOCKBOX_ENV overlay)
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve {
        /// Listen port (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print scored picks for a sport
    Picks {
        /// Sport key: nfl, mlb, nhl, ncaaf
        #[arg(short, long, default_value = "nfl")]
        sport: String,
    },
    /// Print today's featured selection, locking it if new
    Featured,
    /// Print the cumulative graded record
    Record,
    /// Grade pending featured locks against recent finals
    RefreshResults,
}
