use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelshelf")]
#[command(author, version, about = "Index local videos with their posters and serve them over HTTP")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "REELSHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the library and start the web server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory to scan; repeat for several (overrides config)
        #[arg(short, long = "dir", value_name = "DIR")]
        dirs: Vec<PathBuf>,
    },

    /// Scan the library and print a summary without serving
    Scan {
        /// Directory to scan; repeat for several (overrides config)
        #[arg(short, long = "dir", value_name = "DIR")]
        dirs: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (falls back to --config, then the default locations)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
