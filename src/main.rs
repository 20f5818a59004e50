mod cli;

use reelshelf::{config, scanner::Scanner, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    dirs: Vec<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // CLI flags win over the config file
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::override_directories(&mut config, dirs);
    config::validate_config(&config)?;

    tracing::info!("Starting Reelshelf");

    if config.library.directories.is_empty() {
        tracing::warn!("No library directories configured; the library will be empty");
    }

    // The scan walks the filesystem synchronously; keep it off the runtime threads
    let library_config = config.library.clone();
    let library = tokio::task::spawn_blocking(move || {
        Scanner::from_config(&library_config).scan(&library_config.directories)
    })
    .await?;

    library.summary().log();

    server::start_server(config, library).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelshelf=trace,reelshelf_common=trace,tower_http=debug".to_string()
        } else {
            "reelshelf=debug,reelshelf_common=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port, dirs } => {
            // Create tokio runtime
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, dirs, cli.config.as_deref()))
        }
        Commands::Scan { dirs, json } => scan(dirs, json, cli.config.as_deref()),
        Commands::Validate { file } => {
            let path = config::find_config(file.or(cli.config).as_deref());
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelshelf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn scan(dirs: Vec<PathBuf>, json: bool, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    config::override_directories(&mut config, dirs);
    config::validate_config(&config)?;

    if config.library.directories.is_empty() {
        anyhow::bail!("No directories to scan. Pass --dir or set library.directories in the config");
    }

    let library = Scanner::from_config(&config.library).scan(&config.library.directories);
    let summary = library.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Directories: {}", config.library.directories.len());
            for dir in &config.library.directories {
                let marker = if dir.exists() { " " } else { "!" };
                println!("   {} {}", marker, dir.display());
            }
            println!(
                "  Video extensions: {}",
                config.library.video_extensions.join(", ")
            );
            println!(
                "  Image extensions: {}",
                config.library.image_extensions.join(", ")
            );
        }
        None => {
            println!("No config file found, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}
