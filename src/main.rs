//! Toolbridge - Main Entry Point
//!
//! Thin CLI around the tool engine: load the JSON tool configuration,
//! build the in-process registry, then list, describe, or invoke tools.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use toolbridge::config::ToolsConfig;
use toolbridge::engine::ToolEngine;
use toolbridge::host::ToolRegistry;
use toolbridge::observability::init_default_logging;
use tracing::{error, info};

/// Config-declared HTTP tools for agent-protocol hosts
#[derive(Parser)]
#[command(name = "toolbridge")]
#[command(about = "Config-declared HTTP tools for agent-protocol hosts")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered tools
    List,
    /// Invoke one tool with JSON arguments and print its result
    Call {
        /// Tool name
        tool: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List => list_tools(&config),
        Commands::Call { tool, args } => call_tool(&config, &tool, &args).await,
        Commands::Config { show } => handle_config_command(&config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(config_path: &Option<PathBuf>) -> Result<ToolsConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(ToolsConfig::load_from_file(path)?)
        }
        None => {
            // Try default locations
            let default_paths = ["tools.json", "config/tools.json"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(ToolsConfig::load_from_file(&path)?);
                }
            }

            error!("No configuration file found. Provide one with -c/--config or create tools.json");
            process::exit(1);
        }
    }
}

fn build_registry(config: &ToolsConfig) -> ToolRegistry {
    ToolRegistry::from_config(config, Arc::new(ToolEngine::new()))
}

fn list_tools(config: &ToolsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = build_registry(config);
    for registration in registry.list() {
        println!("{}\t{}", registration.name, registration.description);
    }
    Ok(())
}

async fn call_tool(
    config: &ToolsConfig,
    tool: &str,
    args: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let args: serde_json::Map<String, serde_json::Value> = serde_json::from_str(args)?;
    let registry = build_registry(config);

    let text = registry.call(tool, args).await?;
    println!("{text}");
    Ok(())
}

fn handle_config_command(config: &ToolsConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Configuration valid: {} v{}, {} tools",
        config.server_name,
        config.server_version,
        config.tools.len()
    );
    if show {
        println!("{}", serde_json::to_string_pretty(config)?);
    }
    Ok(())
}
