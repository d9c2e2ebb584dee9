//! Command-line interface: argument parsing and command output.

use crate::app::dto::{ChainRequest, DependenciesRequest};
use crate::app::engine::DependencyEngine;
use crate::config::AppConfig;
use crate::server::{http, mcp::DepchainMcpServer};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolve dependency chains from a binding dependency map.
#[derive(Parser, Debug)]
#[command(name = "depchain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Inverse dependency map (JSON object of path -> dependent paths)
    pub map: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the dependency chain of one or more property paths
    Chain {
        #[arg(required = true)]
        paths: Vec<String>,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show direct and inverse dependencies of an entity
    Deps {
        entity: Option<String>,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// List dependency cycles
    Cycles {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print a summary of the loaded map
    Stats,
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Serve MCP tools over stdio
    Mcp,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        let engine = DependencyEngine::load_from_json(&self.map, &config)?;

        match self.command {
            Commands::Chain { paths, json } => display_chain(&engine, paths, json),
            Commands::Deps { entity, json } => display_entity_dependencies(&engine, entity, json),
            Commands::Cycles { limit } => display_cycles(&engine, limit),
            Commands::Stats => display_summary(&engine),
            Commands::Serve { host, port } => {
                if let Some(host) = host {
                    config.http.host = host;
                }
                if let Some(port) = port {
                    config.http.port = port;
                }
                http::serve(engine, config.http.socket_addr()?).await
            }
            Commands::Mcp => DepchainMcpServer::new(engine).serve_stdio().await,
        }
    }
}

pub fn display_summary(engine: &DependencyEngine) -> Result<()> {
    let health = engine.health()?;
    println!("Dependency Map Summary:");
    println!("  Source: {}", health.map_path);
    println!("  Paths:  {}", health.path_count);
    println!("  Edges:  {}", health.edge_count);
    println!("  Cycles: {}", health.cycle_count);
    Ok(())
}

pub fn display_chain(engine: &DependencyEngine, paths: Vec<String>, json: bool) -> Result<()> {
    let result = engine.chain(ChainRequest { paths })?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Dependency chain for: {}", result.paths.join(", "));
    println!("{}", "=".repeat(60));
    if result.chain.is_empty() {
        println!("  (no dependents)");
    }
    for (i, path) in result.chain.iter().enumerate() {
        println!("{:>4}. {}", i + 1, path);
    }
    println!("\n  Total: {} path(s)", result.length);
    Ok(())
}

pub fn display_entity_dependencies(
    engine: &DependencyEngine,
    entity: Option<String>,
    json: bool,
) -> Result<()> {
    let result = engine.dependencies(DependenciesRequest { entity })?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let Some(deps) = result.dependencies else {
        println!("No entity given.");
        return Ok(());
    };
    let entity = result.entity.unwrap_or_default();

    println!("Entity: {}", entity);
    println!("{}", "=".repeat(60));
    print_entity_list("Direct dependencies", &deps.direct_dependencies);
    print_entity_list("Inverse dependencies", &deps.inverse_dependencies);
    Ok(())
}

fn print_entity_list(title: &str, entities: &[String]) {
    println!("\n  {} ({}):", title, entities.len());
    for entity in entities {
        println!("    - {}", entity);
    }
}

pub fn display_cycles(engine: &DependencyEngine, limit: Option<usize>) -> Result<()> {
    let result = engine.cycles(limit)?;
    println!("Found {} dependency cycle(s)", result.total);
    if result.cycles.len() < result.total {
        println!("Showing first {}:", result.cycles.len());
    }
    for (i, cycle) in result.cycles.iter().enumerate() {
        println!("\n{}. {} path(s)", i + 1, cycle.len());
        for path in cycle {
            println!("   {}", path);
        }
    }
    Ok(())
}
