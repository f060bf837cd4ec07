//! Kopiatan board generator CLI.
//!
//! Builds a standard board from a preset and writes the graph as JSON to
//! stdout. Logs go to stderr.

use anyhow::Context;
use catan_board::{generate_board, preset_definition, BoardGraph, LayoutParams};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::CliConfig;

fn build_board(config: &CliConfig) -> anyhow::Result<BoardGraph> {
    let preset = preset_definition(&config.preset, config.seed.as_deref())
        .with_context(|| format!("Failed to build preset {}", config.preset))?;

    let params = LayoutParams {
        hex_size: config.hex_size,
        ..preset.layout_params()
    };

    let graph = generate_board(&params);
    Ok(if config.ports {
        graph.with_standard_ports()
    } else {
        graph
    })
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::from_env()?;

    info!(preset = %config.preset, "Generating board...");

    let graph = build_board(&config)?;

    info!(
        hexes = graph.hexes.len(),
        vertices = graph.vertices.len(),
        edges = graph.edges.len(),
        ports = graph.ports.len(),
        "Board ready"
    );

    let json = if config.pretty {
        serde_json::to_string_pretty(&graph)?
    } else {
        serde_json::to_string(&graph)?
    };
    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_board() {
        let graph = build_board(&CliConfig::default()).unwrap();
        assert_eq!(graph.hexes.len(), 19);
        assert_eq!(graph.ports.len(), 9);
    }

    #[test]
    fn test_build_without_ports_and_custom_size() {
        let config = CliConfig {
            ports: false,
            hex_size: 50.0,
            ..CliConfig::default()
        };
        let graph = build_board(&config).unwrap();
        assert!(graph.ports.is_empty());
        assert_eq!(graph.hex_size, 50.0);
    }

    #[test]
    fn test_random_preset_without_seed_fails() {
        let config = CliConfig {
            preset: "random-balanced".to_string(),
            ..CliConfig::default()
        };
        let err = build_board(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("seed is required"));
    }
}
