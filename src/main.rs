//! view-router CLI
//!
//! Inspects the application's route table and resolves locations against it.
//!
//! ```text
//!   location ──▶ Router (first match) ──▶ matched chain ──▶ lazy loaders ──▶ views
//!                  ▲
//!   routes.toml ───┘ (optional, built-in table otherwise)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use view_router::config::{build_router, load_config, RouterConfig};
use view_router::navigation::{NavigationError, Navigator, ResolvedRoute};
use view_router::observability::logging;
use view_router::routing::Router;
use view_router::view::ViewRegistry;

#[derive(Parser)]
#[command(name = "view-router")]
#[command(about = "Inspect and exercise the client-side route table", long_about = None)]
struct Cli {
    /// Route configuration file (TOML). Uses the built-in table when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in matching order
    Routes,
    /// Navigate to each location in turn and print the loaded views
    Resolve {
        #[arg(required = true)]
        locations: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate the configuration and exit
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!(
        config = ?cli.config,
        base = %config.navigation.base,
        "view-router v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let router = Arc::new(build_router(&config, &ViewRegistry::builtin())?);

    match cli.command {
        Commands::Routes => print_routes(&router),
        Commands::Resolve { locations, json } => {
            let mut navigator = Navigator::new(router);
            for location in &locations {
                match navigator.push(location).await {
                    Ok(resolved) => print_resolved(&resolved, json)?,
                    Err(NavigationError::Duplicated(path)) => {
                        tracing::warn!(path = %path, "Skipping duplicate navigation");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Commands::Check => {
            println!(
                "configuration OK: {} routes, base '{}'",
                router.routes().len(),
                router.options().base
            );
        }
    }

    Ok(())
}

fn print_routes(router: &Router) {
    for route in router.routes() {
        let chain: Vec<_> = route.chain().iter().map(|r| r.component.key()).collect();
        match route.name() {
            Some(name) => println!("{:<24} {} ({})", route.path(), chain.join(" > "), name),
            None => println!("{:<24} {}", route.path(), chain.join(" > ")),
        }
    }
}

fn print_resolved(resolved: &ResolvedRoute, as_json: bool) -> Result<(), serde_json::Error> {
    if as_json {
        let value = json!({
            "navigation_id": resolved.id,
            "location": resolved.route.full_path,
            "route": resolved.route.route_path,
            "name": resolved.route.name,
            "params": resolved.route.params,
            "query": resolved.route.query,
            "hash": resolved.route.hash,
            "views": resolved.views.iter().map(|v| v.as_ref()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "{} -> {} [{}]",
            resolved.route.full_path,
            resolved.route.route_path,
            resolved.view_keys().join(" > ")
        );
    }
    Ok(())
}
