use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tft_dash::api::state::AppState;
use tft_dash::api::{build_router, cors_layer};
use tft_dash::catalog::Catalog;
use tft_dash::config::AppConfig;
use tft_dash::history::{MatchHistory, MatchQuery};
use tft_dash::resolve::RegionCache;
use tft_dash::riot::{RiotApi, RiotClient};
use tft_dash::team_code::{encode_team, MAX_UNITS};

#[derive(Parser)]
#[command(name = "tft-dash")]
#[command(about = "Teamfight Tactics match history dashboard and team-code builder")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Catalog directory (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web dashboard
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a player's recent matches
    Search {
        /// Riot ID game name
        #[arg(long)]
        name: String,

        /// Riot ID tag line
        #[arg(long)]
        tag: String,

        /// Number of matches to fetch, 1-100
        #[arg(long)]
        count: Option<u32>,

        /// Arena matches only
        #[arg(long)]
        arena: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode unit names into a team code
    Encode {
        /// Unit display names, at most 10 are used
        units: Vec<String>,
    },

    /// List the unit catalog by cost
    Units,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let log_level = cli.log_level.unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting tft-dash v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::load(&config.data_dir)
        .with_context(|| format!("loading catalog from {}", config.data_dir.display()))?;

    match cli.command {
        Commands::Serve { host, port } => {
            let riot = riot_client(&config)?;
            let region_cache = config.riot.cache_regions.then(|| Arc::new(RegionCache::new()));

            let state = AppState {
                catalog: Arc::new(catalog),
                riot,
                region_cache,
                match_count: config.riot.match_count,
                static_dir: config.static_dir.clone(),
            };
            let app = build_router(state).layer(cors_layer(&config.server.cors_origin));

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Search {
            name,
            tag,
            count,
            arena,
            json,
        } => {
            let riot = riot_client(&config)?;
            let count = count.unwrap_or(config.riot.match_count);
            let query = if arena {
                MatchQuery::arena(count)
            } else {
                MatchQuery::tft(count)
            };

            let outcome = MatchHistory::new(riot.as_ref(), &catalog)
                .search(&name, &tag, query)
                .await?;

            if outcome.matches.is_empty() {
                eprintln!("No recent matches found.");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{} ({})", outcome.riot_id, outcome.region.code);
                for record in &outcome.matches {
                    println!("\n{}", record);
                }
            }
        }
        Commands::Encode { units } => {
            for name in units.iter().take(MAX_UNITS) {
                if catalog.unit(name).is_none() {
                    tracing::warn!("Unknown unit {:?} left out of the code", name);
                }
            }
            if units.len() > MAX_UNITS {
                tracing::warn!("Only the first {} units are encoded", MAX_UNITS);
            }
            println!("{}", encode_team(&catalog, &units));
        }
        Commands::Units => {
            for (cost, names) in catalog.units_by_cost() {
                println!("{}-Cost: {}", cost, names.join(", "));
            }
        }
    }

    Ok(())
}

fn riot_client(config: &AppConfig) -> Result<Arc<dyn RiotApi>> {
    let api_key = config.riot.api_key()?;
    let client = RiotClient::new(&config.riot, &api_key)?;
    Ok(Arc::new(client))
}
