//! Travel Buddy server and command-line client

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use travelbuddy::client::view::render_place_list;
use travelbuddy::models::Role;
use travelbuddy::{
    ApiClient, AppState, Category, ChatPanel, Coordinates, DiscoverySession, GeminiClient,
    TravelApi, TravelBuddyConfig, TravelBuddyError, TravelGateway, logging, storage, web,
};

#[derive(Parser, Debug)]
#[command(name = "travelbuddy", version, about = "AI-powered place discovery")]
struct Cli {
    /// Configuration file (defaults to the user config dir, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Find places near a location
    Places {
        #[arg(long, conflicts_with = "coords", required_unless_present = "coords")]
        location: Option<String>,
        /// "lat,lng" of the current position
        #[arg(long)]
        coords: Option<String>,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        query: Option<String>,
        /// Talk to a running server instead of calling the AI provider directly
        #[arg(long, env = "TRAVELBUDDY_SERVER")]
        server: Option<String>,
    },
    /// Chat with Travel Buddy
    Chat {
        #[arg(long)]
        location: Option<String>,
        #[arg(long, env = "TRAVELBUDDY_SERVER")]
        server: Option<String>,
    },
    /// Describe a named place
    Location {
        name: String,
        #[arg(long, env = "TRAVELBUDDY_SERVER")]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::debug!("{:?}", e);
        match e.downcast_ref::<TravelBuddyError>() {
            Some(err) => eprintln!("Error: {}", err.user_message()),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = TravelBuddyConfig::load_from_path(cli.config)?;
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Places {
            location,
            coords,
            category,
            query,
            server,
        } => {
            let api = backend(&config, server.as_deref())?;
            let mut session = DiscoverySession::new();
            if let Some(coords) = coords {
                session.set_detected_location(Coordinates::parse(&coords)?);
            } else if !session.set_manual_location(location.as_deref().unwrap_or_default()) {
                anyhow::bail!("Location is required");
            }
            session.select_category(category);
            session.set_search_query(query.as_deref().unwrap_or_default());

            let places = session.places(api.as_ref()).await?.unwrap_or_default();
            let location = session.location().unwrap_or_default();
            print!("{}", render_place_list(category, location, &places));
            Ok(())
        }
        Commands::Chat { location, server } => {
            let api = backend(&config, server.as_deref())?;
            chat_loop(api.as_ref(), location.as_deref()).await
        }
        Commands::Location { name, server } => {
            let api = backend(&config, server.as_deref())?;
            let info = api.location_info(&name).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
    }
}

fn gateway(config: &TravelBuddyConfig) -> Result<TravelGateway> {
    let model = GeminiClient::new(&config.ai)?;
    Ok(TravelGateway::new(Arc::new(model), &config.ai))
}

/// A running server when `--server` is given, otherwise the gateway in-process
fn backend(config: &TravelBuddyConfig, server: Option<&str>) -> Result<Box<dyn TravelApi>> {
    match server {
        Some(url) => Ok(Box::new(ApiClient::new(url)?)),
        None => Ok(Box::new(gateway(config)?)),
    }
}

async fn serve(config: TravelBuddyConfig) -> Result<()> {
    let gateway = gateway(&config)?;
    let users = storage::open(config.database.url.as_deref()).await?;
    info!(
        provider = gateway.provider_name(),
        model = %config.ai.model,
        users = users.backend_name(),
        "Starting Travel Buddy on {}",
        config.bind_addr()
    );

    web::run(AppState::new(gateway, users), &config.server).await
}

async fn chat_loop(api: &dyn TravelApi, location: Option<&str>) -> Result<()> {
    let mut panel = ChatPanel::new();
    panel.open();
    if let Some(greeting) = panel.messages().first() {
        println!("🐨 {}\n", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await.with_context(|| "Failed to read input")? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        if panel.send(api, &line, location).await {
            if let Some(reply) = panel.messages().last().filter(|m| m.role == Role::Assistant) {
                println!("🐨 {}\n", reply.text);
            }
        }
    }

    panel.close();
    Ok(())
}
