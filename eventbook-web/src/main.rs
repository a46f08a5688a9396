//! Eventbook Web Server
//!
//! Bearer-token event-booking API.

use clap::Parser;
use eventbook_web::server::EventbookServerBuilder;
use eventbook_web::init_logging;

/// Eventbook Web Server - event booking with bearer-token auth
#[derive(Parser)]
#[command(name = "eventbook-web")]
#[command(about = "HTTP API for the Eventbook service")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Database URL (in-memory store when omitted)
    #[arg(long)]
    database_url: Option<String>,

    /// Token lifetime in minutes
    #[arg(long)]
    token_ttl_minutes: Option<i64>,
}

#[tokio::main]
async fn main() {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging();

    let mut builder = EventbookServerBuilder::new()
        .host(args.host)
        .port(args.port);

    if args.database_url.is_some() {
        builder = builder.database_url(args.database_url);
    }
    if let Some(minutes) = args.token_ttl_minutes {
        builder = builder.token_ttl_minutes(minutes);
    }

    let server = match builder.build().await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
