mod config;
mod session;
mod grid;
mod render;
mod display;
mod export;
mod web;

use std::fs::File;

use log::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{grid_from_env, AppConfig};
use session::load_sessions;
use display::{print_week, write_html_to_file};
use export::export_sessions_to_csv;

const USAGE: &str = "usage: timetable-grid <sessions.json> [output.html]\n       timetable-grid web [port]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Check if we should run in web mode
    if args.len() > 1 && args[1] == "web" {
        let mut config = AppConfig::from_env()?;
        if let Some(port) = args.get(2).and_then(|p| p.parse::<u16>().ok()) {
            config.port = port;
        }
        let sessions = match &config.sessions_path {
            Some(path) => load_sessions(path)?,
            None => {
                warn!("SESSIONS_PATH is not set, starting with an empty timetable");
                Vec::new()
            }
        };

        info!("Starting web server on port {}", config.port);
        web::start_server(config, sessions).await?;
        return Ok(());
    }

    // CLI mode
    let Some(input) = args.get(1) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let html_path = args.get(2).map(String::as_str).unwrap_or("timetable.html");

    let grid = grid_from_env()?;
    let sessions = load_sessions(input)?;
    print_week(&sessions, &grid)?;

    write_html_to_file("Weekly Timetable", &sessions, &grid, html_path)?;
    export_sessions_to_csv(&sessions, &grid, File::create("timetable.csv")?)?;

    println!("\nTimetable saved to:");
    println!("  - {}", html_path);
    println!("  - timetable.csv");

    Ok(())
}
