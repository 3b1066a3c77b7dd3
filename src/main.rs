// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use auth::{Clock, SystemClock};
use catalog::CatalogController;
use clap::Parser;
use config::Config;
use movie_catalog::state::AppState;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "movie-catalog", about = "Server-rendered movie catalog")]
struct Args {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        log::warn!(
            "no configuration at {}, using defaults",
            args.config.display()
        );
        Config::default()
    };

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    fs::create_dir_all(&config.uploads.uploads_dir)?;
    fs::create_dir_all(&config.uploads.profiles_dir)?;

    let mut catalog = CatalogController::with_path(&config.database.path)?;
    catalog.init_schema()?;

    if config.database.seed_admin && catalog.seed_dev_admin(SystemClock.now())? {
        log::info!(
            "seeded development admin {} / {}",
            catalog::setup::ADMIN_EMAIL,
            catalog::setup::ADMIN_PASSWORD
        );
    }
    drop(catalog);

    let bind = config.server.bind.clone();
    let state = AppState::new(config);
    let app = movie_catalog::app(state);

    log::info!("listening on http://{}", bind);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
