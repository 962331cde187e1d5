mod api;
mod app;
mod config;
mod error;
mod events;
mod logger;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::{crate_description, crate_version, App as Cli, Arg};
use config::Config;
use log::*;
use logger::{CustomLogger, LogBuffer};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("tasklist")
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory containing config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("url")
                .short("u")
                .long("url")
                .value_name("URL")
                .help("Base URL of the list and task API (saved to the config)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("token")
                .short("t")
                .long("token")
                .value_name("TOKEN")
                .help("Access token sent as a bearer credential (saved to the config)")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    config.apply_overrides(matches.value_of("url"), matches.value_of("token"))?;

    let log_buffer = LogBuffer::new();
    CustomLogger::init(log_buffer.clone(), config.log_level_filter()?)?;
    debug!("Loaded configuration: base URL {:?}", config.base_url);

    App::start(config, log_buffer).await
}
