use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::debug;
use weather_dash_core::{
    Config, Coordinates, FileStore, FixedLocation, Geolocator, IpGeolocator, KeyValueStore,
    Locale, MemoryStore, SearchHistory, WeatherController,
    storage::SEARCH_HISTORY_KEY,
};

use crate::{consent::ConsentGeolocator, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key and display language.
    Configure,

    /// Show weather for a city, or for the last city viewed.
    Show {
        /// City name, e.g. "Jakarta" or "London,GB".
        city: Option<String>,

        /// Don't read or write the saved city and search history.
        #[arg(long)]
        no_persist: bool,
    },

    /// Show weather for your current location.
    Here {
        /// Latitude to use instead of looking up the position.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude to use instead of looking up the position.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[arg(long)]
        no_persist: bool,
    },

    /// List recently searched cities.
    History,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        debug!(command = ?self.command, "running");

        match self.command {
            Command::Configure => configure(),
            Command::Show { city, no_persist } => show(city, no_persist).await,
            Command::Here { lat, lon, no_persist } => here(lat.zip(lon), no_persist).await,
            Command::History => history(),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut cfg = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key prompt was aborted")?;
    if api_key.trim().is_empty() {
        bail!("API key cannot be empty.");
    }

    let start = Locale::all().iter().position(|l| *l == cfg.display.locale).unwrap_or(0);
    let locale = Select::new("Display language:", Locale::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Language prompt was aborted")?;

    cfg.api_key = Some(api_key.trim().to_string());
    cfg.display.locale = locale;
    cfg.save_to(&path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(city: Option<String>, no_persist: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let geolocator = Box::new(IpGeolocator::from_config(&config));
    let mut controller = WeatherController::from_config(&config, geolocator, store(no_persist)?)?;

    match city {
        Some(city) => {
            controller.restore_history();
            controller.fetch_current_and_forecast(&city).await;
        }
        None => {
            if controller.saved_city().is_none() {
                bail!(
                    "No city given and no previous city saved.\n\
                     Hint: run `weather-dash show <CITY>`."
                );
            }
            controller.load().await;
        }
    }

    print_result(&controller)
}

async fn here(coords: Option<(f64, f64)>, no_persist: bool) -> anyhow::Result<()> {
    let config = Config::load()?;

    let fixed = coords.map(|(lat, lon)| Coordinates::new(lat, lon)).or(config.location);
    let geolocator: Box<dyn Geolocator> = match fixed {
        Some(coords) => Box::new(FixedLocation(coords)),
        None => Box::new(ConsentGeolocator::new(IpGeolocator::from_config(&config))),
    };

    let mut controller = WeatherController::from_config(&config, geolocator, store(no_persist)?)?;
    controller.restore_history();
    controller.fetch_by_geolocation().await;

    print_result(&controller)
}

fn history() -> anyhow::Result<()> {
    let store = FileStore::in_data_dir()?;
    let history: SearchHistory = match store.get(SEARCH_HISTORY_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("Saved history in {} is unreadable", store.path().display()))?,
        None => SearchHistory::default(),
    };

    if history.is_empty() {
        println!("No cities searched yet.");
    }
    for (i, city) in history.as_slice().iter().enumerate() {
        println!("{}. {city}", i + 1);
    }
    Ok(())
}

fn store(no_persist: bool) -> anyhow::Result<Box<dyn KeyValueStore>> {
    if no_persist {
        return Ok(Box::new(MemoryStore::new()));
    }
    Ok(Box::new(FileStore::in_data_dir()?))
}

fn print_result(controller: &WeatherController) -> anyhow::Result<()> {
    let view = controller.view();
    print!("{}", render::dashboard(&view, &view.daily_forecast()));

    if let Some(err) = &controller.state().error {
        bail!("{err}");
    }
    Ok(())
}
