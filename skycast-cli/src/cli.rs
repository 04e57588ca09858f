use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use skycast_core::{AladhanClient, Config, IpLocator, WttrClient};

use crate::controller::{Controller, LookupSource};

/// Cities offered by the quick picker, mirroring the quick-select buttons of
/// the original page.
const QUICK_CITIES: &[&str] = &[
    "Moscow", "Kazan", "Istanbul", "Mecca", "Dubai", "London", "Paris", "Tokyo",
];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather and prayer times in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather (and prayer times) for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,
    },

    /// Pick one of the quick cities interactively.
    Pick,

    /// Look up weather for wherever this machine appears to be.
    Locate,

    /// Edit and save the configuration interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        // No subcommand behaves like the original page load: show the
        // default city.
        match self.command.unwrap_or(Command::Show { city: None }) {
            Command::Show { city } => {
                let city = city.unwrap_or_else(|| config.default_city.clone());
                let city = city.trim();
                if city.is_empty() {
                    bail!("City name must not be empty");
                }
                let controller = build_controller(&config)?;
                controller
                    .on_weather_requested(LookupSource::City(city.to_string()))
                    .await;
                print!("{}", controller.view().await.render());
            }
            Command::Pick => {
                let city = inquire::Select::new("City:", QUICK_CITIES.to_vec()).prompt()?;
                let controller = build_controller(&config)?;
                controller
                    .on_weather_requested(LookupSource::City(city.to_string()))
                    .await;
                print!("{}", controller.view().await.render());
            }
            Command::Locate => {
                let locator = IpLocator::new(&config.geoip)?;
                let controller = build_controller(&config)?;
                controller.locate_and_fetch(&locator).await;
                print!("{}", controller.view().await.render());
            }
            Command::Configure => {
                configure(config)?;
            }
        }

        Ok(())
    }
}

fn build_controller(config: &Config) -> Result<Controller<WttrClient, AladhanClient>> {
    let weather = WttrClient::new(&config.weather_base_url)?;
    let prayer = AladhanClient::new(&config.prayer_base_url, config.calculation_method)?;
    Ok(Controller::new(weather, prayer))
}

fn configure(mut config: Config) -> Result<()> {
    config.default_city = inquire::Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()?;

    config.calculation_method = inquire::CustomType::<u8>::new("Prayer calculation method:")
        .with_default(config.calculation_method)
        .with_help_message("2 = Islamic Society of North America")
        .prompt()?;

    config.geoip.enabled = inquire::Confirm::new("Enable geo-IP location lookup?")
        .with_default(config.geoip.enabled)
        .prompt()?;

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());

    Ok(())
}
