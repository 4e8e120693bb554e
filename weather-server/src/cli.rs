use anyhow::Context;
use clap::{Parser, Subcommand};
use weather_core::Config;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather proxy server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address, overrides the config file, e.g. "0.0.0.0:5001".
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the OpenWeather API key and listen address in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let mut config = Config::load()?;
                if let Some(bind) = bind {
                    config.bind = Some(bind);
                }
                weather_server::serve(&config).await
            }
            Command::Configure => configure(),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let bind = inquire::Text::new("Listen address:")
        .with_default(config.bind())
        .prompt()
        .context("Failed to read listen address")?;

    config.set_api_key(api_key.trim().to_string());
    config.bind = Some(bind);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
