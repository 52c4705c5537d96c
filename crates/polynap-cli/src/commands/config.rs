//! Configuration commands.
//!
//! Keys are dot paths into `config.toml`, e.g. `display.language` or
//! `catalog.path`. Reads never create the file; `set` and `reset` do.

use clap::Subcommand;
use polynap_core::config::config_path;
use polynap_core::{Config, ConfigError, CoreError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value (e.g. "display.language", "logging.level")
    Get { key: String },
    /// Change one value and save; the value must match the key's type
    Set { key: String, value: String },
    /// Print the effective configuration
    List {
        /// Print TOML as stored on disk instead of JSON
        #[arg(long)]
        toml: bool,
    },
    /// Print where the configuration file lives
    Path,
    /// Overwrite the configuration file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path();

    match action {
        ConfigAction::Get { key } => {
            let config = Config::read_or_default(&path)?;
            let value = config
                .get(&key)
                .ok_or_else(|| CoreError::from(ConfigError::UnknownKey(key)))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            tracing::info!(%key, %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List { toml } => {
            let config = Config::read_or_default(&path)?;
            if toml {
                print!("{}", config.to_toml_string()?);
            } else {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults ({})", path.display());
        }
    }
    Ok(())
}
