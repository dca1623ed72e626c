//! Config commands

use crate::config::Config;
use crate::output::OutputFormat;
use crate::ConfigCommands;

const KEYS: [&str; 2] = ["store_path", "default_format"];

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<(), String> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            set(&mut config, &key, value)?;
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            let value = get(&config, &key)?;
            println!("{}: {}", key, value.unwrap_or("(not set)"));
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            for key in KEYS {
                println!("{}: {}", key, get(&config, key)?.unwrap_or("(not set)"));
            }
        }
    }
    Ok(())
}

fn set(config: &mut Config, key: &str, value: String) -> Result<(), String> {
    match key {
        "store_path" => config.store_path = Some(value),
        "default_format" => {
            if OutputFormat::parse(&value).is_none() {
                return Err(format!("Unknown format: {} (expected table, json or yaml)", value));
            }
            config.default_format = Some(value);
        }
        _ => return Err(format!("Unknown config key: {}", key)),
    }
    Ok(())
}

fn get<'a>(config: &'a Config, key: &str) -> Result<Option<&'a str>, String> {
    match key {
        "store_path" => Ok(config.store_path.as_deref()),
        "default_format" => Ok(config.default_format.as_deref()),
        _ => Err(format!("Unknown config key: {}", key)),
    }
}
