//! CLI Configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const STORE_FILE: &str = "forms.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub store_path: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, String> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf, String> {
        let path = Self::config_path(profile)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, content).map_err(|e| e.to_string())?;
        Ok(path)
    }

    /// Store file: explicit path, then config, then `~/.formcraft/forms.json`
    pub fn resolve_store_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf, String> {
        if let Some(path) = explicit {
            return Ok(path);
        }
        if let Some(path) = &self.store_path {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::base_dir()?.join(STORE_FILE))
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, String> {
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(Self::base_dir()?.join(filename))
    }

    fn base_dir() -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        Ok(home.join(".formcraft"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path_precedence() {
        let config = Config { store_path: Some("/tmp/from-config.json".into()), default_format: None };
        assert_eq!(
            config.resolve_store_path(Some(PathBuf::from("/tmp/flag.json"))).unwrap(),
            PathBuf::from("/tmp/flag.json")
        );
        assert_eq!(config.resolve_store_path(None).unwrap(), PathBuf::from("/tmp/from-config.json"));
    }

    #[test]
    fn test_toml_shape() {
        let config: Config = toml::from_str("store_path = \"forms.json\"\ndefault_format = \"yaml\"\n").unwrap();
        assert_eq!(config.store_path.as_deref(), Some("forms.json"));
        assert_eq!(config.default_format.as_deref(), Some("yaml"));
    }
}
