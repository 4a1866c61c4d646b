use crate::pokedex::session;
use crate::pokedex::Session;

use serde::{Deserialize, Serialize};
use std::env;
use std::io;
use std::path::PathBuf;
use tokio::fs;

/// User settings, read from `config.ron` in the platform config directory.
///
/// Every field is optional in the file. `TEAMDEX_API_URL` and
/// `TEAMDEX_DATA_DIR` override the file when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub retries: usize,
    pub data_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

impl Config {
    pub async fn load() -> Self {
        let path = path();

        let config = match fs::read_to_string(&path).await {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|error| {
                log::warn!("Ignoring invalid config at {}: {error}", path.display());

                Self::default()
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(error) => {
                log::warn!("Config at {} could not be read: {error}", path.display());

                Self::default()
            }
        };

        config.overridden(|key| env::var(key).ok())
    }

    pub fn parse(contents: &str) -> Result<Self, anywho::Error> {
        Ok(ron::from_str(contents)?)
    }

    fn overridden(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(api_url) = var("TEAMDEX_API_URL") {
            self.api_url = api_url;
        }

        if let Some(data_dir) = var("TEAMDEX_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(data_dir));
        }

        self
    }

    /// Opens a catalog session on `api_url`, or on the default service if
    /// that URL is unusable.
    pub fn session(&self) -> Result<Session, pokedex::Error> {
        let session = Session::new(&self.api_url).or_else(|error| {
            log::warn!("Ignoring configured API URL: {error}");

            Session::new(session::DEFAULT_URL)
        })?;

        Ok(session.retries(self.retries))
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(data_dir)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| self.data_dir())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: session::DEFAULT_URL.to_owned(),
            retries: session::DEFAULT_RETRIES,
            data_dir: None,
            export_dir: None,
        }
    }
}

fn path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
        .join("config.ron")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = Config::parse("(retries: 5)").expect("valid config");

        assert_eq!(config.retries, 5);
        assert_eq!(config.api_url, session::DEFAULT_URL);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn parses_every_field() {
        let config = Config::parse(
            r#"(
                api_url: "http://localhost:8000/pokemon/",
                retries: 0,
                data_dir: Some("/tmp/teamdex"),
                export_dir: Some("/tmp/exports"),
            )"#,
        )
        .expect("valid config");

        assert_eq!(config.api_url, "http://localhost:8000/pokemon/");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/teamdex"));
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Config::parse("(retries: \"many\")").is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let config = Config::default().overridden(|key| match key {
            "TEAMDEX_API_URL" => Some("http://127.0.0.1:1/".to_owned()),
            "TEAMDEX_DATA_DIR" => Some("/var/lib/teamdex".to_owned()),
            _ => None,
        });

        assert_eq!(config.api_url, "http://127.0.0.1:1/");
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/teamdex"));
        assert_eq!(config.retries, session::DEFAULT_RETRIES);
    }

    #[test]
    fn invalid_api_url_falls_back_to_default() {
        let config = Config::default().overridden(|key| match key {
            "TEAMDEX_API_URL" => Some("pokeapi.co/api/v2/pokemon/".to_owned()),
            _ => None,
        });

        let catalog = config.session().expect("default session");

        assert_eq!(catalog.base(), session::DEFAULT_URL);
    }

    #[test]
    fn valid_api_url_is_kept() {
        let config = Config {
            api_url: "http://localhost:8000/pokemon/".to_owned(),
            ..Config::default()
        };

        let catalog = config.session().expect("configured session");

        assert_eq!(catalog.base(), "http://localhost:8000/pokemon/");
    }
}
