use crate::models::PageSize;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub api_url: Url,
    pub page_size: PageSize,
    pub request_timeout_secs: u64,
    pub slot_timeout_secs: u64,
    pub max_retries: u32,
    pub render_partial: bool,
}

impl Settings {
    /// Defaults, then `config_file` if it exists, then `COMICS_*` variables.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api_url", "https://xkcd.now.sh/")?
            .set_default("page_size", 3)?
            .set_default("request_timeout_secs", 10)?
            .set_default("slot_timeout_secs", 30)?
            .set_default("max_retries", 3)?
            .set_default("render_partial", true)?
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(Environment::with_prefix("COMICS"))
            .build()?;
        builder.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn slot_timeout(&self) -> Duration {
        Duration::from_secs(self.slot_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config() {
        let c = Settings::new("comics.test.json").unwrap();

        assert_eq!("http://localhost:8080/api", c.api_url.as_str());
        assert_eq!(PageSize::Five, c.page_size);
        assert_eq!(Duration::from_secs(2), c.request_timeout());
        assert!(!c.render_partial);
        // not in the file
        assert_eq!(30, c.slot_timeout_secs);
        assert_eq!(3, c.max_retries);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let c = Settings::new("does-not-exist").unwrap();

        assert_eq!("https://xkcd.now.sh/", c.api_url.as_str());
        assert_eq!(PageSize::Three, c.page_size);
        assert!(c.render_partial);
    }
}
