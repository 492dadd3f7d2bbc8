//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "source.min_suggest_characters")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => {
            print!("{}", render_config(&config));
        }

        (Some(key), None) => {
            let value = config.get(key).ok_or_else(|| unknown_key(key))?;
            println!("{}", value);
        }

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            if key == "geocoder.api_key" {
                println!("{} = ***", key);
            } else {
                println!("{} = {}", key, value);
            }
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

fn unknown_key(key: &str) -> Error {
    Error::Config(format!(
        "Unknown config key: {}\n\nAvailable keys:\n  {}",
        key,
        Config::available_keys().join("\n  ")
    ))
}

/// Render all configuration values, masking the API key
fn render_config(config: &Config) -> String {
    let api_key = if config.geocoder.api_key.is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    };

    format!(
        "[geocoder]\n\
         endpoint = \"{}\"\n\
         api_key = {}\n\
         \n\
         [source]\n\
         placeholder = \"{}\"\n\
         suggestions_enabled = {}\n\
         min_suggest_characters = {}\n\
         \n\
         [view]\n\
         lat = {}\n\
         lng = {}\n\
         \n\
         [server]\n\
         host = \"{}\"\n\
         port = {}\n",
        config.geocoder.endpoint,
        api_key,
        config.source.placeholder,
        config.source.suggestions_enabled,
        config.source.min_suggest_characters,
        config.view.lat,
        config.view.lng,
        config.server.host,
        config.server.port,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_api_key() {
        let mut config = Config::default();
        assert!(render_config(&config).contains("api_key = \"\" # not configured"));

        config.geocoder.api_key = "secret-key".to_string();
        let rendered = render_config(&config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("api_key = \"***\""));
    }

    #[test]
    fn test_render_is_valid_toml() {
        let rendered = render_config(&Config::default());
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.server.port, 7878);
        assert_eq!(parsed.source.placeholder, "example: W10");
    }

    #[test]
    fn test_unknown_key_lists_keys() {
        let message = unknown_key("nope").to_string();
        assert!(message.contains("source.placeholder"));
    }
}
