//! Loads additional services from a TOML file.
//!
//! ```toml
//! [services.safebooru_org]
//! name = "Safebooru.org"
//! api_type = "gelbooru"
//! endpoint = "https://safebooru.org"
//!
//! [services.my_moebooru]
//! name = "My Moebooru"
//! api_type = "danbooru_legacy"
//! endpoint = "https://booru.example.com"
//! username = "me"
//! password = "secret"
//! ```
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use super::{ApiType, Settings};
use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    services: HashMap<String, Service>,
}

#[derive(Debug, Deserialize)]
struct Service {
    name: String,
    api_type: String,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
}

/// Parses a service list, keyed by service id.
pub fn read_services_toml(contents: &str) -> Result<HashMap<String, Settings>, ConfigError> {
    let config: Config = toml::from_str(contents)?;

    let mut smap = HashMap::with_capacity(config.services.len());

    for (id, data) in config.services {
        let api_type = ApiType::from_str(&data.api_type)?;

        let mut settings = Settings::new(api_type, &data.name, &data.endpoint);
        settings.username = data.username;
        settings.password = data.password;

        smap.insert(id, settings);
    }

    debug!("Configured services: {:?}", smap.keys());

    Ok(smap)
}

pub fn read_services_file(path: &Path) -> Result<HashMap<String, Settings>, ConfigError> {
    let contents = read_to_string(path)?;
    read_services_toml(&contents)
}

#[cfg(test)]
mod test {
    use super::read_services_toml;
    use crate::client_config::ApiType;
    use crate::error::ConfigError;

    const SAMPLE: &str = r#"
[services.safebooru_org]
name = "Safebooru.org"
api_type = "gelbooru"
endpoint = "https://safebooru.org/"

[services.my_moebooru]
name = "My Moebooru"
api_type = "danbooru_legacy"
endpoint = "https://booru.example.com"
username = "me"
password = "secret"
"#;

    #[test]
    fn read_sample() {
        let services = read_services_toml(SAMPLE).unwrap();

        assert_eq!(services.len(), 2);

        let sb = &services["safebooru_org"];
        assert_eq!(sb.api_type, ApiType::Gelbooru);
        assert_eq!(sb.endpoint, "https://safebooru.org");
        assert_eq!(sb.username, None);

        let moe = &services["my_moebooru"];
        assert_eq!(moe.api_type, ApiType::DanbooruLegacy);
        assert_eq!(moe.credentials(), Some(("me", "secret")));
    }

    #[test]
    fn unknown_api_type() {
        let err = read_services_toml(
            "[services.x]\nname = \"X\"\napi_type = \"pixiv\"\nendpoint = \"https://x.org\"\n",
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownApiType { name } if name == "pixiv"));
    }

    #[test]
    fn malformed_toml() {
        assert!(matches!(
            read_services_toml("[services.x\n"),
            Err(ConfigError::TomlDecodeFail { .. })
        ));
    }

    #[test]
    fn empty_file() {
        assert!(read_services_toml("").unwrap().is_empty());
    }
}
