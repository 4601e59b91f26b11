#![cfg_attr(test, allow(unused_crate_dependencies))]

mod codegen;

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    time::Duration,
};

pub use codegen::{CodegenConfig, GeneratesConfig};
use url::Url;

/// Address the server binds to when nothing else is configured.
pub const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 4000);

/// Path of the GraphQL endpoint when nothing else is configured.
pub const DEFAULT_GRAPH_PATH: &str = "/graphql";

/// Endpoint the client talks to when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Settings shared by the server, the search client and codegen.
pub struct Config {
    /// Server bind settings
    pub network: NetworkConfig,
    /// Endpoint path, introspection and schema mode
    pub graph: GraphConfig,
    /// Where and how the search client sends its query
    pub client: ClientConfig,
    /// Schema export and type generation
    pub codegen: CodegenConfig,
}

impl Config {
    /// Reads the TOML file at `path`. A missing file is not an error and
    /// yields `None`.
    pub fn load(path: &Path) -> Result<Option<Config>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Some(config))
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub listen_address: Option<SocketAddr>,
}

impl NetworkConfig {
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address.unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub path: Option<String>,
    pub introspection: bool,
    /// How the server types the search filter.
    pub mode: SchemaMode,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: None,
            introspection: true,
            mode: SchemaMode::default(),
        }
    }
}

impl GraphConfig {
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_GRAPH_PATH)
    }
}

/// Whether `SearchFilterInput` is declared with `@oneOf`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// One-of input object. Zero or several fields fail validation.
    #[default]
    Strict,
    /// Ordinary input object with three optional fields, the shape left after
    /// the directive is lost. The resolver falls back to field precedence.
    Lenient,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// GraphQL endpoint of the server.
    pub endpoint: Url,
    /// Timeout for the whole request.
    #[serde(deserialize_with = "duration_str::deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: None,
        }
    }
}

pub(crate) fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("DEFAULT_ENDPOINT is a valid URL")
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use indoc::indoc;

    use super::*;

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(DEFAULT_LISTEN_ADDRESS, config.network.listen_address());
        assert_eq!("/graphql", config.graph.path());
        assert!(config.graph.introspection);
        assert_eq!(SchemaMode::Strict, config.graph.mode);
        assert_eq!("http://localhost:4000/graphql", config.client.endpoint.as_str());
        assert_eq!(None, config.client.timeout);
    }

    #[test]
    fn default_endpoint_parses_the_constant() {
        let endpoint = default_endpoint();

        assert_eq!(DEFAULT_ENDPOINT, endpoint.as_str());
        assert_eq!(Some(4000), endpoint.port());
        assert_eq!(DEFAULT_GRAPH_PATH, endpoint.path());
    }

    #[test]
    fn network_ipv6() {
        let input = indoc! {r#"
            [network]
            listen_address = "[::1]:4000"
        "#};

        let config: Config = toml::from_str(input).unwrap();

        let expected = SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1)), 4000);

        assert_eq!(expected, config.network.listen_address());
    }

    #[test]
    fn graph_values() {
        let input = indoc! {r#"
            [graph]
            path = "/search"
            introspection = false
            mode = "lenient"
        "#};

        let config: Config = toml::from_str(input).unwrap();

        assert_eq!("/search", config.graph.path());
        assert!(!config.graph.introspection);
        assert_eq!(SchemaMode::Lenient, config.graph.mode);
    }

    #[test]
    fn client_values() {
        let input = indoc! {r#"
            [client]
            endpoint = "http://127.0.0.1:5000/graphql"
            timeout = "5s"
        "#};

        let config: Config = toml::from_str(input).unwrap();

        assert_eq!("http://127.0.0.1:5000/graphql", config.client.endpoint.as_str());
        assert_eq!(Some(Duration::from_secs(5)), config.client.timeout);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let input = indoc! {r#"
            [graph]
            mode = "loose"
        "#};

        assert!(toml::from_str::<Config>(input).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let input = indoc! {r#"
            [graph]
            one_of = true
        "#};

        assert!(toml::from_str::<Config>(input).is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("oneof.toml")).unwrap();

        assert!(config.is_none());
    }

    #[test]
    fn file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oneof.toml");

        std::fs::write(&path, "[network]\nlisten_address = \"127.0.0.1:4100\"\n").unwrap();

        let config = Config::load(&path).unwrap().unwrap();
        assert_eq!(4100, config.network.listen_address().port());
    }

    #[test]
    fn invalid_file_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oneof.toml");

        std::fs::write(&path, "[graph\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with(&format!("parsing {}", path.display())));
    }

    #[test]
    fn sample_file_matches_the_defaults() {
        let config: Config = toml::from_str(include_str!("../../../oneof.toml")).unwrap();

        assert_eq!(DEFAULT_LISTEN_ADDRESS, config.network.listen_address());
        assert_eq!(DEFAULT_GRAPH_PATH, config.graph.path());
        assert_eq!(SchemaMode::Strict, config.graph.mode);
        assert_eq!(default_endpoint(), config.client.endpoint);
        assert_eq!(Some(Duration::from_secs(10)), config.client.timeout);
    }
}
