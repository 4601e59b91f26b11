use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use oneof_config::{Config, SchemaMode};
use oneof_schema::IntrospectionCapabilities;
use oneof_search::LooseSearchFilter;
use tracing::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};
use url::Url;

mod log;

pub(crate) use log::{LogLevel, LogStyle};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "oneof", version)]
#[command(arg_required_else_help = true)]
/// Serve, query and export a schema with a @oneOf search filter
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(long, short, env = "ONEOF_CONFIG_PATH", default_value = "./oneof.toml", global = true)]
    pub config: PathBuf,
    /// Set the logging level
    #[arg(long = "log", env = "ONEOF_LOG", global = true)]
    pub log_level: Option<LogLevel>,
    /// Set the style of log output
    #[arg(long, env = "ONEOF_LOG_STYLE", default_value_t = LogStyle::Text, global = true)]
    pub log_style: LogStyle,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the GraphQL server
    Serve(ServeArgs),
    /// Send the search query and print the result
    Search(SearchArgs),
    /// Introspect a server and print its schema
    Introspect(IntrospectArgs),
    /// Introspect a server and write the configured SDL and TypeScript outputs
    Codegen(CodegenArgs),
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// IP address on which the server will listen for incoming connections. Defaults to 127.0.0.1:4000.
    #[arg(short, long)]
    pub listen_address: Option<SocketAddr>,
    /// How the search filter is typed. Overrides `graph.mode`.
    #[arg(long)]
    pub mode: Option<ModeArg>,
    /// Reject introspection queries. Overrides `graph.introspection`.
    #[arg(long)]
    pub disable_introspection: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// The filter is a @oneOf input object
    Strict,
    /// The filter is an ordinary input object with optional fields
    Lenient,
}

impl From<ModeArg> for SchemaMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => SchemaMode::Strict,
            ModeArg::Lenient => SchemaMode::Lenient,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// GraphQL endpoint. Overrides `client.endpoint`.
    #[arg(long, short)]
    pub endpoint: Option<Url>,
    /// Case-insensitive part of the result name
    #[arg(long)]
    pub by_name: Option<String>,
    /// Exact result id
    #[arg(long)]
    pub by_id: Option<String>,
    /// Exact result category. Searches "Electronics" when no filter is given.
    #[arg(long)]
    pub by_category: Option<String>,
    /// Send the filter as given, even with zero or several fields set
    #[arg(long)]
    pub loose: bool,
}

impl SearchArgs {
    pub fn filter(&self) -> LooseSearchFilter {
        LooseSearchFilter {
            by_name: self.by_name.clone(),
            by_id: self.by_id.clone(),
            by_category: self.by_category.clone(),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct IntrospectArgs {
    /// GraphQL endpoint. Overrides `codegen.schema` and `client.endpoint`.
    #[arg(long, short)]
    pub endpoint: Option<Url>,
    /// Introspection query flavour. Overrides `codegen.capabilities`.
    #[arg(long)]
    pub capabilities: Option<CapabilitiesArg>,
    /// Output format
    #[arg(long, default_value_t = SchemaFormat::Sdl)]
    pub format: SchemaFormat,
    /// Leave directives out of the SDL
    #[arg(long)]
    pub no_directives: bool,
    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct CodegenArgs {
    /// GraphQL endpoint. Overrides `codegen.schema` and `client.endpoint`.
    #[arg(long, short)]
    pub endpoint: Option<Url>,
    /// Introspection query flavour. Overrides `codegen.capabilities`.
    #[arg(long)]
    pub capabilities: Option<CapabilitiesArg>,
    /// Directory the outputs are written under
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CapabilitiesArg {
    /// Ask for isOneOf
    Modern,
    /// The query of older tooling, without isOneOf
    Legacy,
}

impl From<CapabilitiesArg> for IntrospectionCapabilities {
    fn from(capabilities: CapabilitiesArg) -> Self {
        match capabilities {
            CapabilitiesArg::Modern => IntrospectionCapabilities::Modern,
            CapabilitiesArg::Legacy => IntrospectionCapabilities::Legacy,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    /// GraphQL SDL
    Sdl,
    /// The versioned JSON description
    Json,
}

impl std::fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SchemaFormat::Sdl => "sdl",
            SchemaFormat::Json => "json",
        })
    }
}

impl Args {
    /// The configuration file, or the defaults when it does not exist.
    pub fn config(&self) -> anyhow::Result<Config> {
        let config = Config::load(&self.config)?;

        if config.is_none() {
            tracing::debug!("no configuration at {}, using defaults", self.config.display());
        }

        Ok(config.unwrap_or_default())
    }

    pub fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer();

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if atty::is(atty::Stream::Stdout) => layer.with_ansi(true).boxed(),
            // for redirected output, colors are off
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn search_flags() {
        let args = Args::try_parse_from(["oneof", "search", "--by-name", "item", "--by-id", "2", "--loose"]).unwrap();

        let Command::Search(search) = args.command else {
            unreachable!("parsed a search command");
        };

        assert!(search.loose);
        assert_eq!(vec!["byName", "byId"], search.filter().provided_fields());
    }

    #[test]
    fn global_flags_after_the_subcommand() {
        let args = Args::try_parse_from(["oneof", "serve", "--mode", "lenient", "--log", "debug", "-c", "x.toml"]).unwrap();

        assert_eq!(Some(LogLevel::Debug), args.log_level);
        assert_eq!(PathBuf::from("x.toml"), args.config);

        let Command::Serve(serve) = args.command else {
            unreachable!("parsed a serve command");
        };

        assert_eq!(Some(ModeArg::Lenient), serve.mode);
        assert!(!serve.disable_introspection);
    }

    #[test]
    fn introspect_defaults_to_sdl() {
        let args = Args::try_parse_from(["oneof", "introspect", "--capabilities", "legacy"]).unwrap();

        let Command::Introspect(introspect) = args.command else {
            unreachable!("parsed an introspect command");
        };

        assert_eq!(SchemaFormat::Sdl, introspect.format);
        assert_eq!(Some(CapabilitiesArg::Legacy), introspect.capabilities);
    }
}
