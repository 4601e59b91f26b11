use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::args::Args;

const DEV_LOG_ENV: &str = "__ONEOF_RUST_LOG";

/// Installs the global subscriber. `__ONEOF_RUST_LOG` takes over with a
/// pretty developer format and its own filter.
pub(crate) fn init(args: &Args) -> anyhow::Result<()> {
    if std::env::var(DEV_LOG_ENV).is_ok() {
        let filter = EnvFilter::try_from_env(DEV_LOG_ENV).unwrap_or_default();

        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .without_time()
            .try_init()
            .map_err(|err| anyhow::anyhow!("installing the log subscriber: {err}"))?;

        return Ok(());
    }

    let env_filter = args.log_level.unwrap_or_default().env_filter();

    tracing_subscriber::registry()
        .with(args.log_format())
        .with(env_filter)
        .try_init()?;

    Ok(())
}
