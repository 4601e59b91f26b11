#![cfg_attr(test, allow(unused_crate_dependencies))]

use args::Command;
use clap::crate_version;
use tokio::runtime;

mod args;
mod commands;
mod telemetry;

const THREAD_NAME: &str = "oneof";

fn main() -> anyhow::Result<()> {
    let args = self::args::parse();

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(async move {
        telemetry::init(&args)?;

        let config = args.config()?;
        tracing::debug!("oneof {}", crate_version!());

        match args.command {
            Command::Serve(serve) => commands::serve(serve, &config).await,
            Command::Search(search) => commands::search(search, config).await,
            Command::Introspect(introspect) => commands::introspect(introspect, &config).await,
            Command::Codegen(codegen) => commands::codegen(codegen, config).await,
        }
    })
}
