use anyhow::Context;
use oneof_client::{QueryState, SearchClient, SearchComponent};
use oneof_config::Config;
use oneof_schema::SdlOptions;
use oneof_search::SearchFilter;
use oneof_server::ServerConfig;

use crate::args::{CodegenArgs, IntrospectArgs, SchemaFormat, SearchArgs, ServeArgs};

pub(crate) async fn serve(args: ServeArgs, config: &Config) -> anyhow::Result<()> {
    let mut server_config = ServerConfig::from_config(config, args.listen_address);

    if let Some(mode) = args.mode {
        server_config.mode = mode.into();
    }

    if args.disable_introspection {
        server_config.introspection = false;
    }

    oneof_server::serve(server_config).await?;

    Ok(())
}

pub(crate) async fn search(args: SearchArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(endpoint) = args.endpoint.clone() {
        config.client.endpoint = endpoint;
    }

    let client = SearchClient::new(&config.client)?;
    let filter = args.filter();

    if args.loose {
        let state = QueryState::from(client.search_loose(&filter).await);
        print_loose(&filter.provided_fields(), &state);

        return Ok(());
    }

    let filter = if filter.provided_fields().is_empty() {
        oneof_client::default_filter()
    } else {
        SearchFilter::try_from(filter).context("use --loose to send the filter unchecked")?
    };

    let mut component = SearchComponent::new(filter);
    component.load(&client).await;

    println!("{component}");

    Ok(())
}

fn print_loose(fields: &[&str], state: &QueryState) {
    match state {
        QueryState::Loading => println!("Loading..."),
        QueryState::Error(message) => println!("Error: {message}"),
        QueryState::Success(results) => {
            println!("Search Results (loose: {})", fields.join(","));

            for result in results {
                println!("{} - {}", result.name, result.category);
            }
        }
    }
}

pub(crate) async fn introspect(args: IntrospectArgs, config: &Config) -> anyhow::Result<()> {
    let url = args.endpoint.unwrap_or_else(|| config.codegen.schema_url(&config.client));
    let capabilities = args.capabilities.map_or(config.codegen.capabilities, Into::into);

    let document = oneof_client::introspect(&url, capabilities, config.client.timeout)
        .await
        .with_context(|| format!("introspecting {url}"))?;

    let output = match args.format {
        SchemaFormat::Sdl => {
            let include_directives = config.codegen.include_directives && !args.no_directives;
            document.to_sdl_with_options(SdlOptions { include_directives })
        }
        SchemaFormat::Json => document.to_json()?,
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, output).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{output}"),
    }

    Ok(())
}

pub(crate) async fn codegen(args: CodegenArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(endpoint) = args.endpoint {
        config.codegen.schema = Some(endpoint);
    }

    if let Some(capabilities) = args.capabilities {
        config.codegen.capabilities = capabilities.into();
    }

    let written = oneof_client::codegen::run(&config, &args.out_dir).await?;

    for path in written {
        println!("{}", path.display());
    }

    Ok(())
}
