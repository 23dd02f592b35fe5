use anyhow::Context;
use clap::Parser;
use console::{write_surface, ConsoleNotifier, OutputFormat};
use inquire::{InquireError, Text};
use product_lookup::config::Settings;
use product_lookup::contracts::lookup_product::{HttpProductLookup, LookupHandler, LookupOutcome};
use product_lookup::display::ProductTable;
use product_lookup::product::ProductId;
use std::io;
use std::sync::Arc;
use url::Url;

mod console;

#[derive(Parser, Debug)]
#[command(name = "product-lookup")]
#[command(about = "Look up a product by id and display it", long_about = None)]
#[command(version)]
struct Cli {
    /// Product id to look up. Omit it to enter ids at an interactive prompt
    #[arg(value_name = "ID")]
    id: Option<String>,

    /// Lookup endpoint, overriding `lookup.endpoint` from configuration
    #[arg(long, value_name = "URL")]
    endpoint: Option<Url>,

    /// How the product table is printed
    #[arg(short, long, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::parse()?;
    shared_kernel::tracing::config_telemetry(&settings.telemetry)?;
    let found = start(cli, settings).await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    if !found? {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns whether a one-shot lookup rendered a product. Interactive sessions
/// always count as successful once the user quits.
async fn start(cli: Cli, settings: Settings) -> anyhow::Result<bool> {
    let endpoint = match cli.endpoint {
        Some(endpoint) => endpoint,
        None => settings.lookup.endpoint()?,
    };
    tracing::debug!(%endpoint, "Using lookup endpoint");
    let handler = LookupHandler::new(
        Arc::new(HttpProductLookup::new(endpoint)),
        Arc::new(ConsoleNotifier),
        ProductTable::new(),
    );

    match cli.id {
        Some(id) => {
            let outcome = handler.lookup(ProductId::from(id)).await;
            write_surface(&handler.surface(), cli.format, io::stdout().lock())?;
            Ok(is_success(&outcome))
        }
        None => prompt_loop(&handler, cli.format).await,
    }
}

/// Only a rendered record counts as success for the process exit status.
fn is_success(outcome: &LookupOutcome) -> bool {
    matches!(outcome, LookupOutcome::Rendered(_))
}

/// `None` once the user leaves the prompt with Esc or Ctrl-C.
fn submitted_id(answer: Result<String, InquireError>) -> anyhow::Result<Option<String>> {
    match answer {
        Ok(id) => Ok(Some(id)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read product id"),
    }
}

async fn prompt_loop(
    handler: &LookupHandler<ProductTable>,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    loop {
        let answer = tokio::task::spawn_blocking(|| {
            Text::new("Product ID:")
                .with_help_message("Esc or Ctrl-C to quit")
                .prompt()
        })
        .await
        .context("Prompt task failed")?;

        let Some(id) = submitted_id(answer)? else {
            return Ok(true);
        };

        handler.lookup(ProductId::from(id)).await;
        write_surface(&handler.surface(), format, io::stdout().lock())?;
    }
}
