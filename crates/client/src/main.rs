//! Battle client binary.
//!
//! ```bash
//! # Run the default encounter with a fixed seed
//! BATTLE_SEED=42 cargo run -p battle-client
//!
//! # Another encounter, JSON report, verbose core logs
//! RUST_LOG=battle_core=debug BATTLE_ENCOUNTER=crypt_guardian BATTLE_OUTPUT=json \
//!     cargo run -p battle-client
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use battle_client::{ClientConfig, OutputFormat, logging, presenter};
use battle_content::ContentFactory;
use battle_runtime::{EventBus, Party, Runtime, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Configuration and logging
    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        encounter = %config.encounter,
        "starting"
    );

    // 2. Content
    let factory = ContentFactory::new(&config.data_dir);
    let tables = factory.load_tables()?;
    let catalog = Arc::new(factory.load_catalog()?);
    let encounter = factory.load_encounter(&config.encounter, &catalog)?;
    let party_spec = factory.load_party(&catalog)?;
    let mut party = Party::from_spec(&party_spec, &catalog, tables.progression.clone())
        .context("Failed to assemble the party")?;

    // 3. Runtime
    let runtime = Runtime::builder(catalog)
        .battle_config(tables.combat)
        .config(config.runtime_config())
        .build();

    let printer = match config.output {
        OutputFormat::Text => Some(spawn_printer(runtime.events())),
        OutputFormat::Json => None,
    };

    // 4. Fight
    let report = runtime.run_encounter(&mut party, &encounter).await?;

    // closing the bus lets the printer drain and stop
    drop(runtime);
    if let Some(printer) = printer {
        printer.await.context("Event printer panicked")?;
    }

    match config.output {
        OutputFormat::Text => print!("\n{}", presenter::render_report(&report, &party)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Print combat events as they arrive until the bus closes.
fn spawn_printer(bus: EventBus) -> JoinHandle<()> {
    let mut events = bus.subscribe(Topic::Combat);
    drop(bus);

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(line) = presenter::describe_event(&event) {
                        println!("{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
