//! Send one document through a running Philter instance.
//!
//! Usage: PHILTER_ENDPOINT=https://philter.local:8080/ cargo run --example redact

use philter_stage::{
    PipelineStage, RedactionStage, StageConfiguration, WorkItem, ATTRIBUTE_CONTEXT,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let endpoint =
        std::env::var("PHILTER_ENDPOINT").unwrap_or_else(|_| "http://localhost:8080/".to_string());

    let config = StageConfiguration::new("default").with_endpoint(endpoint);
    let stage = RedactionStage::new(config)?;

    let item = WorkItem::new("My SSN is 123-45-6789.").with_attribute(ATTRIBUTE_CONTEXT, "demo");

    let outcome = stage.process(item).await;
    for (relationship, item) in outcome.transfers() {
        println!(
            "{} <- {}: {}",
            relationship,
            item.id,
            String::from_utf8_lossy(&item.payload)
        );
    }

    Ok(())
}
