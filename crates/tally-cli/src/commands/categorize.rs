//! Categorize command implementation

use anyhow::Result;
use tally_core::{CategorizationPipeline, ClassifierConfig};

pub async fn cmd_categorize(
    description: &str,
    amount: Option<f64>,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = ClassifierConfig::load();
    let pipeline = CategorizationPipeline::from_config(&config);

    if pipeline.has_remote() {
        tracing::debug!(model = %config.model, "Remote classifier configured");
    } else {
        tracing::debug!("No remote classifier configured, keyword rules only");
    }

    let result = pipeline.categorize(description, amount, category).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("  Description: {}", description.trim());
        println!("  Category:    {}", result.category);
        println!("  Confidence:  {:.2}", result.confidence);
        println!("  Method:      {}", result.method);
        println!();
    }

    Ok(())
}
