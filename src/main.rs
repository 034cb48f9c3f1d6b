use ai_llm_service::telemetry;
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine: the host may inject variables directly.
    let dotenv = dotenvy::dotenv();

    telemetry::init(telemetry::DEFAULT_FILTER).context("setting default subscriber failed")?;

    if let Err(e) = &dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    api::start().await.context("RAG query API failed")?;

    Ok(())
}
