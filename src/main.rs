use anyhow::Context;
use icu_retrieval::config::RetrievalConfig;
use icu_retrieval::logging;
use icu_retrieval::retrieval::Pipeline;

fn main() -> anyhow::Result<()> {
    let config = RetrievalConfig::from_env()?;
    logging::init(config.log_format)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let pipeline = Pipeline::from_config(&config)?;
    let written = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(pipeline.run(&config.buildpack_toml, &config.output))
        .with_context(|| format!("retrieval against {} failed", config.api_url))?;

    tracing::info!("Done: {} records in {:?}", written, config.output);
    Ok(())
}
