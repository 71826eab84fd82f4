mod config;
mod main_lib;

use std::io::IsTerminal;
use std::sync::Arc;

use config::Config;
use ledgerscope_search::{NoDomainNames, SearchEngine};
use main_lib::{init_tracing, read_inputs, run_once, run_session};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    let engine = SearchEngine::connect(config.network, &config.mirror, Arc::new(NoDomainNames))?;
    tracing::info!(
        "Searching {} via {} with {} probes",
        engine.network().name,
        engine.network().mirror_base_url,
        engine.resolver().probes().len()
    );

    let inputs: Vec<String> = std::env::args().skip(1).collect();
    if !inputs.is_empty() {
        return run_once(&engine, &inputs).await;
    }

    if std::io::stdin().is_terminal() {
        run_session(Arc::new(engine)).await
    } else {
        let inputs = read_inputs(BufReader::new(tokio::io::stdin())).await?;
        run_once(&engine, &inputs).await
    }
}
