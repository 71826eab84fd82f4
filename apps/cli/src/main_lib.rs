use std::sync::Arc;

use ledgerscope_search::{Phase, ResolutionOutcome, ResolutionSession, SearchEngine};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries the JSON outcomes.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn render(input: &str, outcome: &ResolutionOutcome) -> serde_json::Value {
    json!({
        "input": input,
        "status": outcome.status(),
        "outcome": outcome,
    })
}

/// Resolves each argument in turn.
pub async fn run_once(engine: &SearchEngine, inputs: &[String]) -> anyhow::Result<()> {
    for input in inputs {
        let outcome = engine.search(input).await;
        println!("{}", serde_json::to_string(&render(input, &outcome))?);
    }
    Ok(())
}

/// Collects the non-blank lines of `reader`, trimmed.
///
/// Piped input goes through here and [`run_once`] so that every line gets
/// an outcome.
pub async fn read_inputs<R>(reader: R) -> anyhow::Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut inputs = Vec::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}

/// Feeds interactive stdin lines into one session and prints every outcome
/// it publishes.
///
/// A line typed while the previous one is still resolving supersedes it and
/// the superseded line prints nothing. Use [`read_inputs`] for piped input.
pub async fn run_session(engine: Arc<SearchEngine>) -> anyhow::Result<()> {
    let session = ResolutionSession::spawn(engine);
    let mut states = session.subscribe();

    let printer = tokio::spawn(async move {
        let mut printed = 0u64;
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if state.phase == Phase::Idle && state.generation > printed {
                printed = state.generation;
                if state.input.trim().is_empty() {
                    continue;
                }
                match serde_json::to_string(&render(&state.input, &state.outcome)) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::error!("Failed to render outcome: {}", e),
                }
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        session.set_input(line)?;
    }

    session.wait_idle().await?;
    session.shutdown().await;
    printer.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_inputs_keeps_every_line() {
        let piped: &[u8] = b"0.0.3\n\n  0.0.98  \r\n#1234";
        let inputs = read_inputs(piped).await.unwrap();
        assert_eq!(inputs, vec!["0.0.3", "0.0.98", "#1234"]);
    }

    #[tokio::test]
    async fn test_read_inputs_empty() {
        let piped: &[u8] = b"";
        assert!(read_inputs(piped).await.unwrap().is_empty());
    }

    #[test]
    fn test_render() {
        let outcome = ResolutionOutcome::empty();
        let value = render("0.0.3", &outcome);
        assert_eq!(value["input"], "0.0.3");
        assert!(value.get("status").is_some());
    }
}
