//! Pretty-print collaborator
//!
//! Formatting runs on a dedicated worker task fed through a channel, one
//! request at a time. Callers wait with a deadline; a request that misses
//! it fails with `PrettifyError::Timeout` and its late answer is dropped.

use crate::error::PrettifyError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use vocedit_graph::Graph;

/// Text to canonical text
#[async_trait]
pub trait Prettify: Send + Sync {
    /// Format a document
    async fn prettify(&self, text: String) -> Result<String, PrettifyError>;
}

/// Synchronous formatting function run by the worker
pub type Formatter = Arc<dyn Fn(&str) -> Result<String, PrettifyError> + Send + Sync>;

/// Canonical Turtle form of a document
///
/// # Errors
/// - `PrettifyError::Malformed` if the text does not parse
pub fn canonical_form(text: &str) -> Result<String, PrettifyError> {
    Graph::parse(text)
        .map(|graph| graph.to_pretty())
        .map_err(|e| PrettifyError::Malformed(e.to_string()))
}

struct PrettifyJob {
    text: String,
    reply: oneshot::Sender<Result<String, PrettifyError>>,
}

/// Channel-fed formatting worker
#[derive(Debug, Clone)]
pub struct WorkerPrettifier {
    sender: mpsc::Sender<PrettifyJob>,
    timeout: Duration,
}

impl WorkerPrettifier {
    /// Spawn a worker using `canonical_form`
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(timeout: Duration) -> Self {
        Self::with_formatter(timeout, Arc::new(canonical_form))
    }

    /// Spawn a worker using a custom formatter
    #[must_use]
    pub fn with_formatter(timeout: Duration, formatter: Formatter) -> Self {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(worker_task(formatter, rx));
        Self {
            sender: tx,
            timeout,
        }
    }
}

#[async_trait]
impl Prettify for WorkerPrettifier {
    async fn prettify(&self, text: String) -> Result<String, PrettifyError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let (reply, answer) = oneshot::channel();
        self.sender
            .send(PrettifyJob { text, reply })
            .await
            .map_err(|_| PrettifyError::WorkerGone)?;

        match tokio::time::timeout(self.timeout, answer).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(PrettifyError::WorkerGone),
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Prettify request timed out");
                Err(PrettifyError::Timeout(self.timeout))
            }
        }
    }
}

/// Worker loop (runs in its own tokio task)
async fn worker_task(formatter: Formatter, mut rx: mpsc::Receiver<PrettifyJob>) {
    while let Some(job) = rx.recv().await {
        let formatter = Arc::clone(&formatter);
        let PrettifyJob { text, reply } = job;
        let result = tokio::task::spawn_blocking(move || formatter(&text))
            .await
            .unwrap_or(Err(PrettifyError::WorkerGone));
        // Requester may have given up already
        let _ = reply.send(result);
    }
    tracing::debug!("Prettify worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "<https://example.org/b> <http://www.w3.org/2004/02/skos/core#prefLabel> \"B\" .\n\
        <https://example.org/a> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .\n";

    #[tokio::test]
    async fn formats_through_worker() {
        let prettifier = WorkerPrettifier::spawn(Duration::from_secs(5));

        let pretty = prettifier.prettify(DOC.to_string()).await.unwrap();

        assert_eq!(pretty, canonical_form(DOC).unwrap());
        assert_eq!(
            pretty,
            "@prefix skos: <http://www.w3.org/2004/02/skos/core#> .\n\n\
             <https://example.org/a>\n    a skos:Concept .\n\n\
             <https://example.org/b>\n    skos:prefLabel \"B\" .\n"
        );
    }

    #[tokio::test]
    async fn blank_input_short_circuits() {
        let prettifier = WorkerPrettifier::with_formatter(
            Duration::from_secs(5),
            Arc::new(|_: &str| -> Result<String, PrettifyError> {
                panic!("formatter must not run")
            }),
        );
        assert_eq!(prettifier.prettify("  \n".to_string()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn malformed_input_is_rejected() {
        let prettifier = WorkerPrettifier::spawn(Duration::from_secs(5));
        let err = prettifier.prettify("<a> <b> .".to_string()).await.unwrap_err();
        assert!(matches!(err, PrettifyError::Malformed(_)));
    }

    #[tokio::test]
    async fn slow_formatter_times_out() {
        let prettifier = WorkerPrettifier::with_formatter(
            Duration::from_millis(20),
            Arc::new(|text: &str| -> Result<String, PrettifyError> {
                std::thread::sleep(Duration::from_millis(300));
                Ok(text.to_string())
            }),
        );

        let err = prettifier.prettify("data".to_string()).await.unwrap_err();
        assert_eq!(err, PrettifyError::Timeout(Duration::from_millis(20)));
    }
}
