//! In-memory repository used by the scanner and scheduler tests.

use async_trait::async_trait;
use orecheck_probe::{ProbeError, RepositoryProbe, StatusCode};
use orecheck_types::{PackageCandidate, PackageId};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;

/// How the fake repository answers for one package.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Answer {
    Status(StatusCode),
    Timeout,
}

/// Repository with scripted answers. Unknown ids answer `404`.
#[derive(Debug, Default)]
pub(crate) struct FakeRepository {
    answers: HashMap<PackageId, Answer>,
    latency: Duration,
    calls: AtomicUsize,
}

impl FakeRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn answer(mut self, id: &str, answer: Answer) -> Self {
        self.answers.insert(PackageId::new(id), answer);
        self
    }

    pub(crate) fn available(self, id: &str) -> Self {
        self.answer(id, Answer::Status(StatusCode::OK))
    }

    pub(crate) fn timing_out(self, id: &str) -> Self {
        self.answer(id, Answer::Timeout)
    }

    pub(crate) const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositoryProbe for FakeRepository {
    async fn status(&self, id: &PackageId) -> Result<StatusCode, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.answers.get(id) {
            Some(Answer::Status(status)) => Ok(*status),
            Some(Answer::Timeout) => Err(ProbeError::Transport("operation timed out".to_string())),
            None => Ok(StatusCode::NOT_FOUND),
        }
    }
}

pub(crate) fn candidates(ids: &[&str]) -> Vec<PackageCandidate> {
    ids.iter()
        .map(|id| PackageCandidate::new(*id, id.to_uppercase()))
        .collect()
}

/// Log output captured from a thread-local subscriber.
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Routes `INFO` and above on the current thread into the buffer until
    /// the guard is dropped.
    pub(crate) fn install(&self) -> DefaultGuard {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Returns how many captured lines contain `needle`.
    pub(crate) fn count(&self, needle: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
