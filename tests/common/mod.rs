use async_trait::async_trait;
use haven::engine::{RecentContext, Responder};
use haven::error::{HavenError, Result};
use haven::history::SledHistory;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn create_temp_history() -> (SledHistory, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let history = SledHistory::open(tmp.path().join("history")).expect("failed to open history");
    (history, tmp)
}

/// Responder that fails every call after the first `ok_calls` successes
#[allow(dead_code)]
pub struct FlakyResponder {
    ok_calls: usize,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FlakyResponder {
    pub fn new(ok_calls: usize) -> Self {
        Self {
            ok_calls,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Responder for FlakyResponder {
    async fn respond(&self, utterance: &str, context: &mut RecentContext) -> Result<String> {
        context.push(utterance);
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.ok_calls {
            Ok(format!("echo: {}", utterance))
        } else {
            Err(HavenError::EngineFailure("simulated outage".to_string()).into())
        }
    }
}
