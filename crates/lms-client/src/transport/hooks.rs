use super::curl::make_curl;
use super::{RawResponse, RequestRecord};
use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Observer called with each request just before it is sent.
pub type RequestHook = Arc<dyn Fn(&RequestRecord) + Send + Sync>;

/// Observer called with each response once its body has been read.
pub type ResponseHook = Arc<dyn Fn(&RawResponse) + Send + Sync>;

pub(super) fn run_request_hooks(hooks: &[RequestHook], record: &RequestRecord) {
    for (index, hook) in hooks.iter().enumerate() {
        if catch_unwind(AssertUnwindSafe(|| hook(record))).is_err() {
            warn!("Request hook #{} panicked for {}", index, record);
        }
    }
}

pub(super) fn run_response_hooks(hooks: &[ResponseHook], response: &RawResponse) {
    for (index, hook) in hooks.iter().enumerate() {
        if catch_unwind(AssertUnwindSafe(|| hook(response))).is_err() {
            warn!(
                "Response hook #{} panicked for {}",
                index,
                response.request()
            );
        }
    }
}

pub fn logging_request_hook() -> RequestHook {
    Arc::new(|record: &RequestRecord| {
        info!("Make {} request to {}", record.method, record.url);
        if let Some(body) = &record.body {
            debug!("Request body: {}", body);
        }
    })
}

pub fn logging_response_hook() -> ResponseHook {
    Arc::new(|response: &RawResponse| {
        let status = response.status();
        info!(
            "Got response {} {} from {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            response.request().url
        );
        debug!("Response body: {}", response.text());
    })
}

/// Keeps curl reproductions of the most recent requests.
#[derive(Debug, Clone)]
pub struct CurlRecorder {
    capacity: usize,
    commands: Arc<Mutex<VecDeque<String>>>,
}

impl CurlRecorder {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            commands: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// A request hook that feeds this recorder.
    pub fn hook(&self) -> RequestHook {
        let recorder = self.clone();
        Arc::new(move |record: &RequestRecord| recorder.push(make_curl(record)))
    }

    fn push(&self, command: String) {
        let mut commands = self.commands.lock().unwrap_or_else(PoisonError::into_inner);
        if commands.len() == self.capacity {
            commands.pop_front();
        }
        commands.push_back(command);
    }

    /// Recorded commands, oldest first.
    pub fn recent(&self) -> Vec<String> {
        let commands = self.commands.lock().unwrap_or_else(PoisonError::into_inner);
        commands.iter().cloned().collect()
    }

    pub fn drain(&self) -> Vec<String> {
        let mut commands = self.commands.lock().unwrap_or_else(PoisonError::into_inner);
        commands.drain(..).collect()
    }

    pub fn clear(&self) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for CurlRecorder {
    fn default() -> Self {
        Self::new(32)
    }
}
