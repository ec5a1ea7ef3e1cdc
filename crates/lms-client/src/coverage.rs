//! Which endpoints a run actually touched.

use crate::error::Result;
use crate::transport::{RawResponse, ResponseHook};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndpointHit {
    pub method: String,
    /// Path with identifier segments replaced by `{id}`.
    pub path: String,
    pub status: u16,
    pub count: usize,
}

type HitKey = (String, String, u16);

/// Response hook that counts hits per endpoint and status.
#[derive(Debug, Clone, Default)]
pub struct CoverageTracker {
    hits: Arc<Mutex<BTreeMap<HitKey, usize>>>,
}

impl CoverageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self) -> ResponseHook {
        let tracker = self.clone();
        Arc::new(move |response: &RawResponse| tracker.record(response))
    }

    pub fn record(&self, response: &RawResponse) {
        let request = response.request();
        let key = (
            request.method.clone(),
            path_template(&request.url),
            response.status().as_u16(),
        );
        let mut hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);
        *hits.entry(key).or_insert(0) += 1;
    }

    /// Hits sorted by path, then method, then status.
    pub fn report(&self) -> Vec<EndpointHit> {
        let hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);
        let mut report: Vec<EndpointHit> = hits
            .iter()
            .map(|((method, path, status), count)| EndpointHit {
                method: method.clone(),
                path: path.clone(),
                status: *status,
                count: *count,
            })
            .collect();
        report.sort_by(|a, b| {
            (&a.path, &a.method, a.status).cmp(&(&b.path, &b.method, b.status))
        });
        report
    }

    pub fn is_empty(&self) -> bool {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let report = self.report();
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        info!(
            "Wrote coverage for {} endpoint(s) to {}",
            report.len(),
            path.display()
        );
        Ok(())
    }
}

/// Strips the origin and query, and collapses UUID segments to `{id}`.
pub fn path_template(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split('?').next().unwrap_or(url).to_string(),
    };
    path.split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
