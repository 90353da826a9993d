//! Test doubles shared across module tests.

use crate::errors::{Result, TransportError};
use crate::graph::{Batch, GraphSink};
use crate::source::{CatalogSource, Clock};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Clock that only moves when slept on or advanced by hand.
pub(crate) struct FakeClock {
    base: Instant,
    offset: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub(crate) fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }

    /// Total simulated time since construction.
    pub(crate) fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap()
    }

    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SourceCall {
    pub(crate) path: String,
    pub(crate) offset: usize,
    pub(crate) query: Vec<(String, String)>,
}

impl SourceCall {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

type Responder = Box<dyn Fn(&SourceCall) -> Result<Value> + Send + Sync>;

/// Catalog double answering from a closure and recording every call.
pub(crate) struct ScriptedSource {
    responder: Responder,
    calls: Mutex<Vec<SourceCall>>,
}

impl ScriptedSource {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&SourceCall) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serves `records` under `key`, sliced by offset into pages of
    /// `page_size`; offsets past the end get an empty list.
    pub(crate) fn paged(key: &str, records: Vec<Value>, page_size: usize) -> Self {
        let key = key.to_string();
        Self::new(move |call| {
            let mut body = serde_json::Map::new();
            body.insert(
                key.clone(),
                Value::Array(page_slice(&records, call.offset, page_size)),
            );
            Ok(Value::Object(body))
        })
    }

    pub(crate) fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub(crate) fn page_slice(records: &[Value], offset: usize, page_size: usize) -> Vec<Value> {
    if offset >= records.len() {
        return Vec::new();
    }
    let end = (offset + page_size).min(records.len());
    records[offset..end].to_vec()
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch_page(
        &self,
        resource_path: &str,
        offset: usize,
        query: &[(String, String)],
    ) -> Result<Value> {
        let call = SourceCall {
            path: resource_path.to_string(),
            offset,
            query: query.to_vec(),
        };
        self.calls.lock().unwrap().push(call.clone());
        (self.responder)(&call)
    }
}

/// Sink that keeps every batch; optionally rejects the n-th insert (1-based).
#[derive(Default)]
pub(crate) struct RecordingSink {
    batches: Mutex<Vec<Batch>>,
    fail_on: Option<usize>,
    attempts: Mutex<usize>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(insert: usize) -> Self {
        Self {
            fail_on: Some(insert),
            ..Self::default()
        }
    }

    pub(crate) fn batches(&self) -> Vec<Batch> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphSink for RecordingSink {
    async fn insert(&self, batch: Batch) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail_on == Some(attempt) {
            return Err(TransportError::Status {
                target: "recording sink".to_string(),
                status: 503,
                body: "store unavailable".to_string(),
            }
            .into());
        }
        self.batches.lock().unwrap().push(batch);
        Ok(())
    }
}

pub(crate) fn platform_record(id: u64, name: &str) -> Value {
    json!({ "platform_id": id, "platform_name": name })
}
