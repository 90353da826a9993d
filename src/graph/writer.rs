//! Batch submission to the graph store.
//!
//! Each batch becomes exactly one SPARQL `INSERT DATA` update, so a page's
//! triples are accepted or rejected as a unit. Writes are append-only: the
//! store's set semantics make re-inserting an existing triple a no-op.

use crate::errors::{Result, TransportError};
use crate::graph::batch::Batch;
use crate::logger;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Mutex;
use std::time::Duration;

/// Write side of the graph store.
#[async_trait]
pub trait GraphSink: Send + Sync {
    /// Persists the whole batch or fails.
    async fn insert(&self, batch: Batch) -> Result<()>;
}

/// Builds the update text for one batch.
pub fn insert_data_query(batch: &Batch) -> String {
    format!("INSERT DATA {{\n{}}}\n", batch.to_ntriples())
}

/// Posts batches to a SPARQL 1.1 update endpoint with basic auth.
#[derive(Clone, Debug)]
pub struct GraphBatchWriter {
    client: Client,
    update_url: String,
    user: String,
    password: String,
}

impl GraphBatchWriter {
    pub fn new(
        update_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| TransportError::Request {
                target: "graph store client".to_string(),
                source,
            })?;
        Ok(Self {
            client,
            update_url: update_url.into(),
            user: user.into(),
            password: password.into(),
        })
    }

    pub fn update_url(&self) -> &str {
        &self.update_url
    }
}

#[async_trait]
impl GraphSink for GraphBatchWriter {
    async fn insert(&self, batch: Batch) -> Result<()> {
        let triples = batch.len();
        let query = insert_data_query(&batch);
        drop(batch);

        let response = self
            .client
            .post(&self.update_url)
            .basic_auth(&self.user, Some(&self.password))
            .form(&[("update", query.as_str())])
            .send()
            .await
            .map_err(|source| TransportError::Request {
                target: self.update_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                target: self.update_url.clone(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        logger::debug(&format!("inserted {} triples into the graph store", triples));
        Ok(())
    }
}

/// Set-semantics store kept in memory; used for dry runs.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    triples: Mutex<Batch>,
    inserts: Mutex<usize>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock_triples().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `insert` calls accepted so far.
    pub fn insert_count(&self) -> usize {
        match self.inserts.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Everything stored, as one canonical batch.
    pub fn snapshot(&self) -> Batch {
        self.lock_triples().clone()
    }

    fn lock_triples(&self) -> std::sync::MutexGuard<'_, Batch> {
        match self.triples.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl GraphSink for MemoryGraphStore {
    async fn insert(&self, batch: Batch) -> Result<()> {
        self.lock_triples().extend(batch);
        let mut inserts = match self.inserts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *inserts += 1;
        Ok(())
    }
}
