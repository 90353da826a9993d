//! Error taxonomy for the catalog-to-graph pipeline.
//!
//! Three families cover everything the pipeline can fail on:
//! - configuration problems detected at startup
//! - data-integrity problems in what the catalog returned
//! - transport problems talking to the catalog or the graph store
//!
//! Failures raised inside a pagination loop are wrapped in [`EtlError::Page`]
//! so the runner can report which resource and page broke.

use thiserror::Error;

/// Problems with the data returned by the catalog API.
#[derive(Debug, Error)]
pub enum DataIntegrityError {
    #[error("unmapped genre category {category_id} ({category_name}) on genre {genre_id}")]
    UnmappedGenreCategory {
        category_id: i64,
        category_name: String,
        genre_id: u64,
    },

    #[error("response for {resource} has no \"{key}\" list")]
    MissingKey { resource: String, key: String },

    #[error("malformed {resource} record: {reason}")]
    MalformedRecord { resource: String, reason: String },
}

/// Problems reaching either remote collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {target} failed: {source}")]
    Request {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{target} answered HTTP {status}: {body}")]
    Status {
        target: String,
        status: u16,
        body: String,
    },

    #[error("{target} returned a body that is not JSON: {source}")]
    Decode {
        target: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error type of the crate.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("data integrity error: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("{resource} failed on page {page}: {source}")]
    Page {
        resource: String,
        page: usize,
        #[source]
        source: Box<EtlError>,
    },
}

impl EtlError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Wraps the error with the resource label and 1-based page number.
    pub fn at_page(self, resource: impl Into<String>, page: usize) -> Self {
        Self::Page {
            resource: resource.into(),
            page,
            source: Box::new(self),
        }
    }

    /// The innermost error below any [`EtlError::Page`] layers.
    pub fn root(&self) -> &EtlError {
        let mut current = self;
        while let EtlError::Page { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self.root(), EtlError::DataIntegrity(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.root(), EtlError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
