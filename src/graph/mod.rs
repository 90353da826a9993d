//! RDF model and graph-store output.
//!
//! - `terms`: `oxrdf` terms plus the literal shapes the mapping emits
//! - `batch`: the per-page `Batch` and its canonical N-Triples form
//! - `writer`: the `GraphSink` seam, the SPARQL update writer and an
//!   in-memory store

pub mod batch;
pub mod terms;
pub mod writer;

pub use batch::Batch;
pub use terms::{
    Literal, NamedNode, NamedNodeRef, Subject, Term, Triple, en_literal, html_literal, ntriples_line,
    plain_literal,
};
pub use writer::{GraphBatchWriter, GraphSink, MemoryGraphStore, insert_data_query};
