//! Translation of catalog records into ontology triples.
//!
//! - `ontology`: namespaces, vocabulary terms and entity URI minting
//! - `genres`: the genre category table
//! - `records`: typed views of the catalog payloads
//! - `mapper`: the per-resource rules

pub mod genres;
pub mod mapper;
pub mod ontology;
pub mod records;

pub use genres::{GenreMapping, GenreTable};
pub use mapper::{EntityMapper, RecordType};
