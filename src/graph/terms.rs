//! RDF terms used by the mapping rules, built on `oxrdf`.
//!
//! `oxrdf` renders terms in N-Triples syntax through `Display`; this module
//! only adds the literal shapes the catalog needs and the statement line.

use oxrdf::vocab::rdf;
pub use oxrdf::{Literal, NamedNode, NamedNodeRef, Subject, Term, Triple};

/// Language tag of catalog labels.
pub const LABEL_LANGUAGE: &str = "en";

pub fn plain_literal(value: impl Into<String>) -> Literal {
    Literal::new_simple_literal(value)
}

/// `"value"@en`.
pub fn en_literal(value: impl Into<String>) -> Literal {
    Literal::new_language_tagged_literal_unchecked(value, LABEL_LANGUAGE)
}

/// `"value"^^rdf:HTML`, for rich-text descriptions.
pub fn html_literal(value: impl Into<String>) -> Literal {
    Literal::new_typed_literal(value, rdf::HTML)
}

/// One N-Triples statement, without the trailing newline.
pub fn ntriples_line(triple: &Triple) -> String {
    format!("{} .", triple)
}
