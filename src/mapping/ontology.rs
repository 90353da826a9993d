//! Ontology namespaces and the terms the mapping rules use.
//!
//! These strings must match what the graph store's imported vocabularies
//! use byte for byte.

use crate::graph::{NamedNode, NamedNodeRef};

/// An IRI prefix; terms are minted by appending a local name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Namespace(pub &'static str);

impl Namespace {
    pub fn term(&self, local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", self.0, local))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

pub const SKOS: Namespace = Namespace("http://www.w3.org/2004/02/skos/core#");
pub const DUL: Namespace = Namespace("http://www.ontologydesignpatterns.org/ont/dul/DUL.owl#");
pub const VGO: Namespace = Namespace("http://purl.org/net/VideoGameOntology#");
pub const GAMING: Namespace = Namespace("http://data.datascienceinstitute.ie/ontology/gaming#");

/// Base of every entity minted from catalog identifiers.
pub const ENTITY_BASE: Namespace = Namespace("http://data.datascienceinstitute.ie/mobygames/");

pub const RDF_TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const RDFS_LABEL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
pub const DCTERMS_DESCRIPTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description");
pub const FOAF_NAME: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/name");
pub const VGO_GAME: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/net/VideoGameOntology#Game");
pub const GAME_GROUP: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://data.datascienceinstitute.ie/ontology/gaming#GameGroup");
pub const BELONGS_TO_GROUP: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
    "http://data.datascienceinstitute.ie/ontology/gaming#belongs_to_group",
);
/// Class of catalog platforms; lives in the entity namespace.
pub const GAMING_PLATFORM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://data.datascienceinstitute.ie/mobygames/term/GamingPlatform");

/// Catalog entity kinds that get a URI of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Game,
    GameGroup,
    Platform,
}

impl EntityKind {
    pub fn segment(&self) -> &'static str {
        match self {
            EntityKind::Game => "game",
            EntityKind::GameGroup => "game_group",
            EntityKind::Platform => "platform",
        }
    }
}

/// `<base><segment>/<id>`; the same id always yields the same URI.
pub fn entity_iri(kind: EntityKind, id: u64) -> NamedNode {
    ENTITY_BASE.term(&format!("{}/{}", kind.segment(), id))
}

/// Genre URIs use the category shorthand as their path segment.
pub fn genre_iri(shorthand: &str, genre_id: u64) -> NamedNode {
    ENTITY_BASE.term(&format!("{}/{}", shorthand, genre_id))
}
