//! Record-to-triples rules.
//!
//! Every rule is a pure function of its input record (plus the genre table
//! the mapper was built with): the same record always yields the same
//! triples, and a rule that fails yields none.

use crate::errors::DataIntegrityError;
use crate::graph::{Triple, en_literal, html_literal, plain_literal};
use crate::mapping::genres::GenreTable;
use crate::mapping::ontology::{
    BELONGS_TO_GROUP, DCTERMS_DESCRIPTION, EntityKind, FOAF_NAME, GAME_GROUP, GAMING_PLATFORM,
    RDF_TYPE, RDFS_LABEL, VGO_GAME, entity_iri, genre_iri,
};
use crate::mapping::records::{
    GameRecord, GenreRecord, GroupRecord, PlatformRecord, decode, decode_id,
};
use serde_json::Value;

type MapResult = Result<Vec<Triple>, DataIntegrityError>;

/// Record shapes a listing page can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordType {
    Game,
    /// Bare id from a `format=id` listing.
    GameId,
    Genre,
    Group,
    Platform,
}

#[derive(Clone, Debug)]
pub struct EntityMapper {
    genres: GenreTable,
}

impl Default for EntityMapper {
    fn default() -> Self {
        Self::new(GenreTable::standard())
    }
}

impl EntityMapper {
    pub fn new(genres: GenreTable) -> Self {
        Self { genres }
    }

    pub fn genre_table(&self) -> &GenreTable {
        &self.genres
    }

    /// Applies the rule for `record_type` to `record`.
    pub fn map(&self, record_type: RecordType, record: &Value) -> MapResult {
        match record_type {
            RecordType::Game => self.game(record),
            RecordType::GameId => self.game_id(record),
            RecordType::Genre => self.genre(record),
            RecordType::Group => self.group(record),
            RecordType::Platform => self.platform(record),
        }
    }

    /// Detailed game record: type, title and, when present, the HTML
    /// description.
    pub fn game(&self, record: &Value) -> MapResult {
        let game: GameRecord = decode("games", record)?;
        let subject = entity_iri(EntityKind::Game, game.game_id);
        let mut triples = vec![
            Triple::new(subject.clone(), RDF_TYPE, VGO_GAME),
            Triple::new(subject.clone(), RDFS_LABEL, plain_literal(game.title)),
        ];
        if let Some(description) = game.description {
            triples.push(Triple::new(
                subject,
                DCTERMS_DESCRIPTION,
                html_literal(description),
            ));
        }
        Ok(triples)
    }

    /// Bare game id from a `format=id` listing: the type triple only.
    pub fn game_id(&self, record: &Value) -> MapResult {
        let id = decode_id("games", record)?;
        Ok(vec![Triple::new(
            entity_iri(EntityKind::Game, id),
            RDF_TYPE,
            VGO_GAME,
        )])
    }

    pub fn genre(&self, record: &Value) -> MapResult {
        let genre: GenreRecord = decode("genres", record)?;
        let mapping = self.genres.get(genre.genre_category_id).ok_or_else(|| {
            DataIntegrityError::UnmappedGenreCategory {
                category_id: genre.genre_category_id,
                category_name: genre.genre_category.clone(),
                genre_id: genre.genre_id,
            }
        })?;

        let subject = genre_iri(mapping.shorthand, genre.genre_id);
        let mut triples = vec![
            Triple::new(
                mapping.target_class.clone(),
                RDFS_LABEL,
                en_literal(genre.genre_category),
            ),
            Triple::new(subject.clone(), RDF_TYPE, mapping.target_class.clone()),
            Triple::new(subject.clone(), RDFS_LABEL, en_literal(genre.genre_name)),
        ];
        if let Some(description) = genre.genre_description {
            triples.push(Triple::new(
                subject,
                DCTERMS_DESCRIPTION,
                en_literal(description),
            ));
        }
        Ok(triples)
    }

    pub fn group(&self, record: &Value) -> MapResult {
        let group: GroupRecord = decode("groups", record)?;
        Ok(group_triples(&group))
    }

    /// Group id of a group record, for the membership sub-query.
    pub fn group_id(&self, record: &Value) -> Result<u64, DataIntegrityError> {
        let group: GroupRecord = decode("groups", record)?;
        Ok(group.group_id)
    }

    /// Group entity plus one `belongs_to_group` link per member game id.
    pub fn group_membership(&self, group_record: &Value, game_ids: &[Value]) -> MapResult {
        let group: GroupRecord = decode("groups", group_record)?;
        let group_iri = entity_iri(EntityKind::GameGroup, group.group_id);
        let mut triples = group_triples(&group);
        for game_id in game_ids {
            let id = decode_id("games", game_id)?;
            triples.push(Triple::new(
                entity_iri(EntityKind::Game, id),
                BELONGS_TO_GROUP,
                group_iri.clone(),
            ));
        }
        Ok(triples)
    }

    pub fn platform(&self, record: &Value) -> MapResult {
        let platform: PlatformRecord = decode("platforms", record)?;
        let subject = entity_iri(EntityKind::Platform, platform.platform_id);
        Ok(vec![
            Triple::new(subject.clone(), RDF_TYPE, GAMING_PLATFORM),
            Triple::new(
                subject.clone(),
                RDFS_LABEL,
                en_literal(platform.platform_name.clone()),
            ),
            Triple::new(subject, FOAF_NAME, plain_literal(platform.platform_name)),
        ])
    }
}

fn group_triples(group: &GroupRecord) -> Vec<Triple> {
    let subject = entity_iri(EntityKind::GameGroup, group.group_id);
    let mut triples = vec![
        Triple::new(subject.clone(), RDF_TYPE, GAME_GROUP),
        Triple::new(
            subject.clone(),
            RDFS_LABEL,
            plain_literal(group.group_name.clone()),
        ),
    ];
    if let Some(description) = &group.group_description {
        triples.push(Triple::new(
            subject,
            DCTERMS_DESCRIPTION,
            plain_literal(description.clone()),
        ));
    }
    triples
}
