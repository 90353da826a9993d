//! Shapes of the catalog records the mapping rules read.
//!
//! Only the fields the rules need are declared; everything else in the
//! API payload is ignored.

use crate::errors::DataIntegrityError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct GameRecord {
    pub game_id: u64,
    pub title: String,
    /// HTML fragment.
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenreRecord {
    pub genre_id: u64,
    pub genre_name: String,
    pub genre_category: String,
    pub genre_category_id: i64,
    #[serde(default)]
    pub genre_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GroupRecord {
    pub group_id: u64,
    pub group_name: String,
    #[serde(default)]
    pub group_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlatformRecord {
    pub platform_id: u64,
    pub platform_name: String,
}

/// Decodes `record` as `T`, naming `resource` in the error.
pub fn decode<T: DeserializeOwned>(
    resource: &str,
    record: &Value,
) -> Result<T, DataIntegrityError> {
    T::deserialize(record).map_err(|e| DataIntegrityError::MalformedRecord {
        resource: resource.to_string(),
        reason: e.to_string(),
    })
}

/// Reads a bare numeric id (`format=id` listings).
pub fn decode_id(resource: &str, record: &Value) -> Result<u64, DataIntegrityError> {
    record
        .as_u64()
        .ok_or_else(|| DataIntegrityError::MalformedRecord {
            resource: resource.to_string(),
            reason: format!("expected a numeric id, got {}", record),
        })
}
