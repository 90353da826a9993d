//! Genre category table.
//!
//! The catalog files many kinds of classification under "genres": actual
//! genres, viewing perspectives, sports, themes, settings and so on. The
//! category code decides which relation a game has to the genre, which class
//! the genre instance belongs to and the shorthand used in its URI.

use crate::graph::NamedNode;
use crate::mapping::ontology::{DUL, GAMING, Namespace, SKOS, VGO};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenreMapping {
    pub relation_property: NamedNode,
    pub target_class: NamedNode,
    pub shorthand: &'static str,
}

/// Lookup from category code to [`GenreMapping`].
#[derive(Clone, Debug, Default)]
pub struct GenreTable {
    entries: BTreeMap<i64, GenreMapping>,
}

const STANDARD: &[(i64, (Namespace, &str), (Namespace, &str), &str)] = &[
    (1, (VGO, "has_game_genre"), (VGO, "Genre"), "genre"),
    (2, (GAMING, "viewable_from_perspective"), (GAMING, "ViewingPerspective"), "view"),
    (3, (GAMING, "has_sport"), (GAMING, "Sport"), "sport"),
    (4, (GAMING, "has_gameplay_type"), (GAMING, "Gameplay"), "gameplay"),
    (5, (GAMING, "has_educational_genre"), (VGO, "Genre"), "genre_edu"),
    (6, (GAMING, "has_gameplay_feature"), (GAMING, "GameplayFeature"), "gameplay_feature"),
    (7, (GAMING, "has_interface"), (GAMING, "InterfaceType"), "interface"),
    (8, (GAMING, "is_about"), (SKOS, "Concept"), "theme"),
    (9, (GAMING, "has_gameplay_pacing"), (GAMING, "Pacing"), "pacing"),
    (10, (DUL, "hasSetting"), (DUL, "Setting"), "setting"),
    (11, (GAMING, "has_drivable_vehicle_type"), (GAMING, "IngameVehicle"), "ingame_vehicle"),
    (12, (GAMING, "presented_visually"), (GAMING, "VisualPresentation"), "visual"),
    (13, (GAMING, "has_artistic_style"), (GAMING, "ArtStyle"), "art_style"),
    (14, (GAMING, "is_addon_type"), (GAMING, "AddonType"), "addon_type"),
    (15, (GAMING, "is_edition"), (GAMING, "EditionType"), "edition"),
];

impl GenreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fifteen categories the catalog currently defines.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (code, (prop_ns, prop), (class_ns, class), shorthand) in STANDARD {
            table.insert(
                *code,
                GenreMapping {
                    relation_property: prop_ns.term(prop),
                    target_class: class_ns.term(class),
                    shorthand: *shorthand,
                },
            );
        }
        table
    }

    pub fn insert(&mut self, code: i64, mapping: GenreMapping) -> Option<GenreMapping> {
        self.entries.insert(code, mapping)
    }

    pub fn get(&self, code: i64) -> Option<&GenreMapping> {
        self.entries.get(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }
}
