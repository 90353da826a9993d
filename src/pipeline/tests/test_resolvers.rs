#[cfg(test)]
mod tests {
    use crate::errors::{DataIntegrityError, EtlError};
    use crate::graph::{Subject, Triple};
    use crate::mapping::EntityMapper;
    use crate::mapping::ontology::{
        BELONGS_TO_GROUP, DCTERMS_DESCRIPTION, EntityKind, RDF_TYPE, VGO_GAME, entity_iri,
    };
    use crate::pipeline::resolvers::{self, group_members_descriptor};
    use crate::pipeline::{PageEnd, PaginationDriver};
    use crate::test_utilities::{RecordingSink, ScriptedSource, page_slice};
    use serde_json::json;

    fn group_source() -> ScriptedSource {
        let groups = vec![
            json!({ "group_id": 10, "group_name": "Zork series", "group_description": "Text adventures" }),
            json!({ "group_id": 20, "group_name": "Empty group" }),
        ];
        let members = vec![json!(1), json!(2), json!(3)];
        ScriptedSource::new(move |call| {
            let body = match (call.path.as_str(), call.param("group")) {
                ("groups", None) => json!({ "groups": page_slice(&groups, call.offset, 2) }),
                ("games", Some("10")) => json!({ "games": page_slice(&members, call.offset, 2) }),
                ("games", Some(_)) => json!({ "games": [] }),
                (path, group) => panic!("unexpected call to {} (group {:?})", path, group),
            };
            Ok(body)
        })
    }

    #[tokio::test]
    async fn test_games_with_details_requests_normal_format() {
        let source = ScriptedSource::paged(
            "games",
            vec![json!({ "game_id": 7, "title": "Myst", "description": null })],
            100,
        );
        let sink = RecordingSink::new();
        let mapper = EntityMapper::default();
        let driver = PaginationDriver::new(&source, &sink, 100);

        let report = resolvers::games(&driver, &mapper, true).await.unwrap();

        assert_eq!(report.triples_written, 2);
        assert!(
            source
                .calls()
                .iter()
                .all(|c| c.path == "games" && c.param("format") == Some("normal"))
        );
    }

    #[tokio::test]
    async fn test_games_without_details_emits_type_only() {
        let source = ScriptedSource::paged("games", vec![json!(7), json!(8)], 100);
        let sink = RecordingSink::new();
        let mapper = EntityMapper::default();
        let driver = PaginationDriver::new(&source, &sink, 100);

        let report = resolvers::games(&driver, &mapper, false).await.unwrap();

        assert_eq!(report.triples_written, 2);
        assert_eq!(source.calls()[0].param("format"), Some("id"));
        let batch = &sink.batches()[0];
        assert!(batch.contains(&Triple::new(
            entity_iri(EntityKind::Game, 8),
            RDF_TYPE,
            VGO_GAME,
        )));
    }

    #[tokio::test]
    async fn test_unmapped_genre_is_fatal_and_nothing_is_written() {
        let source = ScriptedSource::paged(
            "genres",
            vec![
                json!({ "genre_id": 1, "genre_name": "Action", "genre_category": "Basic Genres",
                        "genre_category_id": 1, "genre_description": null }),
                json!({ "genre_id": 999, "genre_name": "Mystery", "genre_category": "Brand new",
                        "genre_category_id": 16, "genre_description": null }),
            ],
            100,
        );
        let sink = RecordingSink::new();
        let mapper = EntityMapper::default();
        let driver = PaginationDriver::new(&source, &sink, 100);

        let err = resolvers::genres(&driver, &mapper).await.unwrap_err();

        assert!(matches!(
            err.root(),
            EtlError::DataIntegrity(DataIntegrityError::UnmappedGenreCategory {
                category_id: 16,
                genre_id: 999,
                ..
            })
        ));
        assert!(sink.batches().is_empty());
    }

    #[tokio::test]
    async fn test_groups_paginate_members_of_each_group() {
        let source = group_source();
        let sink = RecordingSink::new();
        let mapper = EntityMapper::default();
        let driver = PaginationDriver::new(&source, &sink, 2);

        let reports = resolvers::groups(&driver, &mapper).await.unwrap();

        let labels: Vec<&str> = reports.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["groups", "games of group 10", "games of group 20"]);
        assert_eq!(reports[1].records, 3);
        assert_eq!(reports[1].calls, 3);
        assert_eq!(reports[2].records, 0);
        assert!(reports.iter().all(|r| r.end == PageEnd::Exhausted));

        let calls: Vec<(String, Option<String>, usize)> = source
            .calls()
            .iter()
            .map(|c| (c.path.clone(), c.param("group").map(str::to_string), c.offset))
            .collect();
        assert_eq!(
            calls,
            vec![
                ("groups".to_string(), None, 0),
                ("games".to_string(), Some("10".to_string()), 0),
                ("games".to_string(), Some("10".to_string()), 2),
                ("games".to_string(), Some("10".to_string()), 4),
                ("games".to_string(), Some("20".to_string()), 0),
                ("groups".to_string(), None, 2),
            ]
        );

        // groups page, then two member pages of group 10; empty pages are skipped
        let batches = sink.batches();
        assert_eq!(batches.len(), 3);
        let group = entity_iri(EntityKind::GameGroup, 10);
        for id in [1, 2] {
            assert!(batches[1].contains(&Triple::new(
                entity_iri(EntityKind::Game, id),
                BELONGS_TO_GROUP,
                group.clone(),
            )));
        }
        assert!(batches[2].contains(&Triple::new(
            entity_iri(EntityKind::Game, 3),
            BELONGS_TO_GROUP,
            group.clone(),
        )));
        // each member batch carries the group description again
        let group_subject = Subject::from(group.clone());
        assert!(batches[2].iter().any(|t| {
            t.subject == group_subject && t.predicate.as_ref() == DCTERMS_DESCRIPTION
        }));
    }

    #[tokio::test]
    async fn test_member_listing_failure_names_the_group() {
        let source = ScriptedSource::new(|call| match call.path.as_str() {
            "groups" => Ok(json!({ "groups": [{ "group_id": 5, "group_name": "Broken" }] })),
            _ => Ok(json!({ "games": ["not-an-id"] })),
        });
        let sink = RecordingSink::new();
        let mapper = EntityMapper::default();
        let driver = PaginationDriver::new(&source, &sink, 100);

        let err = resolvers::groups(&driver, &mapper).await.unwrap_err();

        match &err {
            EtlError::Page {
                resource,
                page,
                source,
            } => {
                assert_eq!(resource, "groups");
                assert_eq!(*page, 1);
                assert!(matches!(
                    source.as_ref(),
                    EtlError::Page { resource, page: 1, .. } if resource == "games of group 5"
                ));
            }
            other => panic!("expected a page error, got {:?}", other),
        }
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_group_members_descriptor() {
        let descriptor = group_members_descriptor(42);
        assert_eq!(descriptor.path, "games");
        assert_eq!(descriptor.key, "games");
        assert_eq!(
            descriptor.query,
            vec![
                ("group".to_string(), "42".to_string()),
                ("format".to_string(), "id".to_string()),
            ]
        );
    }
}
