//! Full runs against a mocked catalog and a mocked graph store.
//!
//! Both remote collaborators are served by wiremock; the pipeline is wired
//! exactly as the binary wires it, with a fast rate limit.

use crate::errors::{EtlError, TransportError};
use crate::graph::{GraphBatchWriter, GraphSink, MemoryGraphStore};
use crate::mapping::EntityMapper;
use crate::pipeline::{Pipeline, Resource};
use crate::source::{CatalogSource, RateLimiter, SourceClient};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_SIZE: usize = 100;

    async fn mount_page(server: &MockServer, resource: &str, offset: usize, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", resource)))
            .and(query_param("offset", offset.to_string()))
            .and(header("authorization", "Basic c2VjcmV0Og=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn catalog() -> MockServer {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "platforms",
            0,
            json!({ "platforms": [
                { "platform_id": 1, "platform_name": "PC" },
                { "platform_id": 2, "platform_name": "Amiga" }
            ] }),
        )
        .await;
        mount_page(&server, "platforms", 100, json!({ "platforms": [] })).await;
        mount_page(
            &server,
            "genres",
            0,
            json!({ "genres": [{
                "genre_id": 2,
                "genre_name": "Adventure",
                "genre_category": "Basic Genres",
                "genre_category_id": 1,
                "genre_description": "Story-driven exploration"
            }] }),
        )
        .await;
        mount_page(&server, "genres", 100, json!({ "genres": [] })).await;
        mount_page(
            &server,
            "games",
            0,
            json!({ "games": [{ "game_id": 42, "title": "Zork", "description": "<p>West of House</p>" }] }),
        )
        .await;
        mount_page(&server, "games", 100, json!({ "games": [] })).await;
        mount_page(&server, "groups", 0, json!({ "groups": [] })).await;
        server
    }

    fn source_for(server: &MockServer) -> Arc<dyn CatalogSource> {
        let limiter = Arc::new(RateLimiter::per_second(1000.0).unwrap());
        Arc::new(
            SourceClient::new(server.uri(), "secret", limiter, Duration::from_secs(5)).unwrap(),
        )
    }

    fn writer_for(server: &MockServer) -> Arc<dyn GraphSink> {
        Arc::new(
            GraphBatchWriter::new(
                format!("{}/sparql-auth", server.uri()),
                "dba",
                "dba",
                Duration::from_secs(5),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_full_run_writes_one_update_per_non_empty_page() {
        let catalog = catalog().await;
        let store = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sparql-auth"))
            .and(header("authorization", "Basic ZGJhOmRiYQ=="))
            .and(body_string_contains("update=INSERT+DATA"))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&store)
            .await;

        let pipeline = Pipeline::new(
            source_for(&catalog),
            writer_for(&store),
            EntityMapper::default(),
            PAGE_SIZE,
        );
        let summary = pipeline.run_all(false).await.unwrap();

        assert!(summary.is_success());
        // 6 platform + 4 genre + 3 game triples
        assert_eq!(summary.triples_written(), 13);

        catalog.verify().await;
        store.verify().await;
    }

    #[tokio::test]
    async fn test_dry_run_store_collects_every_triple() {
        let catalog = catalog().await;
        let store = Arc::new(MemoryGraphStore::new());

        let pipeline = Pipeline::new(
            source_for(&catalog),
            store.clone(),
            EntityMapper::default(),
            PAGE_SIZE,
        );
        pipeline.run_all(false).await.unwrap();

        assert_eq!(store.len(), 13);
        assert_eq!(store.insert_count(), 3);
        let ntriples = store.snapshot().to_ntriples();
        assert!(ntriples.contains(
            "<http://data.datascienceinstitute.ie/mobygames/platform/2> \
             <http://xmlns.com/foaf/0.1/name> \"Amiga\" ."
        ));
        assert!(ntriples.contains(
            "<http://data.datascienceinstitute.ie/mobygames/genre/2> \
             <http://www.w3.org/2000/01/rdf-schema#label> \"Adventure\"@en ."
        ));
    }

    #[tokio::test]
    async fn test_store_rejection_stops_the_run_at_the_first_page() {
        let catalog = MockServer::start().await;
        mount_page(
            &catalog,
            "platforms",
            0,
            json!({ "platforms": [{ "platform_id": 1, "platform_name": "PC" }] }),
        )
        .await;
        let store = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sparql-auth"))
            .respond_with(ResponseTemplate::new(500).set_body_string("SPARQL syntax error"))
            .expect(1)
            .mount(&store)
            .await;

        let pipeline = Pipeline::new(
            source_for(&catalog),
            writer_for(&store),
            EntityMapper::default(),
            PAGE_SIZE,
        );
        let err = pipeline
            .run_resource(Resource::Platforms)
            .await
            .unwrap_err();

        assert!(matches!(err, EtlError::Page { page: 1, .. }));
        assert!(matches!(
            err.root(),
            EtlError::Transport(TransportError::Status { status: 500, .. })
        ));
        catalog.verify().await;
    }
}
