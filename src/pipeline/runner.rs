//! Runs the resolvers in their fixed order.

use crate::errors::{EtlError, Result};
use crate::graph::GraphSink;
use crate::logger;
use crate::mapping::EntityMapper;
use crate::pipeline::driver::{PageEnd, PaginationDriver, PaginationReport};
use crate::pipeline::resolvers;
use crate::source::CatalogSource;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Resource {
    Platforms,
    Genres,
    Games,
    Groups,
}

impl Resource {
    /// Order of a full run.
    pub const RUN_ORDER: [Resource; 4] = [
        Resource::Platforms,
        Resource::Genres,
        Resource::Games,
        Resource::Groups,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Platforms => "platforms",
            Resource::Genres => "genres",
            Resource::Games => "games",
            Resource::Groups => "groups",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`Pipeline::run_all`].
#[derive(Debug, Default)]
pub struct RunSummary {
    pub completed: Vec<(Resource, Vec<PaginationReport>)>,
    pub failures: Vec<(Resource, EtlError)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn triples_written(&self) -> usize {
        self.completed
            .iter()
            .flat_map(|(_, reports)| reports)
            .map(|report| report.triples_written)
            .sum()
    }
}

pub struct Pipeline {
    source: Arc<dyn CatalogSource>,
    sink: Arc<dyn GraphSink>,
    mapper: EntityMapper,
    page_size: usize,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        sink: Arc<dyn GraphSink>,
        mapper: EntityMapper,
        page_size: usize,
    ) -> Self {
        Self {
            source,
            sink,
            mapper,
            page_size,
        }
    }

    fn driver(&self) -> PaginationDriver<'_> {
        PaginationDriver::new(self.source.as_ref(), self.sink.as_ref(), self.page_size)
    }

    /// Runs one resolver; games are fetched with full details.
    pub async fn run_resource(&self, resource: Resource) -> Result<Vec<PaginationReport>> {
        self.run_with_details(resource, true).await
    }

    /// Like [`Pipeline::run_resource`], choosing the games listing format.
    pub async fn run_with_details(
        &self,
        resource: Resource,
        game_details: bool,
    ) -> Result<Vec<PaginationReport>> {
        logger::info(&format!("resolving {}", resource));
        let driver = self.driver();
        let reports = match resource {
            Resource::Platforms => vec![resolvers::platforms(&driver, &self.mapper).await?],
            Resource::Genres => vec![resolvers::genres(&driver, &self.mapper).await?],
            Resource::Games => {
                vec![resolvers::games(&driver, &self.mapper, game_details).await?]
            }
            Resource::Groups => resolvers::groups(&driver, &self.mapper).await?,
        };
        for report in &reports {
            log_report(report);
        }
        Ok(reports)
    }

    /// Runs every resolver in [`Resource::RUN_ORDER`].
    ///
    /// Without `continue_on_error` the first failure is returned as is and
    /// later resolvers never start. With it, failures are logged, collected
    /// in the summary and the run moves on.
    pub async fn run_all(&self, continue_on_error: bool) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for resource in Resource::RUN_ORDER {
            match self.run_resource(resource).await {
                Ok(reports) => summary.completed.push((resource, reports)),
                Err(e) => {
                    logger::error(&format!("{} resolver failed: {}", resource, e));
                    if !continue_on_error {
                        return Err(e);
                    }
                    summary.failures.push((resource, e));
                }
            }
        }
        Ok(summary)
    }
}

fn log_report(report: &PaginationReport) {
    let ending = match report.end {
        PageEnd::Exhausted => String::from("exhausted"),
        PageEnd::MissingKey => String::from("response without record list"),
        PageEnd::Oversized(count) => format!("oversized page of {} records", count),
    };
    logger::info(&format!(
        "{} finished after {} calls: {} records, {} triples in {} batches ({})",
        report.label,
        report.calls,
        report.records,
        report.triples_written,
        report.batches_written,
        ending
    ));
}
