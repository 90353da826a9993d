//! Pagination loop shared by every resource.
//!
//! One iteration fetches the page at `page * page_size`, maps its records
//! into a fresh [`Batch`], writes the batch, and decides whether to go on.
//! The loop continues while `0 < count <= page_size`: a short page is not
//! taken as the last one, only an empty page ends a listing. A page larger
//! than `page_size` means the API broke its contract and stops the loop.

use crate::errors::{DataIntegrityError, EtlError, Result};
use crate::graph::{Batch, GraphSink, Triple};
use crate::logger;
use crate::source::{CatalogSource, extract_records};
use async_trait::async_trait;
use serde_json::Value;

/// Records per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// What to paginate: request path, response key and fixed query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub path: String,
    /// Top-level response key holding the records.
    pub key: String,
    pub query: Vec<(String, String)>,
    /// Name used in logs and errors.
    pub label: String,
}

impl ResourceDescriptor {
    /// Descriptor whose key and label equal the path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            key: path.clone(),
            label: path.clone(),
            path,
            query: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Why a pagination loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEnd {
    /// A page came back with zero records.
    Exhausted,
    /// The response lacked the record list; the listing may be incomplete.
    MissingKey,
    /// A page held more records than the page size.
    Oversized(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationReport {
    pub label: String,
    /// Source calls issued, including the final one.
    pub calls: usize,
    pub records: usize,
    pub batches_written: usize,
    pub triples_written: usize,
    pub end: PageEnd,
}

impl PaginationReport {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            calls: 0,
            records: 0,
            batches_written: 0,
            triples_written: 0,
            end: PageEnd::Exhausted,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop(PageEnd),
}

/// Loop decision after a page of `count` records.
pub fn next_step(count: usize, page_size: usize) -> Step {
    if count == 0 {
        Step::Stop(PageEnd::Exhausted)
    } else if count > page_size {
        Step::Stop(PageEnd::Oversized(count))
    } else {
        Step::Continue
    }
}

/// Per-resource behaviour plugged into the driver.
#[async_trait]
pub trait PageHandler: Send {
    /// Adds the triples for one page of records to `batch`.
    fn map_page(&mut self, records: &[Value], batch: &mut Batch) -> Result<()>;

    /// Runs after the page's batch has been written.
    async fn after_flush(&mut self, _records: &[Value]) -> Result<()> {
        Ok(())
    }
}

/// Handler applying one mapping rule to each record.
pub struct MapEach<F>(pub F);

#[async_trait]
impl<F> PageHandler for MapEach<F>
where
    F: FnMut(&Value) -> std::result::Result<Vec<Triple>, DataIntegrityError> + Send,
{
    fn map_page(&mut self, records: &[Value], batch: &mut Batch) -> Result<()> {
        for record in records {
            batch.extend((self.0)(record)?);
        }
        Ok(())
    }
}

pub struct PaginationDriver<'a> {
    source: &'a dyn CatalogSource,
    sink: &'a dyn GraphSink,
    page_size: usize,
}

impl<'a> PaginationDriver<'a> {
    pub fn new(source: &'a dyn CatalogSource, sink: &'a dyn GraphSink, page_size: usize) -> Self {
        Self {
            source,
            sink,
            page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Paginates `resource` from offset zero to completion.
    ///
    /// Errors from fetching, mapping, writing or the handler's follow-up
    /// work abort the loop and come back wrapped with the page number.
    pub async fn drive<H>(
        &self,
        resource: &ResourceDescriptor,
        handler: &mut H,
    ) -> Result<PaginationReport>
    where
        H: PageHandler + ?Sized,
    {
        let mut report = PaginationReport::new(&resource.label);
        let mut page = 0usize;

        loop {
            let offset = page * self.page_size;
            page += 1;
            let at_page = |e: EtlError| e.at_page(&resource.label, page);

            let mut body = self
                .source
                .fetch_page(&resource.path, offset, &resource.query)
                .await
                .map_err(at_page)?;
            report.calls += 1;

            let records = match extract_records(&resource.label, &resource.key, &mut body) {
                Ok(records) => records,
                Err(e) => {
                    logger::warn(&format!(
                        "{} on page {}; treating it as empty. Printout follows: {}",
                        e, page, body
                    ));
                    report.end = PageEnd::MissingKey;
                    break;
                }
            };
            let count = records.len();
            report.records += count;
            logger::info(&format!("page {} : {} {}", page, count, resource.label));

            let mut batch = Batch::new();
            handler.map_page(&records, &mut batch).map_err(at_page)?;

            if !batch.is_empty() {
                let triples = batch.len();
                self.sink.insert(batch).await.map_err(at_page)?;
                report.batches_written += 1;
                report.triples_written += triples;
                logger::debug(&format!(
                    "flushed {} triples for {} page {}",
                    triples, resource.label, page
                ));
            }

            handler.after_flush(&records).await.map_err(at_page)?;

            match next_step(count, self.page_size) {
                Step::Continue => {}
                Step::Stop(end) => {
                    if let PageEnd::Oversized(count) = end {
                        logger::warn(&format!(
                            "{} page {} returned {} records, more than the page size {}; stopping",
                            resource.label, page, count, self.page_size
                        ));
                    }
                    report.end = end;
                    break;
                }
            }
        }

        Ok(report)
    }
}
