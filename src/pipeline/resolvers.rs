//! One resolver per catalog resource.
//!
//! Each resolver pairs a [`ResourceDescriptor`] with the mapping rule for
//! its records and hands both to the pagination driver. Groups add a
//! second, nested pagination over the games of every group.

use crate::errors::Result;
use crate::graph::Batch;
use crate::logger;
use crate::mapping::{EntityMapper, RecordType};
use crate::pipeline::driver::{
    MapEach, PageHandler, PaginationDriver, PaginationReport, ResourceDescriptor,
};
use async_trait::async_trait;
use serde_json::Value;

/// Paginates `descriptor`, mapping every record as `record_type`.
async fn map_listing(
    driver: &PaginationDriver<'_>,
    mapper: &EntityMapper,
    descriptor: ResourceDescriptor,
    record_type: RecordType,
) -> Result<PaginationReport> {
    driver
        .drive(
            &descriptor,
            &mut MapEach(|record: &Value| mapper.map(record_type, record)),
        )
        .await
}

pub async fn platforms(
    driver: &PaginationDriver<'_>,
    mapper: &EntityMapper,
) -> Result<PaginationReport> {
    let descriptor = ResourceDescriptor::new("platforms");
    map_listing(driver, mapper, descriptor, RecordType::Platform).await
}

pub async fn genres(
    driver: &PaginationDriver<'_>,
    mapper: &EntityMapper,
) -> Result<PaginationReport> {
    let descriptor = ResourceDescriptor::new("genres");
    map_listing(driver, mapper, descriptor, RecordType::Genre).await
}

/// Games with full records (`format=normal`) or bare ids (`format=id`).
pub async fn games(
    driver: &PaginationDriver<'_>,
    mapper: &EntityMapper,
    details: bool,
) -> Result<PaginationReport> {
    if details {
        let descriptor = ResourceDescriptor::new("games").with_param("format", "normal");
        map_listing(driver, mapper, descriptor, RecordType::Game).await
    } else {
        let descriptor = ResourceDescriptor::new("games")
            .with_param("format", "id")
            .with_label("game ids");
        map_listing(driver, mapper, descriptor, RecordType::GameId).await
    }
}

/// Groups, then the member games of every group on each page.
///
/// The first report covers the group listing; one report per group follows.
pub async fn groups(
    driver: &PaginationDriver<'_>,
    mapper: &EntityMapper,
) -> Result<Vec<PaginationReport>> {
    let descriptor = ResourceDescriptor::new("groups");
    let mut handler = GroupPages {
        driver,
        mapper,
        members: Vec::new(),
    };
    let report = driver.drive(&descriptor, &mut handler).await?;

    let mut reports = Vec::with_capacity(handler.members.len() + 1);
    reports.push(report);
    reports.extend(handler.members);
    Ok(reports)
}

/// Descriptor of the member listing of one group.
pub fn group_members_descriptor(group_id: u64) -> ResourceDescriptor {
    ResourceDescriptor::new("games")
        .with_param("group", group_id.to_string())
        .with_param("format", "id")
        .with_label(format!("games of group {}", group_id))
}

struct GroupPages<'d, 'm> {
    driver: &'d PaginationDriver<'d>,
    mapper: &'m EntityMapper,
    members: Vec<PaginationReport>,
}

#[async_trait]
impl PageHandler for GroupPages<'_, '_> {
    fn map_page(&mut self, records: &[Value], batch: &mut Batch) -> Result<()> {
        for record in records {
            batch.extend(self.mapper.map(RecordType::Group, record)?);
        }
        Ok(())
    }

    async fn after_flush(&mut self, records: &[Value]) -> Result<()> {
        for record in records {
            let group_id = self.mapper.group_id(record)?;
            let mut handler = GroupMembers {
                mapper: self.mapper,
                group: record,
                group_id,
            };
            let report = self
                .driver
                .drive(&group_members_descriptor(group_id), &mut handler)
                .await?;
            self.members.push(report);
        }
        Ok(())
    }
}

struct GroupMembers<'a> {
    mapper: &'a EntityMapper,
    group: &'a Value,
    group_id: u64,
}

#[async_trait]
impl PageHandler for GroupMembers<'_> {
    fn map_page(&mut self, records: &[Value], batch: &mut Batch) -> Result<()> {
        logger::info(&format!(
            "group {} has {} games left to process",
            self.group_id,
            records.len()
        ));
        if records.is_empty() {
            return Ok(());
        }
        batch.extend(self.mapper.group_membership(self.group, records)?);
        Ok(())
    }
}
