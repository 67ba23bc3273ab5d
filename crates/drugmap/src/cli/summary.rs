use anyhow::Result;
use drugmap_core::analysis::tables;
use drugmap_core::{Catalog, IngestStats, SourceDocument};
use serde::Serialize;

use super::output::print_json;

#[derive(Serialize)]
struct Summary<'a> {
    source: &'a SourceDocument,
    stats: &'a IngestStats,
    unique_pathways: usize,
    approved_not_withdrawn: usize,
}

pub fn run(catalog: &Catalog) -> Result<()> {
    print_json(&Summary {
        source: &catalog.source,
        stats: &catalog.stats,
        unique_pathways: tables::unique_pathways(&catalog.pathways).len(),
        approved_not_withdrawn: tables::approved_not_withdrawn(&catalog.drugs),
    })
}
