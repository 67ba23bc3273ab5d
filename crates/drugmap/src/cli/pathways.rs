use anyhow::Result;
use drugmap_core::analysis::{pathway_drug_graph, tables, to_dot, DrugIndex};
use drugmap_core::{Catalog, Pathway};
use serde::Serialize;

use super::output::{print_dot, print_json};

#[derive(Serialize)]
struct PathwayReport<'a> {
    count: usize,
    pathways: Vec<&'a Pathway>,
}

pub fn run_pathways(catalog: &Catalog) -> Result<()> {
    let pathways = tables::unique_pathways(&catalog.pathways);
    print_json(&PathwayReport {
        count: pathways.len(),
        pathways,
    })
}

pub fn run_pathway_drugs(catalog: &Catalog, graph: bool) -> Result<()> {
    let index = DrugIndex::new(&catalog.drugs);
    let rows = tables::pathway_drugs(&catalog.pathways, &index);

    if graph {
        print_dot(&to_dot(&pathway_drug_graph(&rows)))
    } else {
        print_json(&rows)
    }
}

pub fn run_counts(catalog: &Catalog) -> Result<()> {
    let index = DrugIndex::new(&catalog.drugs);
    print_json(&tables::pathway_counts(
        &catalog.drugs,
        &catalog.pathways,
        &index,
    ))
}
