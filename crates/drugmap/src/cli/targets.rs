use anyhow::Result;
use drugmap_core::analysis::{gene_graph, location_weights, tables, to_dot, weight_anova};
use drugmap_core::analysis::{Anova, DrugIndex, LocationWeights};
use drugmap_core::Catalog;
use serde::Serialize;
use tracing::info;

use super::output::{print_dot, print_json};

pub fn run_targets(catalog: &Catalog) -> Result<()> {
    print_json(&tables::targets(&catalog.targets))
}

pub fn run_locations(catalog: &Catalog) -> Result<()> {
    print_json(&tables::location_shares(&catalog.targets))
}

pub fn run_gene(catalog: &Catalog, gene: &str, graph: bool) -> Result<()> {
    let index = DrugIndex::new(&catalog.drugs);
    let rows = tables::gene_drugs(gene, &catalog.targets, &index);

    if rows.is_empty() {
        info!(gene, "No drug targets this gene");
    }

    if graph {
        print_dot(&to_dot(&gene_graph(gene, &rows)))
    } else {
        print_json(&rows)
    }
}

#[derive(Serialize)]
struct WeightReport {
    locations: Vec<LocationWeights>,
    anova: Option<Anova>,
}

pub fn run_weights(catalog: &Catalog) -> Result<()> {
    print_json(&WeightReport {
        locations: location_weights(&catalog.targets),
        anova: weight_anova(&catalog.targets),
    })
}
