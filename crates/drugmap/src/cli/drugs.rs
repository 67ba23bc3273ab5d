use anyhow::Result;
use drugmap_core::analysis::{synonym_graph, tables, to_dot, DrugIndex};
use drugmap_core::Catalog;
use serde::Serialize;

use super::output::{print_dot, print_json};
use super::UnknownDrug;

const SUGGESTIONS: usize = 3;

pub fn run_drugs(catalog: &Catalog) -> Result<()> {
    print_json(&tables::drug_summaries(&catalog.drugs))
}

pub fn run_synonyms(catalog: &Catalog, reference: &str, graph: bool) -> Result<()> {
    let index = DrugIndex::new(&catalog.drugs);
    let Some(drug) = index.resolve(reference) else {
        return Err(UnknownDrug {
            id: reference.to_string(),
            suggestions: index
                .suggest(reference, SUGGESTIONS)
                .into_iter()
                .map(String::from)
                .collect(),
        }
        .into());
    };

    if graph {
        return print_dot(&to_dot(&synonym_graph(drug)));
    }

    let rows = tables::synonyms(std::slice::from_ref(drug));
    print_json(&rows[0])
}

pub fn run_products(catalog: &Catalog) -> Result<()> {
    print_json(&tables::products(&catalog.drugs))
}

#[derive(Serialize)]
struct GroupReport {
    groups: Vec<tables::GroupCount>,
    approved_not_withdrawn: usize,
}

pub fn run_groups(catalog: &Catalog) -> Result<()> {
    print_json(&GroupReport {
        groups: tables::group_counts(&catalog.drugs),
        approved_not_withdrawn: tables::approved_not_withdrawn(&catalog.drugs),
    })
}

pub fn run_interactions(catalog: &Catalog) -> Result<()> {
    print_json(&tables::interactions(&catalog.drugs))
}
