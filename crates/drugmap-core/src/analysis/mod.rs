//! Reports derived from a [`crate::Catalog`]: flat tables, weight
//! statistics and node-link graphs.

pub mod graph;
pub mod stats;
pub mod tables;

pub use graph::{
    gene_graph, pathway_drug_graph, synonym_graph, to_dot, DrugGraph, GraphNode, NodeKind,
    Relation,
};
pub use stats::{location_weights, one_way_anova, weight_anova, Anova, LocationWeights};
pub use tables::DrugIndex;
