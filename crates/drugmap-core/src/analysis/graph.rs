//! Node-link graphs over report rows, exported as Graphviz DOT.

use std::collections::HashMap;
use std::fmt;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::{EdgeType, Graph};

use super::tables::{GeneDrugRow, PathwayDrugRow};
use crate::drug::Drug;
use crate::record::present;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Drug,
    Synonym,
    Pathway,
    Gene,
    Product,
}

impl NodeKind {
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Drug => "lightgreen",
            Self::Synonym => "lightgrey",
            Self::Pathway => "orange",
            Self::Gene => "skyblue",
            Self::Product => "pink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub kind: NodeKind,
    pub label: String,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    SynonymOf,
    Involves,
    TargetedBy,
    MarketedAs,
}

impl Relation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SynonymOf => "synonym of",
            Self::Involves => "involves",
            Self::TargetedBy => "targeted by",
            Self::MarketedAs => "marketed as",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type DrugGraph<Ty> = Graph<GraphNode, Relation, Ty>;

/// Adds nodes keyed by kind and label so repeated references share a node.
struct Builder<Ty: EdgeType> {
    graph: DrugGraph<Ty>,
    nodes: HashMap<(NodeKind, String), NodeIndex>,
}

impl<Ty: EdgeType> Builder<Ty> {
    fn new() -> Self {
        Self {
            graph: Graph::default(),
            nodes: HashMap::new(),
        }
    }

    fn node(&mut self, kind: NodeKind, label: &str) -> NodeIndex {
        let graph = &mut self.graph;
        *self
            .nodes
            .entry((kind, label.to_string()))
            .or_insert_with(|| {
                graph.add_node(GraphNode {
                    kind,
                    label: label.to_string(),
                })
            })
    }

    fn edge(&mut self, from: NodeIndex, to: NodeIndex, relation: Relation) {
        self.graph.update_edge(from, to, relation);
    }

    fn finish(self) -> DrugGraph<Ty> {
        self.graph
    }
}

/// The drug at the center, one leaf per synonym.
#[must_use]
pub fn synonym_graph(drug: &Drug) -> UnGraph<GraphNode, Relation> {
    let mut builder = Builder::new();
    let center = builder.node(NodeKind::Drug, &drug.drug_id);

    for synonym in present(&drug.synonyms) {
        let leaf = builder.node(NodeKind::Synonym, synonym);
        builder.edge(center, leaf, Relation::SynonymOf);
    }

    builder.finish()
}

/// Pathways on one side, the drugs they reference on the other. Resolved
/// drugs are labelled by name.
#[must_use]
pub fn pathway_drug_graph(rows: &[PathwayDrugRow]) -> UnGraph<GraphNode, Relation> {
    let mut builder = Builder::new();

    for row in rows {
        let pathway = builder.node(NodeKind::Pathway, &row.pathway_name);
        let drug = builder.node(NodeKind::Drug, row.drug_name.as_deref().unwrap_or(&row.drug_id));
        builder.edge(pathway, drug, Relation::Involves);
    }

    builder.finish()
}

/// gene → drugs targeting it → their distinct products.
#[must_use]
pub fn gene_graph(gene: &str, rows: &[GeneDrugRow]) -> DiGraph<GraphNode, Relation> {
    let mut builder = Builder::new();
    let root = builder.node(NodeKind::Gene, gene);

    for row in rows {
        let drug = builder.node(NodeKind::Drug, &row.drug_id);
        builder.edge(root, drug, Relation::TargetedBy);

        for product in &row.products {
            let product = builder.node(NodeKind::Product, product);
            builder.edge(drug, product, Relation::MarketedAs);
        }
    }

    builder.finish()
}

#[must_use]
pub fn to_dot<Ty: EdgeType>(graph: &DrugGraph<Ty>) -> String {
    Dot::with_attr_getters(
        graph,
        &[Config::EdgeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| format!("style = filled, fillcolor = {}", node.kind.color()),
    )
    .to_string()
}
