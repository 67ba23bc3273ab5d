//! Flat report rows built from extracted entities.
//!
//! Cross-entity references stay textual in the domain model; every join
//! happens here, through [`DrugIndex`].

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::drug::Drug;
use crate::pathway::Pathway;
use crate::record::present;
use crate::target::Target;

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Lookup of drugs by DrugBank ID and by display name.
pub struct DrugIndex<'a> {
    drugs: &'a [Drug],
    by_id: HashMap<&'a str, usize>,
    by_name: HashMap<&'a str, usize>,
}

impl<'a> DrugIndex<'a> {
    #[must_use]
    pub fn new(drugs: &'a [Drug]) -> Self {
        let mut by_id = HashMap::with_capacity(drugs.len());
        let mut by_name = HashMap::with_capacity(drugs.len());

        for (i, drug) in drugs.iter().enumerate() {
            by_id.entry(drug.drug_id.as_str()).or_insert(i);
            by_name.entry(drug.name.as_str()).or_insert(i);
        }

        Self {
            drugs,
            by_id,
            by_name,
        }
    }

    #[must_use]
    pub fn by_id(&self, drug_id: &str) -> Option<&'a Drug> {
        self.by_id.get(drug_id).map(|&i| &self.drugs[i])
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&'a Drug> {
        self.by_name.get(name).map(|&i| &self.drugs[i])
    }

    /// Resolves a textual reference, trying the ID first and then the name.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<&'a Drug> {
        self.by_id(reference).or_else(|| self.by_name(reference))
    }

    /// Closest known IDs and names for an unresolved reference, best first.
    #[must_use]
    pub fn suggest(&self, text: &str, limit: usize) -> Vec<&'a str> {
        let needle = text.to_lowercase();
        let mut scored: Vec<(f64, &'a str)> = self
            .drugs
            .iter()
            .flat_map(|drug| [drug.drug_id.as_str(), drug.name.as_str()])
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut seen = HashSet::new();
        scored
            .into_iter()
            .map(|(_, candidate)| candidate)
            .filter(|candidate| seen.insert(*candidate))
            .take(limit)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugSummaryRow {
    #[serde(rename = "DrugBank ID")]
    pub drug_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub drug_type: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Form")]
    pub form: String,
    #[serde(rename = "Indications")]
    pub indications: String,
    #[serde(rename = "Mechanism of action")]
    pub mechanism_of_action: String,
    #[serde(rename = "Food interactions")]
    pub food_interactions: String,
}

#[must_use]
pub fn drug_summaries(drugs: &[Drug]) -> Vec<DrugSummaryRow> {
    drugs
        .iter()
        .map(|drug| DrugSummaryRow {
            drug_id: drug.drug_id.clone(),
            name: drug.name.clone(),
            drug_type: drug.drug_type.to_string(),
            description: drug.description.clone(),
            form: drug.state.clone(),
            indications: drug.indication.clone(),
            mechanism_of_action: drug.mechanism_of_action.clone(),
            food_interactions: drug.food_interactions.join("\n"),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynonymRow {
    #[serde(rename = "DrugBank ID")]
    pub drug_id: String,
    #[serde(rename = "Synonyms")]
    pub synonyms: Vec<String>,
}

#[must_use]
pub fn synonyms(drugs: &[Drug]) -> Vec<SynonymRow> {
    drugs
        .iter()
        .map(|drug| SynonymRow {
            drug_id: drug.drug_id.clone(),
            synonyms: present(&drug.synonyms).map(String::from).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    #[serde(rename = "DrugBank ID")]
    pub drug_id: String,
    #[serde(rename = "Product name")]
    pub name: String,
    #[serde(rename = "Producer")]
    pub producer: String,
    #[serde(rename = "National Drug Code")]
    pub ndc: String,
    #[serde(rename = "Form")]
    pub form: String,
    #[serde(rename = "Method of application")]
    pub application: String,
    #[serde(rename = "Dose information")]
    pub dosage: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Agency")]
    pub agency: String,
}

/// One row per distinct product of each drug, in document order.
#[must_use]
pub fn products(drugs: &[Drug]) -> Vec<ProductRow> {
    drugs
        .iter()
        .flat_map(|drug| {
            drug.products.iter().map(|product| ProductRow {
                drug_id: drug.drug_id.clone(),
                name: product.name.clone(),
                producer: product.producer.clone(),
                ndc: product.ndc.clone(),
                form: product.form.clone(),
                application: product.application.clone(),
                dosage: product.dosage.clone(),
                country: product.country.clone(),
                agency: product.agency.clone(),
            })
        })
        .collect()
}

/// First occurrence of each pathway ID. Pathways shared by several drugs are
/// extracted once per drug.
#[must_use]
pub fn unique_pathways(pathways: &[Pathway]) -> Vec<&Pathway> {
    let mut seen = HashSet::new();
    pathways
        .iter()
        .filter(|pathway| seen.insert(pathway.id.as_str()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathwayDrugRow {
    #[serde(rename = "Pathway ID")]
    pub pathway_id: String,
    #[serde(rename = "Pathway name")]
    pub pathway_name: String,
    #[serde(rename = "DrugBank ID")]
    pub drug_id: String,
    #[serde(rename = "Drug name")]
    pub drug_name: Option<String>,
}

/// Every pathway→drug reference of the unique pathways. References that do
/// not resolve keep their text as the ID and have no name.
#[must_use]
pub fn pathway_drugs(pathways: &[Pathway], index: &DrugIndex<'_>) -> Vec<PathwayDrugRow> {
    unique_pathways(pathways)
        .into_iter()
        .flat_map(|pathway| {
            pathway.drug_ids().map(move |reference| {
                let drug = index.resolve(reference);
                PathwayDrugRow {
                    pathway_id: pathway.id.clone(),
                    pathway_name: pathway.name.clone(),
                    drug_id: drug.map_or_else(|| reference.to_string(), |d| d.drug_id.clone()),
                    drug_name: drug.map(|d| d.name.clone()),
                }
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathwayCountRow {
    #[serde(rename = "DrugBank ID")]
    pub drug_id: String,
    #[serde(rename = "Drug name")]
    pub drug_name: String,
    #[serde(rename = "Pathways")]
    pub pathways: usize,
}

/// Number of distinct pathways referencing each drug, zero included.
#[must_use]
pub fn pathway_counts(
    drugs: &[Drug],
    pathways: &[Pathway],
    index: &DrugIndex<'_>,
) -> Vec<PathwayCountRow> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for pathway in unique_pathways(pathways) {
        let referenced: HashSet<&str> = pathway
            .drug_ids()
            .filter_map(|reference| index.resolve(reference))
            .map(|drug| drug.drug_id.as_str())
            .collect();
        for drug_id in referenced {
            *counts.entry(drug_id).or_default() += 1;
        }
    }

    drugs
        .iter()
        .map(|drug| PathwayCountRow {
            drug_id: drug.drug_id.clone(),
            drug_name: drug.name.clone(),
            pathways: counts.get(drug.drug_id.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRow {
    #[serde(rename = "DrugBank ID")]
    pub target_id: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "External ID")]
    pub external_id: String,
    #[serde(rename = "Polypeptide name")]
    pub polypeptide_name: String,
    #[serde(rename = "Gene name")]
    pub gene_name: String,
    #[serde(rename = "GenAtlas ID")]
    pub genatlas_id: Option<String>,
    #[serde(rename = "Chromosome number")]
    pub chromosome: String,
    #[serde(rename = "Cellular location")]
    pub cellular_location: String,
}

#[must_use]
pub fn targets(targets: &[Target]) -> Vec<TargetRow> {
    targets
        .iter()
        .map(|target| {
            let pp = &target.polypeptide;
            TargetRow {
                target_id: target.id.clone(),
                source: pp.source.clone(),
                external_id: pp.id.clone(),
                polypeptide_name: pp.name.clone(),
                gene_name: pp.gene_name.clone(),
                genatlas_id: pp.genatlas_id.clone(),
                chromosome: pp.chromosome_location.clone(),
                cellular_location: pp.cellular_location.clone(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationShare {
    #[serde(rename = "Cellular location")]
    pub location: String,
    #[serde(rename = "Targets")]
    pub targets: usize,
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

/// Share of targets per cellular location, most frequent first.
#[must_use]
pub fn location_shares(targets: &[Target]) -> Vec<LocationShare> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for target in targets {
        *counts
            .entry(target.polypeptide.cellular_location.as_str())
            .or_default() += 1;
    }

    let total = targets.len() as f64;
    let mut shares: Vec<LocationShare> = counts
        .into_iter()
        .map(|(location, count)| LocationShare {
            location: location.to_string(),
            targets: count,
            percentage: count as f64 / total * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| b.targets.cmp(&a.targets).then_with(|| a.location.cmp(&b.location)));
    shares
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Drugs")]
    pub drugs: usize,
}

/// Drugs per group in first-seen order. Drugs without groups are not counted.
#[must_use]
pub fn group_counts(drugs: &[Drug]) -> Vec<GroupCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for drug in drugs {
        let groups: IndexSet<&str> = present(&drug.groups).collect();
        for group in groups {
            *counts.entry(group).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(group, drugs)| GroupCount {
            group: group.to_string(),
            drugs,
        })
        .collect()
}

#[must_use]
pub fn approved_not_withdrawn(drugs: &[Drug]) -> usize {
    drugs.iter().filter(|drug| drug.is_marketed()).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionRow {
    #[serde(rename = "DrugBank ID")]
    pub drug_id: String,
    #[serde(rename = "Interacting drug")]
    pub partner_name: String,
    #[serde(rename = "Interacting drug ID")]
    pub partner_id: Option<String>,
    #[serde(rename = "Description")]
    pub description: String,
}

#[must_use]
pub fn interactions(drugs: &[Drug]) -> Vec<InteractionRow> {
    drugs
        .iter()
        .flat_map(|drug| {
            drug.drug_interactions.iter().map(|interaction| InteractionRow {
                drug_id: drug.drug_id.clone(),
                partner_name: interaction.name.clone(),
                partner_id: interaction.drug_id.clone(),
                description: interaction.description.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneDrugRow {
    #[serde(rename = "Gene name")]
    pub gene: String,
    #[serde(rename = "DrugBank ID")]
    pub drug_id: String,
    #[serde(rename = "Drug name")]
    pub drug_name: Option<String>,
    #[serde(rename = "Products")]
    pub products: Vec<String>,
}

/// Drugs with a target whose polypeptide is encoded by `gene`, each with its
/// distinct product names.
#[must_use]
pub fn gene_drugs(gene: &str, targets: &[Target], index: &DrugIndex<'_>) -> Vec<GeneDrugRow> {
    let drug_ids: IndexSet<&str> = targets
        .iter()
        .filter(|target| target.gene_name() == gene)
        .map(|target| target.drug_id.as_str())
        .collect();

    drug_ids
        .into_iter()
        .map(|drug_id| {
            let drug = index.by_id(drug_id);
            let products: IndexSet<&str> = drug
                .into_iter()
                .flat_map(|d| d.products.iter().map(|p| p.name.as_str()))
                .collect();

            GeneDrugRow {
                gene: gene.to_string(),
                drug_id: drug_id.to_string(),
                drug_name: drug.map(|d| d.name.clone()),
                products: products.into_iter().map(String::from).collect(),
            }
        })
        .collect()
}
