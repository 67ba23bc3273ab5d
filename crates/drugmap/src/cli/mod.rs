pub mod drugs;
pub mod output;
pub mod pathways;
pub mod summary;
pub mod targets;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use drugmap_core::{Catalog, ExtractionConfig, IngestPipeline};
use thiserror::Error;

#[derive(Parser)]
#[command(
    name = "drugmap",
    about = "Reports over a DrugBank XML export",
    version
)]
pub struct Cli {
    /// DrugBank XML file
    #[arg(long, env = "DRUGMAP_XML")]
    pub path: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Entity counts and source details
    Summary,
    /// Basic information for every drug
    Drugs,
    /// Synonyms of one drug
    Synonyms {
        /// DrugBank ID or drug name
        drug_id: String,
        /// Print a Graphviz star graph instead of JSON
        #[arg(long)]
        graph: bool,
    },
    /// Products of every drug
    Products,
    /// Distinct pathways
    Pathways,
    /// Drugs referenced by each pathway
    PathwayDrugs {
        /// Print a Graphviz bipartite graph instead of JSON
        #[arg(long)]
        graph: bool,
    },
    /// Number of pathways per drug
    PathwayCounts,
    /// Targets and their polypeptides
    Targets,
    /// Share of targets per cellular location
    Locations,
    /// Drugs per group
    Groups,
    /// Drug-drug interactions
    Interactions,
    /// Drugs targeting a gene, with their products
    Gene {
        /// Gene name, e.g. F2
        gene: String,
        /// Print a Graphviz graph instead of JSON
        #[arg(long)]
        graph: bool,
    },
    /// Molecular weight by cellular location, with one-way ANOVA
    Weights,
}

/// A drug reference that matched neither an ID nor a name.
#[derive(Debug, Error)]
#[error("unknown drug '{id}'{}", hint(.suggestions))]
pub struct UnknownDrug {
    pub id: String,
    pub suggestions: Vec<String>,
}

fn hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean {}?", suggestions.join(", "))
    }
}

pub fn load(cli: &Cli) -> Result<Catalog> {
    let pipeline = IngestPipeline::new(ExtractionConfig::from_env());
    Ok(pipeline.load_file(&cli.path)?)
}

pub fn run(cli: &Cli) -> Result<()> {
    let catalog = load(cli)?;

    match &cli.command {
        Commands::Summary => summary::run(&catalog),
        Commands::Drugs => drugs::run_drugs(&catalog),
        Commands::Synonyms { drug_id, graph } => drugs::run_synonyms(&catalog, drug_id, *graph),
        Commands::Products => drugs::run_products(&catalog),
        Commands::Pathways => pathways::run_pathways(&catalog),
        Commands::PathwayDrugs { graph } => pathways::run_pathway_drugs(&catalog, *graph),
        Commands::PathwayCounts => pathways::run_counts(&catalog),
        Commands::Targets => targets::run_targets(&catalog),
        Commands::Locations => targets::run_locations(&catalog),
        Commands::Groups => drugs::run_groups(&catalog),
        Commands::Interactions => drugs::run_interactions(&catalog),
        Commands::Gene { gene, graph } => targets::run_gene(&catalog, gene, *graph),
        Commands::Weights => targets::run_weights(&catalog),
    }
}

/// Condition name shown in the error line.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<drugmap_core::IngestError>() {
        e.kind()
    } else if err.downcast_ref::<UnknownDrug>().is_some() {
        "UnknownDrug"
    } else {
        "Error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_drug_message() {
        let err = UnknownDrug {
            id: "DB9".into(),
            suggestions: vec!["DB0001".into(), "DB0002".into()],
        };
        assert_eq!(err.to_string(), "unknown drug 'DB9'; did you mean DB0001, DB0002?");

        let err = UnknownDrug {
            id: "DB9".into(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown drug 'DB9'");
    }

    #[test]
    fn test_error_kind() {
        let err = anyhow::Error::new(UnknownDrug {
            id: "x".into(),
            suggestions: Vec::new(),
        });
        assert_eq!(error_kind(&err), "UnknownDrug");
        assert_eq!(error_kind(&anyhow::anyhow!("other")), "Error");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["drugmap", "--path", "db.xml", "gene", "F2", "--graph"])
            .unwrap();
        assert_eq!(cli.path, PathBuf::from("db.xml"));
        assert!(matches!(cli.command, Commands::Gene { ref gene, graph: true } if gene == "F2"));
    }
}
