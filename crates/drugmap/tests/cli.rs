use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<drugbank xmlns="http://www.drugbank.ca" version="5.1">
  <drug type="biotech">
    <drugbank-id primary="true">DB00001</drugbank-id>
    <name>Lepirudin</name>
    <description>Recombinant hirudin.</description>
    <state>liquid</state>
    <indication>Heparin-induced thrombocytopenia.</indication>
    <mechanism-of-action>Binds thrombin.</mechanism-of-action>
    <groups><group>approved</group></groups>
    <synonyms><synonym>Hirudin variant-1</synonym><synonym>Lepirudin recombinant</synonym></synonyms>
    <products>
      <product>
        <name>Refludan</name><labeller>Bayer</labeller><ndc-product-code>50419-150</ndc-product-code>
        <dosage-form>Powder</dosage-form><route>Intravenous</route><strength>50 mg</strength>
        <country>US</country><source>FDA NDC</source>
      </product>
    </products>
    <drug-interactions>
      <drug-interaction>
        <drugbank-id>DB00002</drugbank-id><name>Cetuximab</name>
        <description>Increased bleeding risk.</description>
      </drug-interaction>
    </drug-interactions>
    <pathways>
      <pathway>
        <smpdb-id>SMP0000278</smpdb-id><name>Lepirudin Action Pathway</name><category>drug_action</category>
        <drugs>
          <drug><drugbank-id>DB00001</drugbank-id><name>Lepirudin</name></drug>
          <drug><drugbank-id>DB01373</drugbank-id><name>Calcium</name></drug>
        </drugs>
        <enzymes><uniprot-id>P00734</uniprot-id></enzymes>
      </pathway>
    </pathways>
    <targets>
      <target>
        <id>BE0000048</id><name>Prothrombin</name>
        <polypeptide id="P00734" source="Swiss-Prot">
          <name>Prothrombin</name><gene-name>F2</gene-name>
          <chromosome-location>11</chromosome-location>
          <cellular-location>Secreted</cellular-location>
          <molecular-weight>70036.295</molecular-weight>
          <external-identifiers>
            <external-identifier><resource>GenAtlas</resource><identifier>F2</identifier></external-identifier>
          </external-identifiers>
        </polypeptide>
      </target>
    </targets>
  </drug>
  <drug type="biotech">
    <drugbank-id primary="true">DB00002</drugbank-id>
    <name>Cetuximab</name>
    <description>Chimeric antibody.</description>
    <state>liquid</state>
    <indication>Colorectal cancer.</indication>
    <mechanism-of-action>Binds EGFR.</mechanism-of-action>
    <groups><group>approved</group><group>withdrawn</group></groups>
    <targets>
      <target>
        <id>BE0000767</id><name>EGFR</name>
        <polypeptide id="P00533" source="Swiss-Prot">
          <name>Epidermal growth factor receptor</name><gene-name>EGFR</gene-name>
          <chromosome-location>7</chromosome-location>
          <cellular-location>Cell membrane</cellular-location>
          <molecular-weight>134276.185</molecular-weight>
        </polypeptide>
      </target>
      <target><id>BE0000999</id><name>Unmapped</name></target>
    </targets>
  </drug>
</drugbank>"#;

fn drugmap() -> Command {
    let mut cmd: Command = cargo_bin_cmd!("drugmap").into();
    cmd.env_remove("DRUGMAP_XML");
    cmd.env_remove("DRUGMAP_NAMESPACE");
    cmd.env_remove("DRUGMAP_GENATLAS_RESOURCE");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Writes `content` to a file inside a fresh tempdir. The guard must be kept alive.
fn fixture(content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("drugbank.xml");
    fs::write(&path, content).unwrap();
    (tmp, path)
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let (_tmp, path) = fixture(FIXTURE);
    let output = drugmap()
        .arg("--path")
        .arg(&path)
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    drugmap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("drugmap"));
}

#[test]
fn path_is_required() {
    drugmap()
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--path"));
}

// --- Loading ---

#[test]
fn path_from_environment() {
    let (_tmp, path) = fixture(FIXTURE);
    drugmap()
        .env("DRUGMAP_XML", &path)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"drugs\": 2"));
}

#[test]
fn summary_counts() {
    let summary = json_output(&["summary"]);

    assert_eq!(summary["stats"]["drugs"], 2);
    assert_eq!(summary["stats"]["targets"], 2);
    assert_eq!(summary["stats"]["skipped_targets"], 1);
    assert_eq!(summary["unique_pathways"], 1);
    assert_eq!(summary["approved_not_withdrawn"], 1);
}

#[test]
fn missing_file_reports_io() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("absent.xml");

    drugmap()
        .arg("--path")
        .arg(&path)
        .arg("drugs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: [Io]"))
        .stderr(predicate::str::contains("absent.xml"));
}

#[test]
fn malformed_document_reports_kind() {
    let (_tmp, path) = fixture(r#"<drugbank xmlns="http://www.drugbank.ca"><drug"#);

    drugmap()
        .arg("--path")
        .arg(&path)
        .arg("drugs")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[MalformedDocument]"));
}

#[test]
fn missing_field_reports_kind() {
    let (_tmp, path) = fixture(&FIXTURE.replace("<state>liquid</state>", ""));

    drugmap()
        .arg("--path")
        .arg(&path)
        .arg("drugs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[MissingRequiredField]"))
        .stderr(predicate::str::contains("drugbank.xml"));
}

// --- Tables ---

#[test]
fn drugs_table() {
    let drugs = json_output(&["drugs"]);

    assert_eq!(drugs[0]["DrugBank ID"], "DB00001");
    assert_eq!(drugs[0]["Type"], "biotech");
    assert_eq!(drugs[1]["Food interactions"], "None");
}

#[test]
fn synonyms_by_id_and_name() {
    let by_id = json_output(&["synonyms", "DB00001"]);
    assert_eq!(by_id["Synonyms"][0], "Hirudin variant-1");

    let by_name = json_output(&["synonyms", "Lepirudin"]);
    assert_eq!(by_name["DrugBank ID"], "DB00001");
}

#[test]
fn unknown_drug_suggests() {
    let (_tmp, path) = fixture(FIXTURE);

    drugmap()
        .arg("--path")
        .arg(&path)
        .args(["synonyms", "Lepirudn"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[UnknownDrug]"))
        .stderr(predicate::str::contains("did you mean Lepirudin"));
}

#[test]
fn synonym_graph_is_dot() {
    let (_tmp, path) = fixture(FIXTURE);

    drugmap()
        .arg("--path")
        .arg(&path)
        .args(["synonyms", "DB00001", "--graph"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("graph {"))
        .stdout(predicate::str::contains("Hirudin variant-1"));
}

#[test]
fn products_table() {
    let products = json_output(&["products"]);

    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["Method of application"], "Intravenous");
}

#[test]
fn pathway_tables() {
    let pathways = json_output(&["pathways"]);
    assert_eq!(pathways["count"], 1);

    let rows = json_output(&["pathway-drugs"]);
    assert_eq!(rows[0]["Drug name"], "Lepirudin");
    assert_eq!(rows[1]["DrugBank ID"], "DB01373");
    assert!(rows[1]["Drug name"].is_null());

    let counts = json_output(&["pathway-counts"]);
    assert_eq!(counts[0]["Pathways"], 1);
    assert_eq!(counts[1]["Pathways"], 0);
}

#[test]
fn target_tables() {
    let targets = json_output(&["targets"]);
    assert_eq!(targets[0]["GenAtlas ID"], "F2");
    assert!(targets[1]["GenAtlas ID"].is_null());

    let locations = json_output(&["locations"]);
    assert_eq!(locations.as_array().unwrap().len(), 2);
    assert_eq!(locations[0]["Percentage"], 50.0);
}

#[test]
fn groups_and_interactions() {
    let groups = json_output(&["groups"]);
    assert_eq!(groups["groups"][0]["Group"], "approved");
    assert_eq!(groups["groups"][0]["Drugs"], 2);
    assert_eq!(groups["approved_not_withdrawn"], 1);

    let interactions = json_output(&["interactions"]);
    assert_eq!(interactions[0]["Interacting drug ID"], "DB00002");
}

#[test]
fn gene_lookup() {
    let rows = json_output(&["gene", "F2"]);
    assert_eq!(rows[0]["DrugBank ID"], "DB00001");
    assert_eq!(rows[0]["Products"][0], "Refludan");

    let (_tmp, path) = fixture(FIXTURE);
    drugmap()
        .arg("--path")
        .arg(&path)
        .args(["gene", "F2", "--graph"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"));
}

#[test]
fn weights_report() {
    let report = json_output(&["weights"]);

    assert_eq!(report["locations"][0]["Cellular location"], "Cell membrane");
    assert_eq!(report["locations"][0]["Targets"], 1);
    assert!(report["anova"].is_null());
}
