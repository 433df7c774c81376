//! Argument handling, config layering and the end-to-end import pipeline.

use builder_cli::{Args, FileConfig, IdScheme, parse_type, read_input, render, run};
use builder_model::{
    BasicKind, Cardinality, ModelAttribute, NodeValue, StructuredType, TypeDefinition,
};
use builder_registry::Catalog;
use builder_types::NodeId;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

const PERSON: &str = "example.people.Person";

fn catalog_file(dir: &TempDir) -> std::path::PathBuf {
    let person = StructuredType::new("example.people", "Person");
    let address = StructuredType::new("example.people", "Address");
    let catalog = Catalog {
        types: vec![
            TypeDefinition::new(
                person,
                vec![
                    ModelAttribute::basic("name", BasicKind::String, Cardinality::one()),
                    ModelAttribute::structured("address", address.clone(), Cardinality::many()),
                ],
            ),
            TypeDefinition::new(
                address,
                vec![ModelAttribute::basic("city", BasicKind::String, Cardinality::one())],
            ),
        ],
    };
    let path = dir.path().join("types.json");
    std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();
    path
}

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["builder-import"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ── Argument parsing ─────────────────────────────────────────────

#[test]
fn type_is_required() {
    assert!(Args::try_parse_from(["builder-import"]).is_err());
}

#[test]
fn defaults() {
    let args = args(&["--type", PERSON]);
    assert_eq!(args.ids, IdScheme::Uuid);
    assert!(!args.compact);
    assert!(!args.verbose);
    assert!(args.input.is_none());
}

#[test]
fn parses_all_flags() {
    let args = args(&[
        "-t", PERSON, "--ids", "sequential", "--compact", "-v", "--registry-url",
        "http://localhost:8080", "doc.json",
    ]);
    assert_eq!(args.type_name, PERSON);
    assert_eq!(args.ids, IdScheme::Sequential);
    assert!(args.compact);
    assert!(args.verbose);
    assert_eq!(args.registry_url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(args.input.as_deref(), Some(Path::new("doc.json")));
}

#[test]
fn rejects_unknown_id_scheme() {
    assert!(Args::try_parse_from(["builder-import", "-t", PERSON, "--ids", "random"]).is_err());
}

#[test]
fn type_reference_splits_at_last_dot() {
    let ty = parse_type("cdm.base.staticdata.party.Party").unwrap();
    assert_eq!(ty.namespace, "cdm.base.staticdata.party");
    assert_eq!(ty.name, "Party");

    assert!(parse_type("Party").is_err());
    assert!(parse_type("cdm.party.").is_err());
}

// ── Configuration ────────────────────────────────────────────────

#[test]
fn loads_registry_section_from_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[registry]\nbase_url = \"https://types.example.org/api\"\ntimeout_secs = 5"
    )
    .unwrap();

    let config = FileConfig::load(file.path()).unwrap();
    assert_eq!(config.registry.base_url.as_deref(), Some("https://types.example.org/api"));
    assert_eq!(config.registry.timeout_secs, 5);
    assert!(config.registry.catalog_path.is_none());
}

#[test]
fn empty_config_file_uses_defaults() {
    let file = NamedTempFile::new().unwrap();
    let config = FileConfig::load(file.path()).unwrap();
    assert_eq!(config.registry.timeout_secs, 30);
}

#[test]
fn malformed_config_reports_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[registry\nbase_url = 1").unwrap();
    let err = FileConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn flags_override_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[registry]\nbase_url = \"https://from-file\"\ntimeout_secs = 7").unwrap();

    let args = args(&[
        "-t", PERSON, "--config", path_str(file.path()), "--registry-url", "https://from-flag",
    ]);
    let config = args.registry_config().unwrap();
    assert_eq!(config.base_url.as_deref(), Some("https://from-flag"));
    assert_eq!(config.timeout_secs, 7);
}

// ── Import pipeline ──────────────────────────────────────────────

#[tokio::test]
async fn imports_with_catalog_and_sequential_ids() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog_file(&dir);
    let args = args(&["-t", PERSON, "-c", path_str(&catalog), "--ids", "sequential"]);

    let document = json!({
        "address": [{"city": "Lyon"}, {"value": {"city": "Paris"}}],
        "name": {"value": "Ada", "meta": {"scheme": "x"}},
        "age": 36
    })
    .to_string();
    let root = run(&args, &document).await.unwrap();

    let names: Vec<&str> = root.children.iter().map(|n| n.name()).collect();
    assert_eq!(names, vec!["name", "address", "address"]);
    assert_eq!(root.children[0].value(), Some(&NodeValue::from("Ada")));
    assert_eq!(root.children[0].id, NodeId::from_u128(1));
    assert_eq!(root.children[1].id, NodeId::from_u128(2));
    assert_eq!(root.children[1].children()[0].id, NodeId::from_u128(3));
    assert_eq!(
        root.children[2].child("city").unwrap().value(),
        Some(&NodeValue::from("Paris"))
    );
}

#[tokio::test]
async fn missing_registry_source_fails() {
    let args = args(&["-t", PERSON]);
    let err = run(&args, "{}").await.unwrap_err();
    assert!(err.to_string().contains("Failed to set up the type registry"));
}

#[tokio::test]
async fn invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog_file(&dir);
    let args = args(&["-t", PERSON, "-c", path_str(&catalog)]);
    let err = run(&args, "{not json").await.unwrap_err();
    assert_eq!(err.to_string(), "Input is not valid JSON");
}

#[tokio::test]
async fn import_failure_names_the_type_and_cause() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog_file(&dir);
    let args = args(&["-t", "example.people.Robot", "-c", path_str(&catalog)]);

    let err = run(&args, "{}").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to import document as example.people.Robot"
    );
    let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
    assert!(chain.iter().any(|c| c.contains("unknown type: example.people.Robot")));
}

// ── Input and output ─────────────────────────────────────────────

#[test]
fn reads_input_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"name\": \"Ada\"}}").unwrap();
    assert_eq!(read_input(Some(file.path())).unwrap(), "{\"name\": \"Ada\"}");
}

#[test]
fn missing_input_file_fails() {
    let err = read_input(Some(Path::new("/nonexistent/doc.json"))).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read input"));
}

#[tokio::test]
async fn compact_and_pretty_render_the_same_tree() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog_file(&dir);
    let args = args(&["-t", PERSON, "-c", path_str(&catalog)]);
    let root = run(&args, r#"{"name": "Ada"}"#).await.unwrap();

    let compact = render(&root, true).unwrap();
    let pretty = render(&root, false).unwrap();
    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));

    let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
    let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(a, b);
    assert_eq!(a["type"]["name"], "Person");
    assert_eq!(a["children"][0]["value"], "Ada");
}
