//! End-to-end tests for the modelsmith binary

// Internal imports (std, crate)
use std::path::Path;
use std::process::{Command, Output};

// External imports (alphabetized)
use anyhow::{Context, Result};
use tempfile::TempDir;

const BANNER_YAML: &str = r#"
template: component
package: com.example.core.models
class_name: Banner
resource_type: site/components/banner
license_holder: Example Corp
fields:
  - name: title
    type: String
  - name: label
    type: String
    default_value: N/A
"#;

fn run(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_modelsmith"))
        .args(args)
        .output()
        .context("Failed to run modelsmith")
}

fn write_descriptor(dir: &Path, name: &str, contents: &str) -> Result<String> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path.to_string_lossy().to_string())
}

#[test]
fn model_from_descriptor_writes_package_path() -> Result<()> {
    let temp = TempDir::new()?;
    let descriptor = write_descriptor(temp.path(), "banner.yaml", BANNER_YAML)?;
    let out_dir = temp.path().join("out");

    let output = run(&[
        "model",
        "--descriptor",
        &descriptor,
        "--output-dir",
        &out_dir.to_string_lossy(),
    ])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let generated = out_dir.join("com/example/core/models/Banner.java");
    let contents = std::fs::read_to_string(&generated)?;
    assert!(contents.contains("public class Banner {"));
    assert!(contents.contains("Example Corp"));
    assert!(contents.contains("defaultValue = \"N/A\""));
    assert!(contents.contains("resourceType = \"site/components/banner\""));
    Ok(())
}

#[test]
fn existing_file_needs_force() -> Result<()> {
    let temp = TempDir::new()?;
    let descriptor = write_descriptor(temp.path(), "banner.yaml", BANNER_YAML)?;
    let out_dir = temp.path().join("out");
    let out = out_dir.to_string_lossy().to_string();
    let args = ["model", "--descriptor", descriptor.as_str(), "--output-dir", out.as_str()];

    assert!(run(&args)?.status.success());

    let second = run(&args)?;
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let mut forced = args.to_vec();
    forced.push("--force");
    assert!(run(&forced)?.status.success());
    Ok(())
}

#[test]
fn model_to_stdout_without_license() -> Result<()> {
    let temp = TempDir::new()?;
    let descriptor = write_descriptor(
        temp.path(),
        "hero.json",
        r#"{
  "template": "dual-context-entity",
  "package": "com.example",
  "class_name": "Hero",
  "fields": [{ "name": "title", "type": "String" }]
}"#,
    )?;

    let output = run(&[
        "model",
        "--descriptor",
        &descriptor,
        "--stdout",
        "--no-license",
        "--fallback",
        "propagate",
    ])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("package com.example;"));
    assert!(stdout.contains("throw new IllegalStateException("));
    Ok(())
}

#[test]
fn invalid_binding_is_reported() -> Result<()> {
    let temp = TempDir::new()?;
    let descriptor = write_descriptor(
        temp.path(),
        "bad.toml",
        r#"
package = "com.example"
class_name = "Bad"

[[fields]]
name = "title"
type = "String"
binding = "magic"
"#,
    )?;

    let output = run(&["model", "--descriptor", &descriptor, "--stdout"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported binding kind: magic"));
    Ok(())
}

#[test]
fn schema_with_fields() -> Result<()> {
    let temp = TempDir::new()?;
    let output = run(&[
        "schema",
        "--name",
        "GetProduct",
        "--field",
        "sku:String:required:Stock keeping unit",
        "--field",
        "price:Float",
        "--output-dir",
        &temp.path().to_string_lossy(),
    ])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let contents = std::fs::read_to_string(temp.path().join("GetProduct.graphql"))?;
    assert!(contents.contains("    sku: String! # Stock keeping unit\n    price: Float\n}"));
    assert!(contents.contains("query GetProductQuery($id: ID!)"));
    Ok(())
}

#[test]
fn schema_rejects_malformed_fields() -> Result<()> {
    let temp = TempDir::new()?;
    let out = temp.path().to_string_lossy().to_string();

    for field in ["bad name:String", "sku:Str ing"] {
        let output = run(&[
            "schema",
            "--name",
            "Product",
            "--field",
            field,
            "--output-dir",
            &out,
        ])?;
        assert!(!output.status.success(), "{field} was accepted");
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid identifier"));
    }
    assert!(!temp.path().join("Product.graphql").exists());
    Ok(())
}

#[test]
fn unreadable_output_path_is_an_error() -> Result<()> {
    let temp = TempDir::new()?;
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, "not a directory")?;

    let output = run(&[
        "schema",
        "--name",
        "Product",
        "--output-dir",
        &blocker.to_string_lossy(),
    ])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to check"));
    Ok(())
}

#[test]
fn snippets_show_and_export() -> Result<()> {
    let output = run(&["snippets", "show", "data-sly-test"])?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?.trim_end(),
        "data-sly-test=\"${1:condition}\""
    );

    assert!(!run(&["snippets", "show", "data-sly-nope"])?.status.success());

    let temp = TempDir::new()?;
    let path = temp.path().join("snippets/htl.json");
    let output = run(&["snippets", "export", "--output", &path.to_string_lossy()])?;
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(json["data-sly-list"]["description"], "List iteration");
    Ok(())
}

#[test]
fn templates_lists_every_kind() -> Result<()> {
    let output = run(&["templates"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    for key in [
        "base-entity",
        "request-context-entity",
        "exporting-entity",
        "dual-context-entity",
        "helper-entity",
    ] {
        assert!(stdout.contains(key), "missing {key}");
    }
    Ok(())
}
