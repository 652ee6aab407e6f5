// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subcommand implementations.
//!
//! Every command writes to caller-supplied sinks so the binary can route
//! generated text and status lines separately.

use crate::Format;
use anyhow::{bail, Context};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uamgen_core::{
    emitter_for, GeneratorConfig, HeaderValues, LayoutEmitter, ObjectLayout, SourceTree,
    TraceError, Unit, UnitAssembler,
};

pub struct GenerateOptions {
    pub source: Option<PathBuf>,
    pub stdout: bool,
    pub check: bool,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn load_tree(path: &Path) -> anyhow::Result<SourceTree> {
    SourceTree::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

// The tree's own source path, else the document path with a `.cs` extension.
fn source_or_document(tree: &SourceTree, document: &Path) -> PathBuf {
    tree.source_file
        .clone()
        .unwrap_or_else(|| document.with_extension("cs"))
}

enum Outcome {
    Skipped,
    Done,
    Stale,
}

/// Generate every tree; `out` receives generated text, `status` progress lines.
///
/// A failing unit is reported and the remaining trees are still processed.
pub fn cmd_generate(
    trees: &[PathBuf],
    config: GeneratorConfig,
    options: &GenerateOptions,
    out: &mut dyn Write,
    status: &mut dyn Write,
) -> anyhow::Result<()> {
    if options.source.is_some() && trees.len() > 1 {
        bail!("--source applies to a single tree, got {}", trees.len());
    }

    let assembler = UnitAssembler::new(config)?;
    let mut stale = 0usize;
    let mut failed = 0usize;

    for document in trees {
        match generate_one(&assembler, document, options, out, status) {
            Ok(Outcome::Stale) => stale += 1,
            Ok(Outcome::Skipped | Outcome::Done) => {}
            Err(e) => {
                tracing::error!("{}: {e:#}", document.display());
                writeln!(status, "[ERROR] {}: {e:#}", document.display())?;
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} unit(s) failed", trees.len());
    }
    if stale > 0 {
        bail!("{stale} generated file(s) out of date");
    }
    Ok(())
}

fn generate_one(
    assembler: &UnitAssembler,
    document: &Path,
    options: &GenerateOptions,
    out: &mut dyn Write,
    status: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let tree = load_tree(document)?;
    let Some(source) = options.source.clone().or_else(|| tree.source_file.clone()) else {
        bail!("no source_file in tree; pass --source");
    };

    let generated = assembler
        .generate(&tree, &source)
        .with_context(|| format!("Generation failed for {}", source.display()))?;
    let Some(generated) = generated else {
        writeln!(status, "[SKIP] {}: nothing to generate", source.display())?;
        return Ok(Outcome::Skipped);
    };

    let output = generated.output_file();
    if options.stdout {
        out.write_all(generated.text.as_bytes())?;
        return Ok(Outcome::Done);
    }

    if options.check {
        let current = match fs::read_to_string(output) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", output.display()))
            }
        };
        if current.as_deref() == Some(generated.text.as_str()) {
            writeln!(status, "[OK] {} is up to date", output.display())?;
            return Ok(Outcome::Done);
        }
        writeln!(status, "[STALE] {}", output.display())?;
        return Ok(Outcome::Stale);
    }

    fs::write(output, &generated.text)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "Generated {} type(s) into {}",
        generated.unit.types.len(),
        output.display()
    );
    writeln!(status, "[OK] Wrote {}", output.display())?;
    Ok(Outcome::Done)
}

fn extract_unit(
    document: &Path,
    config: GeneratorConfig,
) -> anyhow::Result<Option<(PathBuf, Unit)>> {
    let tree = load_tree(document)?;
    let source = source_or_document(&tree, document);
    let generated = UnitAssembler::new(config)?.generate(&tree, &source)?;
    Ok(generated.map(|g| (source, g.unit)))
}

pub fn cmd_inspect(
    document: &Path,
    config: GeneratorConfig,
    format: Format,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some((_, unit)) = extract_unit(document, config)? else {
        writeln!(out, "[SKIP] {}: nothing to generate", document.display())?;
        return Ok(());
    };

    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&unit)?)?,
        Format::Yaml => write!(out, "{}", serde_yaml::to_string(&unit)?)?,
    }
    Ok(())
}

pub fn cmd_trace(
    document: &Path,
    config: GeneratorConfig,
    type_name: &str,
    header: HeaderValues,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some((source, unit)) = extract_unit(document, config)? else {
        bail!(TraceError::UnknownType(type_name.to_string()));
    };
    let ty = unit
        .type_named(type_name)
        .ok_or_else(|| TraceError::UnknownType(type_name.to_string()))?;

    let plan = emitter_for(ty.layout).plan(&ty.fields);
    let accessed = plan.trace(header)?;

    let mut steps: Vec<String> = Vec::new();
    match plan.header() {
        Some(field) => {
            let value = match ty.layout {
                ObjectLayout::Switch => header.discriminator,
                _ => header.mask,
            };
            writeln!(
                out,
                "{} ({:?}, {} = {value}) in {}",
                ty.name,
                ty.layout,
                field.name(),
                source.display()
            )?;
            steps.push(field.name().to_string());
        }
        None => writeln!(out, "{} ({:?}) in {}", ty.name, ty.layout, source.display())?,
    }
    steps.extend(accessed.iter().map(|f| (*f).to_string()));

    // Both directions are rendered from this one plan.
    writeln!(out, "Encode/Decode: {}", steps.join(", "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNION_TREE: &str = r#"{
  "source_file": "Union.cs",
  "namespaces": [{
    "name": "Demo",
    "types": [{
      "name": "Union",
      "modifiers": ["public", "partial"],
      "attributes": [{ "name": "ComplexObjectGenerator", "arguments": ["ComplexObjectType.SwitchField"] }],
      "members": [
        { "member": "field", "modifiers": ["public"], "attributes": [{ "name": "SwitchField", "arguments": ["1"] }], "type": "int", "variables": ["A"] },
        { "member": "field", "modifiers": ["public"], "attributes": [{ "name": "SwitchField", "arguments": ["2", "3"] }], "type": "int", "variables": ["B"] }
      ]
    }]
  }]
}"#;

    const EMPTY_TREE: &str = r#"{ "namespaces": [{ "name": "Demo", "types": [] }] }"#;

    // Tree document whose source_file points into the temp dir.
    fn write_tree(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let source = dir.path().join("Union.cs");
        let body = body.replace(
            "\"source_file\": \"Union.cs\"",
            &format!("\"source_file\": {}", serde_json::to_string(&source).unwrap()),
        );
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            source: None,
            stdout: false,
            check: false,
        }
    }

    fn run_generate(trees: &[PathBuf], options: &GenerateOptions) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let mut status = Vec::new();
        let result = cmd_generate(
            trees,
            GeneratorConfig::default(),
            options,
            &mut out,
            &mut status,
        );
        (result, String::from_utf8(status).unwrap())
    }

    #[test]
    fn test_generate_writes_output_next_to_source() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "union.json", UNION_TREE);

        let (result, status) = run_generate(&[tree], &options());
        result.unwrap();

        let text = fs::read_to_string(dir.path().join("Union.uamgen.cs")).unwrap();
        assert!(text.contains("public partial class Union : ComplexObject"));
        assert!(status.starts_with("[OK] Wrote"));
    }

    #[test]
    fn test_generate_to_stdout_writes_no_file() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "union.json", UNION_TREE);

        let mut out = Vec::new();
        let mut status = Vec::new();
        let opts = GenerateOptions {
            stdout: true,
            ..options()
        };
        cmd_generate(&[tree], GeneratorConfig::default(), &opts, &mut out, &mut status).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("switch (SwitchField)"));
        assert!(!dir.path().join("Union.uamgen.cs").exists());
    }

    #[test]
    fn test_check_detects_stale_output() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "union.json", UNION_TREE);
        let check = GenerateOptions {
            check: true,
            ..options()
        };

        let (result, _) = run_generate(std::slice::from_ref(&tree), &check);
        assert!(result.is_err(), "missing output counts as stale");
        assert!(!dir.path().join("Union.uamgen.cs").exists());

        run_generate(std::slice::from_ref(&tree), &options()).0.unwrap();
        let (result, status) = run_generate(std::slice::from_ref(&tree), &check);
        result.unwrap();
        assert!(status.contains("is up to date"));

        fs::write(dir.path().join("Union.uamgen.cs"), "// edited\n").unwrap();
        let (result, status) = run_generate(&[tree], &check);
        assert!(result.is_err());
        assert!(status.starts_with("[STALE]"));
    }

    #[test]
    fn test_nothing_to_generate_is_skipped() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "empty.json", EMPTY_TREE);
        let opts = GenerateOptions {
            source: Some(dir.path().join("Empty.cs")),
            ..options()
        };

        let (result, status) = run_generate(&[tree], &opts);
        result.unwrap();
        assert!(status.starts_with("[SKIP]"));
        assert!(!dir.path().join("Empty.uamgen.cs").exists());
    }

    #[test]
    fn test_source_is_required() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "empty.json", EMPTY_TREE);
        let (result, status) = run_generate(&[tree], &options());
        assert!(result.is_err());
        assert!(status.starts_with("[ERROR]"));
        assert!(status.contains("--source"));
    }

    #[test]
    fn test_failing_unit_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let bad_source = dir.path().join("Bad.cs");
        let bad_body = UNION_TREE
            .replace(
                "\"source_file\": \"Union.cs\"",
                &format!(
                    "\"source_file\": {}",
                    serde_json::to_string(&bad_source).unwrap()
                ),
            )
            .replace(
                r#""attributes": [{ "name": "SwitchField", "arguments": ["1"] }], "#,
                "",
            );
        let bad = dir.path().join("bad.json");
        fs::write(&bad, bad_body).unwrap();
        let good = write_tree(&dir, "good.json", UNION_TREE);

        let (result, status) = run_generate(&[bad, good], &options());

        let err = result.unwrap_err().to_string();
        assert!(err.contains("1 of 2"), "{err}");
        assert!(status.starts_with("[ERROR]"));
        assert!(status.contains("has no SwitchField attribute"));
        assert!(status.contains("[OK] Wrote"));
        assert!(!dir.path().join("Bad.uamgen.cs").exists());
        assert!(dir.path().join("Union.uamgen.cs").exists());
    }

    #[test]
    fn test_check_reports_unreadable_output() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "union.json", UNION_TREE);
        fs::create_dir(dir.path().join("Union.uamgen.cs")).unwrap();
        let check = GenerateOptions {
            check: true,
            ..options()
        };

        let (result, status) = run_generate(&[tree], &check);
        assert!(result.is_err());
        assert!(status.starts_with("[ERROR]"));
        assert!(status.contains("Failed to read"));
        assert!(!status.contains("[STALE]"));
    }

    #[test]
    fn test_source_override_rejects_multiple_trees() {
        let dir = TempDir::new().unwrap();
        let a = write_tree(&dir, "a.json", UNION_TREE);
        let b = write_tree(&dir, "b.json", UNION_TREE);
        let opts = GenerateOptions {
            source: Some(PathBuf::from("X.cs")),
            ..options()
        };
        assert!(run_generate(&[a, b], &opts).0.is_err());
    }

    #[test]
    fn test_inspect_prints_unit_metadata() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "union.json", UNION_TREE);

        let mut out = Vec::new();
        cmd_inspect(&tree, GeneratorConfig::default(), Format::Json, &mut out).unwrap();

        let unit: Unit = serde_json::from_slice(&out).unwrap();
        assert_eq!(unit.namespace, "Demo");
        assert_eq!(unit.types[0].layout, ObjectLayout::Switch);
        assert_eq!(unit.types[0].fields[1].labels(), ["2", "3"]);
    }

    #[test]
    fn test_trace_follows_discriminator() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "union.json", UNION_TREE);

        let mut out = Vec::new();
        cmd_trace(
            &tree,
            GeneratorConfig::default(),
            "Union",
            HeaderValues::discriminator(3),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Union (Switch, SwitchField = 3)"));
        assert!(text.ends_with("Encode/Decode: SwitchField, B\n"));
    }

    #[test]
    fn test_trace_unknown_type() {
        let dir = TempDir::new().unwrap();
        let tree = write_tree(&dir, "union.json", UNION_TREE);

        let mut out = Vec::new();
        let err = cmd_trace(
            &tree,
            GeneratorConfig::default(),
            "Missing",
            HeaderValues::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown type: Missing"));
    }
}
