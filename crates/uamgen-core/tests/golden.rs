// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generated text checked against committed `.uamgen.cs` files.

mod common;

use common::{fixture_path, golden};
use std::path::Path;
use uamgen_core::{GeneratorConfig, SourceTree, UnitAssembler};

fn generate(fixture: &str, config: GeneratorConfig) -> uamgen_core::GeneratedUnit {
    let tree = SourceTree::load(&fixture_path(fixture)).expect("load fixture");
    let source = tree.source_file.clone().expect("fixture names its source");
    UnitAssembler::new(config)
        .expect("assembler")
        .generate(&tree, &source)
        .expect("generate")
        .expect("unit has candidate types")
}

#[test]
fn test_optional_fields_matches_golden() {
    let config = GeneratorConfig::default().with_generator_name("MSBuild");
    let generated = generate("optional_fields.json", config);

    assert_eq!(
        generated.output_file(),
        Path::new("Shared/OptionalFields.uamgen.cs")
    );
    assert_eq!(generated.text, golden("optional_fields.uamgen.cs"));
}

#[test]
fn test_mixed_unit_matches_golden() {
    let generated = generate("mixed_unit.yaml", GeneratorConfig::default());

    let names: Vec<&str> = generated.unit.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Reading", "Location"]);
    assert_eq!(generated.output_file(), Path::new("Models/Mixed.uamgen.cs"));
    assert_eq!(generated.text, golden("mixed_unit.uamgen.cs"));
}

#[test]
fn test_generated_text_uses_tabs_and_lf() {
    let generated = generate("mixed_unit.yaml", GeneratorConfig::default());

    assert!(!generated.text.contains('\r'));
    assert!(generated.text.ends_with("}\n"));
    for line in generated.text.lines() {
        assert!(!line.starts_with(' '), "space indented line: {line:?}");
        assert_eq!(line, line.trim_end(), "trailing whitespace: {line:?}");
    }
}
