// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;
use uamgen_core::{GeneratorConfig, SourceTree, UnitAssembler};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tree) = SourceTree::from_json(text) else {
        return;
    };
    let Ok(assembler) = UnitAssembler::new(GeneratorConfig::default()) else {
        return;
    };

    let source = tree
        .source_file
        .clone()
        .unwrap_or_else(|| Path::new("Fuzz.cs").to_path_buf());

    // Schema errors are fine; panics are not.
    if let Ok(Some(generated)) = assembler.generate(&tree, &source) {
        assert!(generated.text.ends_with("}\n"));
    }
});
