// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Unit assembly.
//!
//! Runs extraction once per source unit, renders every type with its layout
//! emitter and builds the generated file:
//!
//! ```text
//! banner
//!
//! using ...;
//!
//! namespace N
//! {
//!     type blocks, separated by a blank line
//! }
//! ```

use crate::config::GeneratorConfig;
use crate::emit::{emitter_for, CodeWriter};
use crate::error::GenError;
use crate::extract::Extractor;
use crate::model::{CallConvention, Import, ObjectLayout, Unit};
use crate::tree::SourceTree;
use std::path::Path;
use tera::{Context, Tera};

/// Runtime types namespace, always imported.
pub const TYPES_IMPORT: &str = "GodSharp.Extensions.Opc.Ua.Types";
/// OPC UA stack namespace, always imported.
pub const OPC_UA_IMPORT: &str = "Opc.Ua";
/// Extension-method encoders, imported for `InstanceExtension` types.
pub const EXTENSION_IMPORT: &str = "GodSharp.Extensions.Opc.Ua.Types.Encodings";
/// Static factory encoders, imported (`using static`) for `StaticFactory` types.
pub const FACTORY_IMPORT: &str = "GodSharp.Extensions.Opc.Ua.Types.Encodings.EncodingFactory";
/// Helpers needed by the selector overload of `WithOptionalField`.
pub const OPTIONAL_IMPORTS: [&str; 3] = [
    "GodSharp.Extensions.Opc.Ua.Utilities",
    "System.Linq.Expressions",
    "System",
];

const BANNER: &str = "banner";

/// Generated text for one unit, with the metadata it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub unit: Unit,
    pub text: String,
}

impl GeneratedUnit {
    pub fn output_file(&self) -> &Path {
        &self.unit.output_file
    }
}

pub struct UnitAssembler {
    extractor: Extractor,
    tera: Tera,
}

impl UnitAssembler {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenError> {
        let extractor = Extractor::new(&config)?;

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(BANNER, &config.banner_template)?;

        Ok(Self { extractor, tera })
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.extractor.config()
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Generate one unit. `Ok(None)` means there is nothing to generate.
    pub fn generate(
        &self,
        tree: &SourceTree,
        source: &Path,
    ) -> Result<Option<GeneratedUnit>, GenError> {
        let Some(mut unit) = self.extractor.extract(tree, source)? else {
            tracing::debug!("Skipping {}: nothing to generate", source.display());
            return Ok(None);
        };

        accumulate_imports(&mut unit, &tree.imports);
        let text = self.render(&unit)?;

        tracing::debug!(
            "Generated {} type(s) for {}",
            unit.types.len(),
            source.display()
        );
        Ok(Some(GeneratedUnit { unit, text }))
    }

    /// Render the complete file text for an already assembled unit.
    pub fn render(&self, unit: &Unit) -> Result<String, GenError> {
        let mut out = self.render_banner(unit)?;
        out.push('\n');

        for import in &unit.imports {
            out.push_str(&import.to_string());
            out.push('\n');
        }
        if !unit.imports.is_empty() {
            out.push('\n');
        }

        out.push_str(&format!("namespace {}\n{{\n", unit.namespace));

        let mut w = CodeWriter::with_depth(1);
        for (idx, ty) in unit.types.iter().enumerate() {
            if idx > 0 {
                w.blank();
            }
            emitter_for(ty.layout).emit_type(ty, &mut w);
        }
        out.push_str(w.as_str());

        out.push_str("}\n");
        Ok(out)
    }

    fn render_banner(&self, unit: &Unit) -> Result<String, GenError> {
        let source_name = unit
            .source_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut ctx = Context::new();
        ctx.insert("generator", &self.config().generator_name);
        ctx.insert("source", &source_name);
        ctx.insert("source_path", &unit.source_file.display().to_string());
        ctx.insert("output", &unit.output_file.display().to_string());
        ctx.insert("namespace", &unit.namespace);

        let rendered = self.tera.render(BANNER, &ctx)?;
        let mut banner = rendered
            .trim_end_matches(|c| c == '\n' || c == '\r')
            .to_string();
        banner.push('\n');
        Ok(banner)
    }
}

/// Fill the unit's import set: the source unit's own imports first, then the
/// runtime imports its types need.
pub fn accumulate_imports(unit: &mut Unit, source_imports: &[Import]) {
    unit.imports.extend(source_imports.iter().cloned());

    let mut required = vec![
        Import::namespace(TYPES_IMPORT),
        Import::namespace(OPC_UA_IMPORT),
    ];

    if unit.uses_convention(CallConvention::InstanceExtension) {
        required.push(Import::namespace(EXTENSION_IMPORT));
    }
    if unit.uses_convention(CallConvention::StaticFactory) {
        required.push(Import::static_class(FACTORY_IMPORT));
    }
    if unit.uses_layout(ObjectLayout::Optional) {
        required.extend(OPTIONAL_IMPORTS.iter().map(|path| Import::namespace(*path)));
    }

    unit.imports.extend(required);
}

/// Extract and render one unit with a fresh assembler.
pub fn generate(
    tree: &SourceTree,
    source: &Path,
    config: &GeneratorConfig,
) -> Result<Option<GeneratedUnit>, GenError> {
    UnitAssembler::new(config.clone())?.generate(tree, source)
}
