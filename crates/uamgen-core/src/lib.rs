// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! uamgen-core -- OPC UA complex object code generator
//!
//! Turns `partial` C# classes marked with `[ComplexObjectGenerator]` into the
//! matching `Encode`/`Decode` overrides for the `ComplexObject` runtime.
//!
//! # Pipeline
//!
//! ```text
//! SourceTree --Extractor--> Unit --LayoutEmitter (per type)--> UnitAssembler --> .uamgen.cs text
//! ```
//!
//! # Layouts
//!
//! | Layout | Header field | Field access |
//! |--------|--------------|--------------|
//! | Generic | none | every field, in order |
//! | Switch | `uint SwitchField` | the field whose labels match the discriminator |
//! | Optional | `uint EncodingMask` | mandatory fields, plus fields whose mask bit is set |
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use uamgen_core::{GeneratorConfig, SourceTree, UnitAssembler};
//!
//! let tree = SourceTree::load(Path::new("Shared/OptionalFields.json"))?;
//! let assembler = UnitAssembler::new(GeneratorConfig::default())?;
//! if let Some(generated) = assembler.generate(&tree, Path::new("Shared/OptionalFields.cs"))? {
//!     std::fs::write(generated.output_file(), &generated.text)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod model;
pub mod plan;
pub mod tree;
pub mod unit;

pub use config::GeneratorConfig;
pub use emit::{emitter_for, Direction, LayoutEmitter};
pub use error::GenError;
pub use extract::Extractor;
pub use model::{
    output_path, CallConvention, FieldMeta, FieldRole, Import, ImportSet, ObjectLayout, TypeMeta,
    Unit, OUTPUT_SUFFIX,
};
pub use plan::{HeaderValues, Plan, TraceError};
pub use tree::SourceTree;
pub use unit::{generate, GeneratedUnit, UnitAssembler};
