// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Metadata model for one source unit.
//!
//! Built in a single pass by the extractor and handed to emission. Field
//! order is declaration order and fixes wire order; nothing here sorts or
//! deduplicates fields.

mod import;

pub use import::{Import, ImportSet};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Suffix of every generated file.
pub const OUTPUT_SUFFIX: &str = ".uamgen.cs";

/// Name of the discriminator storage field emitted for switch layouts.
pub const SWITCH_FIELD: &str = "SwitchField";

/// Name of the presence mask storage field emitted for optional layouts.
pub const ENCODING_MASK: &str = "EncodingMask";

/// Structural strategy mapping a type's fields to wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectLayout {
    /// Every field, unconditionally, in order.
    #[default]
    Generic,
    /// Discriminated record: one field active, selected by `SwitchField`.
    Switch,
    /// Mandatory core plus bitmask-gated tail, selected by `EncodingMask`.
    Optional,
}

impl ObjectLayout {
    /// Resolve a `ComplexObjectType` member name.
    pub fn from_member(member: &str) -> Option<Self> {
        match member {
            "EncodeableObject" => Some(Self::Generic),
            "SwitchField" => Some(Self::Switch),
            "OptionalField" => Some(Self::Optional),
            _ => None,
        }
    }

    /// Storage field the layout adds to the generated type, if any.
    pub const fn header_field(self) -> Option<&'static str> {
        match self {
            Self::Generic => None,
            Self::Switch => Some(SWITCH_FIELD),
            Self::Optional => Some(ENCODING_MASK),
        }
    }
}

/// Shape of the runtime read/write calls in generated bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallConvention {
    /// `Encoding.Write(encoder, F, ...)`
    #[default]
    StaticFactory,
    /// `encoder.Write(F, ...)`
    InstanceExtension,
}

impl CallConvention {
    /// Resolve an `EncodingMethodType` member name.
    pub fn from_member(member: &str) -> Option<Self> {
        match member {
            "Factory" => Some(Self::StaticFactory),
            "Extension" => Some(Self::InstanceExtension),
            _ => None,
        }
    }
}

/// Per-field role and its layout payload.
///
/// Label and mask expressions are opaque source text; they are emitted
/// verbatim and compared textually, never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum FieldRole {
    Plain,
    SwitchCase { labels: Vec<String> },
    OptionalCase { mask: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    #[serde(flatten)]
    pub role: FieldRole,
}

impl FieldMeta {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: FieldRole::Plain,
        }
    }

    pub fn switch_case<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            role: FieldRole::SwitchCase {
                labels: labels.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn optional_case(name: impl Into<String>, mask: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: FieldRole::OptionalCase { mask: mask.into() },
        }
    }

    /// Discriminator labels routed to this field (empty unless `SwitchCase`).
    pub fn labels(&self) -> &[String] {
        match &self.role {
            FieldRole::SwitchCase { labels } => labels,
            _ => &[],
        }
    }

    /// Presence mask expression (only for `OptionalCase`).
    pub fn mask(&self) -> Option<&str> {
        match &self.role {
            FieldRole::OptionalCase { mask } => Some(mask),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMeta {
    /// Modifier text as declared, e.g. `public partial`.
    pub accessibility: String,
    pub name: String,
    pub layout: ObjectLayout,
    pub convention: CallConvention,
    pub fields: Vec<FieldMeta>,
}

impl TypeMeta {
    pub fn new(
        accessibility: impl Into<String>,
        name: impl Into<String>,
        layout: ObjectLayout,
        convention: CallConvention,
    ) -> Self {
        Self {
            accessibility: accessibility.into(),
            name: name.into(),
            layout,
            convention,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldMeta>) -> Self {
        self.fields = fields;
        self
    }

    /// Fields carrying a presence mask, in declaration order.
    pub fn optional_fields(&self) -> impl Iterator<Item = (&FieldMeta, &str)> {
        self.fields
            .iter()
            .filter_map(|field| field.mask().map(|mask| (field, mask)))
    }
}

/// Everything generated from one source unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub namespace: String,
    pub imports: ImportSet,
    pub types: Vec<TypeMeta>,
    pub source_file: PathBuf,
    pub output_file: PathBuf,
}

impl Unit {
    pub fn new(namespace: impl Into<String>, source_file: impl Into<PathBuf>) -> Self {
        let source_file = source_file.into();
        Self {
            namespace: namespace.into(),
            imports: ImportSet::new(),
            types: Vec::new(),
            output_file: output_path(&source_file),
            source_file,
        }
    }

    pub fn uses_layout(&self, layout: ObjectLayout) -> bool {
        self.types.iter().any(|ty| ty.layout == layout)
    }

    pub fn uses_convention(&self, convention: CallConvention) -> bool {
        self.types.iter().any(|ty| ty.convention == convention)
    }

    pub fn type_named(&self, name: &str) -> Option<&TypeMeta> {
        self.types.iter().find(|ty| ty.name == name)
    }
}

/// Output path for a source unit: same directory, file stem plus [`OUTPUT_SUFFIX`].
pub fn output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}{OUTPUT_SUFFIX}");

    match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
