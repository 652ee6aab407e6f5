// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declaration tree exchange model.
//!
//! A front-end walks the C# source of one unit and records the facts the
//! extractor needs: namespaces, type declarations with their modifiers and
//! attributes, and field declarations. The document is JSON or YAML.
//!
//! ```yaml
//! source_file: Shared/OptionalFields.cs
//! namespaces:
//!   - name: CodeGeneratorTest
//!     types:
//!       - kind: class
//!         name: OptionalFields
//!         modifiers: [public, partial]
//!         attributes:
//!           - name: ComplexObjectGenerator
//!             arguments: [ComplexObjectType.OptionalField]
//!         members:
//!           - member: field
//!             modifiers: [public]
//!             type: int
//!             variables: [MandatoryInt32]
//! ```

use crate::error::GenError;
use crate::model::Import;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Root of one source unit's declaration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
    /// `using` directives of the source unit, in source order.
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub namespaces: Vec<NamespaceDecl>,
}

impl SourceTree {
    pub fn from_json(text: &str) -> Result<Self, GenError> {
        serde_json::from_str(text).map_err(|e| GenError::Tree(format!("JSON parse error: {e}")))
    }

    pub fn from_yaml(text: &str) -> Result<Self, GenError> {
        serde_yaml::from_str(text).map_err(|e| GenError::Tree(format!("YAML parse error: {e}")))
    }

    /// Load a tree document, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json(&fs::read_to_string(path)?),
            Some("yaml" | "yml") => Self::from_yaml(&fs::read_to_string(path)?),
            _ => Err(GenError::Tree(format!(
                "unsupported tree document (expected .json, .yaml or .yml): {}",
                path.display()
            ))),
        }
    }

    #[must_use]
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: NamespaceDecl) -> Self {
        self.namespaces.push(namespace);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    #[default]
    Class,
    Struct,
    Record,
    Interface,
    Enum,
}

/// C# declaration modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Internal,
    Protected,
    Private,
    Abstract,
    Sealed,
    Static,
    Partial,
    Readonly,
    New,
    Unsafe,
    Volatile,
    Const,
}

impl Modifier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Internal => "internal",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Sealed => "sealed",
            Modifier::Static => "static",
            Modifier::Partial => "partial",
            Modifier::Readonly => "readonly",
            Modifier::New => "new",
            Modifier::Unsafe => "unsafe",
            Modifier::Volatile => "volatile",
            Modifier::Const => "const",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute application; arguments are raw expression text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDecl {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl AttributeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    #[serde(default)]
    pub kind: DeclKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            kind: DeclKind::Class,
            name: name.into(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DeclKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.members.push(MemberDecl::Field(field));
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Modifier text as written, e.g. `public partial`.
    pub fn accessibility(&self) -> String {
        join_modifiers(&self.modifiers)
    }

    /// First attribute with exactly this name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        find_attribute(&self.attributes, name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|member| match member {
            MemberDecl::Field(field) => Some(field),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDecl {
    Field(FieldDecl),
    Property { name: String },
    Method { name: String },
}

/// A field declaration; `public int A, B;` has two variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
    #[serde(rename = "type", default)]
    pub type_name: String,
    pub variables: Vec<String>,
}

impl FieldDecl {
    pub fn new(type_name: impl Into<String>, variables: &[&str]) -> Self {
        Self {
            modifiers: Vec::new(),
            attributes: Vec::new(),
            type_name: type_name.into(),
            variables: variables.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        find_attribute(&self.attributes, name)
    }

    /// Declaration text used in diagnostics, e.g. `public int A, B`.
    pub fn describe(&self) -> String {
        let modifiers = join_modifiers(&self.modifiers);
        let variables = self.variables.join(", ");
        [modifiers.as_str(), self.type_name.as_str(), variables.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn join_modifiers(modifiers: &[Modifier]) -> String {
    modifiers
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_attribute<'a>(attributes: &'a [AttributeDecl], name: &str) -> Option<&'a AttributeDecl> {
    attributes.iter().find(|attr| attr.name == name)
}
