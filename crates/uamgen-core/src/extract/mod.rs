// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Metadata extraction.
//!
//! Reads a [`SourceTree`] and builds the [`Unit`] for its candidate types:
//! non-private, non-abstract, `partial` classes carrying the marker attribute.
//! Only `public` and `internal` fields take part. A switch-layout field
//! without its discriminator attribute aborts the whole unit.

mod args;

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::model::{FieldMeta, FieldRole, ObjectLayout, TypeMeta, Unit};
use crate::tree::{DeclKind, FieldDecl, Modifier, SourceTree, TypeDecl};
use args::MarkerArgs;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Extractor {
    config: GeneratorConfig,
    args: MarkerArgs,
}

impl Extractor {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            args: MarkerArgs::new(config)?,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Candidate types: classes that are not private, not abstract, are
    /// `partial`, and carry the marker attribute.
    pub fn is_candidate_type(&self, decl: &TypeDecl) -> bool {
        decl.kind == DeclKind::Class
            && !decl.has_modifier(Modifier::Private)
            && !decl.has_modifier(Modifier::Abstract)
            && decl.has_modifier(Modifier::Partial)
            && decl.attribute(&self.config.marker).is_some()
    }

    /// Build the unit for `tree`, or `None` when nothing is left to generate.
    pub fn extract(&self, tree: &SourceTree, source: &Path) -> Result<Option<Unit>, GenError> {
        let mut candidates = Vec::new();
        let mut namespaces_with_candidates = 0;

        for namespace in &tree.namespaces {
            let before = candidates.len();
            candidates.extend(namespace.types.iter().filter(|t| self.is_candidate_type(t)));
            if candidates.len() > before {
                namespaces_with_candidates += 1;
            }
        }

        let Some(namespace) = tree.namespaces.first() else {
            tracing::debug!("{}: no namespace declaration", source.display());
            return Ok(None);
        };
        if candidates.is_empty() {
            tracing::debug!("{}: no candidate types", source.display());
            return Ok(None);
        }
        if namespaces_with_candidates > 1 {
            tracing::warn!(
                "{}: candidate types span {} namespaces, all are emitted into {}",
                source.display(),
                namespaces_with_candidates,
                namespace.name
            );
        }

        let mut unit = Unit::new(namespace.name.clone(), source);

        for decl in candidates {
            match self.extract_type(decl)? {
                Some(ty) => unit.types.push(ty),
                None => tracing::debug!("Dropping {}: no public or internal fields", decl.name),
            }
        }

        if unit.types.is_empty() {
            return Ok(None);
        }
        Ok(Some(unit))
    }

    fn extract_type(&self, decl: &TypeDecl) -> Result<Option<TypeMeta>, GenError> {
        let (layout, convention) = decl
            .attribute(&self.config.marker)
            .map(|marker| self.args.resolve(marker))
            .unwrap_or_default();

        let mut fields = Vec::new();
        for field in decl.fields().filter(|f| is_candidate_field(f)) {
            let role = self.field_role(decl, field, layout)?;
            fields.extend(
                field
                    .variables
                    .iter()
                    .map(|variable| FieldMeta {
                        name: variable.clone(),
                        role: role.clone(),
                    }),
            );
        }

        if fields.is_empty() {
            return Ok(None);
        }
        if layout == ObjectLayout::Switch {
            warn_overlapping_labels(&decl.name, &fields);
        }

        Ok(Some(
            TypeMeta::new(decl.accessibility(), decl.name.clone(), layout, convention)
                .with_fields(fields),
        ))
    }

    fn field_role(
        &self,
        decl: &TypeDecl,
        field: &FieldDecl,
        layout: ObjectLayout,
    ) -> Result<FieldRole, GenError> {
        match layout {
            ObjectLayout::Generic => Ok(FieldRole::Plain),
            ObjectLayout::Switch => {
                let attribute = &self.config.switch_attribute;
                let Some(attr) = field.attribute(attribute) else {
                    return Err(GenError::SchemaMissing {
                        type_name: decl.name.clone(),
                        field: field.describe(),
                        attribute: attribute.clone(),
                    });
                };

                let mut labels: Vec<String> = Vec::new();
                for label in attr.arguments.iter().map(|a| a.trim()) {
                    if !label.is_empty() && !labels.iter().any(|l| l == label) {
                        labels.push(label.to_string());
                    }
                }
                if labels.is_empty() {
                    return Err(GenError::EmptyDiscriminator {
                        type_name: decl.name.clone(),
                        field: field.describe(),
                        attribute: attribute.clone(),
                    });
                }
                Ok(FieldRole::SwitchCase { labels })
            }
            ObjectLayout::Optional => {
                let attribute = &self.config.optional_attribute;
                let Some(attr) = field.attribute(attribute) else {
                    return Ok(FieldRole::Plain);
                };

                match attr.arguments.first().map(|a| a.trim()) {
                    Some(mask) if !mask.is_empty() => Ok(FieldRole::OptionalCase {
                        mask: mask.to_string(),
                    }),
                    _ => Err(GenError::MissingMask {
                        type_name: decl.name.clone(),
                        field: field.describe(),
                        attribute: attribute.clone(),
                    }),
                }
            }
        }
    }
}

/// Candidate fields are `public` or `internal`.
pub fn is_candidate_field(field: &FieldDecl) -> bool {
    field.has_modifier(Modifier::Public) || field.has_modifier(Modifier::Internal)
}

// Overlapping labels are emitted as declared; only report them.
fn warn_overlapping_labels(type_name: &str, fields: &[FieldMeta]) {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for field in fields {
        for label in field.labels() {
            if let Some(owner) = owners.insert(label.as_str(), field.name.as_str()) {
                if owner != field.name {
                    tracing::warn!(
                        "{type_name}: discriminator label {label} routes to both {owner} and {}",
                        field.name
                    );
                }
            }
        }
    }
}
