// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use thiserror::Error;

/// Generation errors.
///
/// Schema errors abort the whole unit: no output is produced for any of its
/// types. "Nothing to generate" is not an error and is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("type {type_name} field '{field}' has no {attribute} attribute")]
    SchemaMissing {
        type_name: String,
        field: String,
        attribute: String,
    },

    #[error("type {type_name} field '{field}' declares {attribute} without discriminator labels")]
    EmptyDiscriminator {
        type_name: String,
        field: String,
        attribute: String,
    },

    #[error("type {type_name} field '{field}' declares {attribute} without a mask")]
    MissingMask {
        type_name: String,
        field: String,
        attribute: String,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Invalid marker argument pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Declaration tree error: {0}")]
    Tree(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// True for errors caused by the declared schema rather than the environment.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            GenError::SchemaMissing { .. }
                | GenError::EmptyDiscriminator { .. }
                | GenError::MissingMask { .. }
        )
    }
}
