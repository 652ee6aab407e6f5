// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! Passed explicitly to the extractor and assembler; two configurations can
//! drive generation side by side.

use crate::error::GenError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default banner affixed to every generated unit.
pub const DEFAULT_BANNER_TEMPLATE: &str = "\
//------------------------------------------------------------------------------
// <auto-generated>
//     Generated by {{ generator }} generator.
//     Source: {{ source }}
// </auto-generated>
//------------------------------------------------------------------------------";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Marker attribute name, matched exactly.
    pub marker: String,
    /// Field attribute carrying discriminator labels.
    pub switch_attribute: String,
    /// Field attribute carrying a presence mask.
    pub optional_attribute: String,
    /// Enum type naming the layout in marker arguments.
    pub layout_enum: String,
    /// Enum type naming the call convention in marker arguments.
    pub convention_enum: String,
    /// Generator name cited in the banner.
    pub generator_name: String,
    /// Tera template for the banner.
    pub banner_template: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker: "ComplexObjectGenerator".to_string(),
            switch_attribute: "SwitchField".to_string(),
            optional_attribute: "OptionalField".to_string(),
            layout_enum: "ComplexObjectType".to_string(),
            convention_enum: "EncodingMethodType".to_string(),
            generator_name: "uamgen".to_string(),
            banner_template: DEFAULT_BANNER_TEMPLATE.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, GenError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| GenError::Config(format!("YAML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, GenError> {
        tracing::debug!("Loading generator config from: {:?}", path);
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_generator_name(mut self, name: impl Into<String>) -> Self {
        self.generator_name = name.into();
        self
    }

    #[must_use]
    pub fn with_banner_template(mut self, template: impl Into<String>) -> Self {
        self.banner_template = template.into();
        self
    }

    /// Reject names that can never match a declaration.
    pub fn validate(&self) -> Result<(), GenError> {
        let names = [
            ("marker", &self.marker),
            ("switch_attribute", &self.switch_attribute),
            ("optional_attribute", &self.optional_attribute),
            ("layout_enum", &self.layout_enum),
            ("convention_enum", &self.convention_enum),
        ];

        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(GenError::Config(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}
