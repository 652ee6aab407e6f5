// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Marker attribute argument resolution.
//!
//! Accepted argument shapes (enum names come from the configuration):
//! - `ComplexObjectType.SwitchField`
//! - `GodSharp.Extensions.Opc.Ua.Types.ComplexObjectType.SwitchField`
//! - `ObjectType = ComplexObjectType.SwitchField`, `objectType: ComplexObjectType.SwitchField`

use crate::config::GeneratorConfig;
use crate::model::{CallConvention, ObjectLayout};
use crate::tree::AttributeDecl;
use regex::Regex;

#[derive(Debug, Clone)]
pub(crate) struct MarkerArgs {
    pattern: Regex,
    layout_enum: String,
    convention_enum: String,
}

impl MarkerArgs {
    pub(crate) fn new(config: &GeneratorConfig) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"^\s*(?:[A-Za-z_]\w*\s*[=:]\s*)?(?:[A-Za-z_][\w.]*\.)?({}|{})\.([A-Za-z_]\w*)\s*$",
            regex::escape(&config.layout_enum),
            regex::escape(&config.convention_enum),
        ))?;

        Ok(Self {
            pattern,
            layout_enum: config.layout_enum.clone(),
            convention_enum: config.convention_enum.clone(),
        })
    }

    /// Resolve layout and convention from a marker attribute.
    ///
    /// The first argument naming each enum decides it; unknown members and
    /// missing arguments fall back to the defaults.
    pub(crate) fn resolve(&self, marker: &AttributeDecl) -> (ObjectLayout, CallConvention) {
        let layout_member = self.first_member(marker, &self.layout_enum);
        let convention_member = self.first_member(marker, &self.convention_enum);

        let layout = match layout_member {
            Some(member) => ObjectLayout::from_member(member).unwrap_or_else(|| {
                tracing::debug!(
                    "Unknown {}.{member} on {}, using {:?}",
                    self.layout_enum,
                    marker.name,
                    ObjectLayout::default()
                );
                ObjectLayout::default()
            }),
            None => ObjectLayout::default(),
        };

        let convention = match convention_member {
            Some(member) => CallConvention::from_member(member).unwrap_or_else(|| {
                tracing::debug!(
                    "Unknown {}.{member} on {}, using {:?}",
                    self.convention_enum,
                    marker.name,
                    CallConvention::default()
                );
                CallConvention::default()
            }),
            None => CallConvention::default(),
        };

        (layout, convention)
    }

    fn first_member<'a>(&self, marker: &'a AttributeDecl, enum_name: &str) -> Option<&'a str> {
        marker.arguments.iter().find_map(|argument| {
            let captures = self.pattern.captures(argument)?;
            let matched_enum = captures.get(1)?.as_str();
            if matched_enum != enum_name {
                return None;
            }
            captures.get(2).map(|member| member.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> MarkerArgs {
        MarkerArgs::new(&GeneratorConfig::default()).unwrap()
    }

    fn marker(arguments: &[&str]) -> AttributeDecl {
        arguments
            .iter()
            .fold(AttributeDecl::new("ComplexObjectGenerator"), |attr, arg| {
                attr.arg(*arg)
            })
    }

    #[test]
    fn test_defaults_without_arguments() {
        assert_eq!(
            args().resolve(&marker(&[])),
            (ObjectLayout::Generic, CallConvention::StaticFactory)
        );
    }

    #[test]
    fn test_positional_arguments_in_any_order() {
        assert_eq!(
            args().resolve(&marker(&[
                "EncodingMethodType.Extension",
                "ComplexObjectType.SwitchField"
            ])),
            (ObjectLayout::Switch, CallConvention::InstanceExtension)
        );
    }

    #[test]
    fn test_named_and_qualified_arguments() {
        assert_eq!(
            args().resolve(&marker(&[
                "ObjectType = GodSharp.Extensions.Opc.Ua.Types.ComplexObjectType.OptionalField",
                "methodType: EncodingMethodType.Factory",
            ])),
            (ObjectLayout::Optional, CallConvention::StaticFactory)
        );
    }

    #[test]
    fn test_unknown_member_falls_back() {
        assert_eq!(
            args().resolve(&marker(&[
                "ComplexObjectType.Union",
                "EncodingMethodType.Reflection"
            ])),
            (ObjectLayout::Generic, CallConvention::StaticFactory)
        );
    }

    #[test]
    fn test_first_argument_per_enum_decides() {
        assert_eq!(
            args().resolve(&marker(&[
                "ComplexObjectType.Bogus",
                "ComplexObjectType.SwitchField"
            ])),
            (ObjectLayout::Generic, CallConvention::StaticFactory)
        );
    }

    #[test]
    fn test_unrelated_arguments_ignored() {
        assert_eq!(
            args().resolve(&marker(&[
                "\"SwitchField\"",
                "typeof(ComplexObjectType)",
                "Other.SwitchField",
                "ComplexObjectType.OptionalField"
            ])),
            (ObjectLayout::Optional, CallConvention::StaticFactory)
        );
    }

    #[test]
    fn test_member_names_are_case_sensitive() {
        assert_eq!(
            args().resolve(&marker(&["ComplexObjectType.switchField"])).0,
            ObjectLayout::Generic
        );
    }

    #[test]
    fn test_configured_enum_names() {
        let mut config = GeneratorConfig::default();
        config.layout_enum = "Layout".to_string();
        config.convention_enum = "Calls".to_string();
        let args = MarkerArgs::new(&config).unwrap();

        assert_eq!(
            args.resolve(&marker(&["Layout.SwitchField", "Calls.Extension"])),
            (ObjectLayout::Switch, CallConvention::InstanceExtension)
        );
        assert_eq!(
            args.resolve(&marker(&["ComplexObjectType.SwitchField"])).0,
            ObjectLayout::Generic
        );
    }
}
