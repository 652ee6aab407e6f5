// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Operation plans.
//!
//! A layout turns a field list into one [`Plan`]; the Encode and Decode
//! bodies are both rendered from it, so they always visit fields in the same
//! order. [`Plan::trace`] replays a plan against concrete header values and
//! yields the field accesses the generated procedure would perform.

use crate::model::{ENCODING_MASK, SWITCH_FIELD};
use thiserror::Error;

/// Header value written before any field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    SwitchField,
    EncodingMask,
}

impl HeaderField {
    pub const fn name(self) -> &'static str {
        match self {
            HeaderField::SwitchField => SWITCH_FIELD,
            HeaderField::EncodingMask => ENCODING_MASK,
        }
    }
}

/// One switch arm: every label falls through to the same field access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arm {
    pub labels: Vec<String>,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Header(HeaderField),
    /// Unconditional access.
    Field(String),
    /// Access when `(mask & EncodingMask) != 0`.
    Guarded { mask: String, field: String },
    /// Branch on `SwitchField`; unmatched values access nothing.
    Switch { arms: Vec<Arm> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

/// Header values a trace is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderValues {
    pub discriminator: u32,
    pub mask: u32,
}

impl HeaderValues {
    pub const fn discriminator(value: u32) -> Self {
        Self {
            discriminator: value,
            mask: 0,
        }
    }

    pub const fn mask(value: u32) -> Self {
        Self {
            discriminator: 0,
            mask: value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("cannot evaluate '{0}': only integer literals are supported")]
    UnsupportedLiteral(String),

    #[error("unknown type: {0}")]
    UnknownType(String),
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn header(&self) -> Option<HeaderField> {
        self.steps.iter().find_map(|step| match step {
            Step::Header(header) => Some(*header),
            _ => None,
        })
    }

    /// Every field the plan can touch, in visiting order.
    pub fn field_order(&self) -> Vec<&str> {
        let mut order = Vec::new();
        for step in &self.steps {
            match step {
                Step::Header(_) => {}
                Step::Field(field) | Step::Guarded { field, .. } => order.push(field.as_str()),
                Step::Switch { arms } => order.extend(arms.iter().map(|arm| arm.field.as_str())),
            }
        }
        order
    }

    /// Field accesses performed for the given header values.
    pub fn trace(&self, values: HeaderValues) -> Result<Vec<&str>, TraceError> {
        let mut accessed = Vec::new();

        for step in &self.steps {
            match step {
                Step::Header(_) => {}
                Step::Field(field) => accessed.push(field.as_str()),
                Step::Guarded { mask, field } => {
                    if evaluate(mask)? & values.mask != 0 {
                        accessed.push(field.as_str());
                    }
                }
                Step::Switch { arms } => {
                    if let Some(arm) = matching_arm(arms, values.discriminator)? {
                        accessed.push(arm.field.as_str());
                    }
                }
            }
        }

        Ok(accessed)
    }
}

fn matching_arm(arms: &[Arm], discriminator: u32) -> Result<Option<&Arm>, TraceError> {
    for arm in arms {
        for label in &arm.labels {
            if evaluate(label)? == discriminator {
                return Ok(Some(arm));
            }
        }
    }
    Ok(None)
}

fn evaluate(expr: &str) -> Result<u32, TraceError> {
    parse_literal(expr).ok_or_else(|| TraceError::UnsupportedLiteral(expr.to_string()))
}

/// Parse a C# unsigned integer literal: decimal, `0x` hex or `0b` binary,
/// with optional `_` separators and `u`/`U` suffix.
pub fn parse_literal(expr: &str) -> Option<u32> {
    let text = expr.trim();
    let text = text.strip_suffix(['u', 'U']).unwrap_or(text);

    let (digits, radix) = if let Some(hex) = strip_prefix_ci(text, "0x") {
        (hex, 16)
    } else if let Some(bin) = strip_prefix_ci(text, "0b") {
        (bin, 2)
    } else {
        (text, 10)
    };

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u32::from_str_radix(&digits, radix).ok()
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}
