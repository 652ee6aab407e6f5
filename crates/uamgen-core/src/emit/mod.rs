// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Layout emitters.
//!
//! Each layout builds an operation [`Plan`] for a field list; the provided
//! methods of [`LayoutEmitter`] render the type block, Encode and Decode from
//! that plan. The layout is picked once per type by [`emitter_for`].

pub mod call;
mod generic;
mod optional;
mod switch;
mod writer;

pub use generic::GenericLayout;
pub use optional::OptionalLayout;
pub use switch::SwitchLayout;
pub use writer::CodeWriter;

use crate::model::{
    CallConvention, FieldMeta, ObjectLayout, TypeMeta, ENCODING_MASK, SWITCH_FIELD,
};
use crate::plan::{Plan, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

impl Direction {
    const fn method(self) -> &'static str {
        match self {
            Direction::Encode => "public override void Encode(IEncoder encoder)",
            Direction::Decode => "public override void Decode(IDecoder decoder)",
        }
    }

    const fn base_call(self) -> &'static str {
        match self {
            Direction::Encode => "base.Encode(encoder);",
            Direction::Decode => "base.Decode(decoder);",
        }
    }
}

pub trait LayoutEmitter {
    fn layout(&self) -> ObjectLayout;

    /// Shared Encode/Decode structure for `fields`.
    fn plan(&self, fields: &[FieldMeta]) -> Plan;

    /// Members emitted after Decode, each preceded by a blank line.
    fn emit_extras(&self, _ty: &TypeMeta, _w: &mut CodeWriter) {}

    /// Render the whole generated type block.
    fn emit_type(&self, ty: &TypeMeta, w: &mut CodeWriter) {
        w.line(format!("{} class {} : ComplexObject", ty.accessibility, ty.name));
        w.open();

        if let Some(header) = self.layout().header_field() {
            w.line(format!("public uint {header};"));
            w.blank();
        }

        let plan = self.plan(&ty.fields);
        emit_procedure(&plan, ty.convention, Direction::Encode, w);
        w.blank();
        emit_procedure(&plan, ty.convention, Direction::Decode, w);

        self.emit_extras(ty, w);

        w.close();
    }
}

/// Emitter for a layout.
pub fn emitter_for(layout: ObjectLayout) -> &'static dyn LayoutEmitter {
    match layout {
        ObjectLayout::Generic => &GenericLayout,
        ObjectLayout::Switch => &SwitchLayout,
        ObjectLayout::Optional => &OptionalLayout,
    }
}

/// Render one Encode or Decode procedure from `plan`.
pub fn emit_procedure(
    plan: &Plan,
    convention: CallConvention,
    direction: Direction,
    w: &mut CodeWriter,
) {
    w.line(direction.method());
    w.open();
    w.line(direction.base_call());

    for step in plan.steps() {
        emit_step(step, convention, direction, w);
    }

    w.close();
}

fn emit_step(step: &Step, convention: CallConvention, direction: Direction, w: &mut CodeWriter) {
    match step {
        Step::Header(header) => w.line(call::header_access(*header, direction)),
        Step::Field(field) => w.line(call::field_access(convention, direction, field)),
        Step::Guarded { mask, field } => {
            w.line(format!(
                "if (({} & {ENCODING_MASK}) != 0)",
                mask_operand(mask)
            ));
            w.open();
            w.line(call::field_access(convention, direction, field));
            w.close();
        }
        Step::Switch { arms } => {
            w.line(format!("switch ({SWITCH_FIELD})"));
            w.open();
            for arm in arms {
                for label in &arm.labels {
                    w.line(format!("case {label}:"));
                }
                w.indent();
                w.line(call::field_access(convention, direction, &arm.field));
                w.line("break;");
                w.dedent();
            }
            w.line("default:");
            w.indent();
            w.line("break;");
            w.dedent();
            w.close();
        }
    }
}

/// Left operand of the presence guard. Anything but a literal or a dotted
/// name is parenthesized so `&` applies to the whole expression.
fn mask_operand(mask: &str) -> String {
    let simple = !mask.is_empty()
        && mask
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if simple {
        mask.to_string()
    } else {
        format!("({mask})")
    }
}
