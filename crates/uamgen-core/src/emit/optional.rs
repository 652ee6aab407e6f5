// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{CodeWriter, LayoutEmitter};
use crate::model::{FieldMeta, FieldRole, ObjectLayout, TypeMeta, ENCODING_MASK};
use crate::plan::{HeaderField, Plan, Step};

/// Mandatory core plus mask-gated fields, selected by `EncodingMask`.
///
/// Fields without a mask are always present. Adds `ResetMask` and the two
/// `WithOptionalField` overloads to the generated type.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalLayout;

impl LayoutEmitter for OptionalLayout {
    fn layout(&self) -> ObjectLayout {
        ObjectLayout::Optional
    }

    fn plan(&self, fields: &[FieldMeta]) -> Plan {
        let mut plan = Plan::new();
        plan.push(Step::Header(HeaderField::EncodingMask));

        for field in fields {
            let step = match &field.role {
                FieldRole::OptionalCase { mask } => Step::Guarded {
                    mask: mask.clone(),
                    field: field.name.clone(),
                },
                FieldRole::Plain | FieldRole::SwitchCase { .. } => Step::Field(field.name.clone()),
            };
            plan.push(step);
        }
        plan
    }

    fn emit_extras(&self, ty: &TypeMeta, w: &mut CodeWriter) {
        let name = &ty.name;

        w.blank();
        w.line(format!("public {name} ResetMask()"));
        w.open();
        w.line(format!("{ENCODING_MASK} = 0;"));
        w.line("return this;");
        w.close();

        w.blank();
        w.line(format!(
            "public {name} WithOptionalField<TMember>(Expression<Func<{name}, TMember>> predicate) => WithOptionalField(ExpressionHelper.GetMemberName(predicate.Body));"
        ));

        w.blank();
        w.line(format!("public {name} WithOptionalField(string field)"));
        w.open();
        w.line("switch (field)");
        w.open();
        for (field, mask) in ty.optional_fields() {
            w.line(format!("case \"{}\":", field.name));
            w.indent();
            w.line(format!("{ENCODING_MASK} |= {mask};"));
            w.line("break;");
            w.dedent();
        }
        w.close();
        w.line("return this;");
        w.close();
    }
}
