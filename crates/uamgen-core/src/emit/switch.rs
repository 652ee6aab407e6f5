// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::LayoutEmitter;
use crate::model::{FieldMeta, ObjectLayout};
use crate::plan::{Arm, HeaderField, Plan, Step};

/// Tagged union: `SwitchField` selects the single active field.
///
/// Label sets become fall-through `case` groups in declaration order. Labels
/// shared by two fields are emitted as written; the discriminator value is
/// trusted as stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchLayout;

impl LayoutEmitter for SwitchLayout {
    fn layout(&self) -> ObjectLayout {
        ObjectLayout::Switch
    }

    fn plan(&self, fields: &[FieldMeta]) -> Plan {
        let arms = fields
            .iter()
            .filter_map(|field| {
                if field.labels().is_empty() {
                    tracing::debug!("switch field {} has no labels, not emitted", field.name);
                    return None;
                }
                Some(Arm {
                    labels: field.labels().to_vec(),
                    field: field.name.clone(),
                })
            })
            .collect();

        let mut plan = Plan::new();
        plan.push(Step::Header(HeaderField::SwitchField));
        plan.push(Step::Switch { arms });
        plan
    }
}
