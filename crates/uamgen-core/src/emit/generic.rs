// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::LayoutEmitter;
use crate::model::{FieldMeta, ObjectLayout};
use crate::plan::{Plan, Step};

/// Every field, unconditionally, in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericLayout;

impl LayoutEmitter for GenericLayout {
    fn layout(&self) -> ObjectLayout {
        ObjectLayout::Generic
    }

    fn plan(&self, fields: &[FieldMeta]) -> Plan {
        let mut plan = Plan::new();
        for field in fields {
            plan.push(Step::Field(field.name.clone()));
        }
        plan
    }
}
