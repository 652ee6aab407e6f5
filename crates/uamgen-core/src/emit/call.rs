// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime call shapes.
//!
//! The convention only changes how a single read or write is spelled; the
//! layout decides which calls happen and in what order.

use super::Direction;
use crate::model::CallConvention;
use crate::plan::HeaderField;

/// Read or write of one declared field.
pub fn field_access(convention: CallConvention, direction: Direction, field: &str) -> String {
    match (convention, direction) {
        (CallConvention::StaticFactory, Direction::Encode) => {
            format!("Encoding.Write(encoder, {field}, nameof({field}));")
        }
        (CallConvention::StaticFactory, Direction::Decode) => {
            format!("Encoding.Read(decoder, ref {field}, nameof({field}));")
        }
        (CallConvention::InstanceExtension, Direction::Encode) => {
            format!("encoder.Write({field}, nameof({field}));")
        }
        (CallConvention::InstanceExtension, Direction::Decode) => {
            format!("decoder.Read(ref {field}, nameof({field}));")
        }
    }
}

/// Read or write of the layout's u32 header; identical for both conventions.
pub fn header_access(header: HeaderField, direction: Direction) -> String {
    let name = header.name();
    match direction {
        Direction::Encode => format!("encoder.WriteUInt32(\"{name}\", {name});"),
        Direction::Decode => format!("{name} = decoder.ReadUInt32(\"{name}\");"),
    }
}
