// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared fixtures for uamgen-core integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use uamgen_core::plan::HeaderField;
use uamgen_core::tree::{AttributeDecl, FieldDecl, Modifier, NamespaceDecl, TypeDecl};
use uamgen_core::{HeaderValues, Plan, SourceTree};

pub const MARKER: &str = "ComplexObjectGenerator";

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn golden(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
        .replace("\r\n", "\n")
}

pub fn marked(name: &str, args: &[&str]) -> TypeDecl {
    let marker = args
        .iter()
        .fold(AttributeDecl::new(MARKER), |attr, arg| attr.arg(*arg));
    TypeDecl::class(name)
        .with_modifiers(&[Modifier::Public, Modifier::Partial])
        .with_attribute(marker)
}

pub fn field(ty: &str, names: &[&str]) -> FieldDecl {
    FieldDecl::new(ty, names).with_modifiers(&[Modifier::Public])
}

pub fn labelled(ty: &str, name: &str, labels: &[&str]) -> FieldDecl {
    let attr = labels
        .iter()
        .fold(AttributeDecl::new("SwitchField"), |attr, l| attr.arg(*l));
    field(ty, &[name]).with_attribute(attr)
}

pub fn masked(ty: &str, name: &str, mask: &str) -> FieldDecl {
    field(ty, &[name]).with_attribute(AttributeDecl::new("OptionalField").arg(mask))
}

pub fn single_type_tree(decl: TypeDecl) -> SourceTree {
    SourceTree::default().with_namespace(NamespaceDecl::new("Demo").with_type(decl))
}

/// Value stream entry: a header or a field access with its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Header(&'static str, u32),
    Field(String, i64),
}

/// In-memory stand-in for `IEncoder`/`IDecoder` that executes a [`Plan`]
/// the way the generated procedures do.
#[derive(Debug, Default)]
pub struct MemoryCodec {
    pub stream: Vec<Entry>,
}

impl MemoryCodec {
    pub fn encode(plan: &Plan, header: HeaderValues, record: &BTreeMap<String, i64>) -> Self {
        let mut stream = Vec::new();
        if let Some(field) = plan.header() {
            stream.push(Entry::Header(field.name(), header_value(field, header)));
        }
        for name in plan.trace(header).expect("trace") {
            let value = *record.get(name).unwrap_or_else(|| panic!("no value for {name}"));
            stream.push(Entry::Field(name.to_string(), value));
        }
        Self { stream }
    }

    /// Decode into a fresh record; fields the stream does not carry keep
    /// their default (absent).
    pub fn decode(&self, plan: &Plan) -> (HeaderValues, BTreeMap<String, i64>) {
        let mut entries = self.stream.iter();
        let mut header = HeaderValues::default();

        if let Some(field) = plan.header() {
            match entries.next() {
                Some(Entry::Header(name, value)) if *name == field.name() => match field {
                    HeaderField::SwitchField => header.discriminator = *value,
                    HeaderField::EncodingMask => header.mask = *value,
                },
                other => panic!("expected header {}, found {other:?}", field.name()),
            }
        }

        let mut record = BTreeMap::new();
        for name in plan.trace(header).expect("trace") {
            match entries.next() {
                Some(Entry::Field(read, value)) if read == name => {
                    record.insert(name.to_string(), *value);
                }
                other => panic!("expected field {name}, found {other:?}"),
            }
        }
        assert!(entries.next().is_none(), "trailing entries in stream");
        (header, record)
    }
}

fn header_value(field: HeaderField, header: HeaderValues) -> u32 {
    match field {
        HeaderField::SwitchField => header.discriminator,
        HeaderField::EncodingMask => header.mask,
    }
}
