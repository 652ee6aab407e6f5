// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single `using` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Import {
    /// `using <path>;`
    pub fn namespace(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_static: false,
            alias: None,
        }
    }

    /// `using static <path>;`
    pub fn static_class(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_static: true,
            alias: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("using ")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        if let Some(alias) = &self.alias {
            write!(f, "{alias} = ")?;
        }
        write!(f, "{};", self.path)
    }
}

/// Insertion-ordered import set.
///
/// Two imports are the same entry when they render to the same directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Import>", into = "Vec<Import>")]
pub struct ImportSet {
    entries: Vec<Import>,
    seen: HashSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import; returns `false` if an equal directive was already present.
    pub fn insert(&mut self, import: Import) -> bool {
        if !self.seen.insert(import.to_string()) {
            return false;
        }
        self.entries.push(import);
        true
    }

    pub fn contains(&self, import: &Import) -> bool {
        self.seen.contains(&import.to_string())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Import> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<Import> for ImportSet {
    fn extend<I: IntoIterator<Item = Import>>(&mut self, iter: I) {
        for import in iter {
            self.insert(import);
        }
    }
}

impl FromIterator<Import> for ImportSet {
    fn from_iter<I: IntoIterator<Item = Import>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a ImportSet {
    type Item = &'a Import;
    type IntoIter = std::slice::Iter<'a, Import>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<Vec<Import>> for ImportSet {
    fn from(imports: Vec<Import>) -> Self {
        imports.into_iter().collect()
    }
}

impl From<ImportSet> for Vec<Import> {
    fn from(set: ImportSet) -> Self {
        set.entries
    }
}
