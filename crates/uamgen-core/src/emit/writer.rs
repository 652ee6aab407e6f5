// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

/// Tab-indented line buffer.
#[derive(Debug, Clone, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a fixed indentation depth (e.g. inside a namespace block).
    pub fn with_depth(depth: usize) -> Self {
        Self {
            buf: String::new(),
            depth,
        }
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.buf.push('\t');
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    /// Empty line, never indented.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// `{` on its own line, then one level deeper.
    pub fn open(&mut self) {
        self.line("{");
        self.indent();
    }

    /// One level shallower, then `}`.
    pub fn close(&mut self) {
        self.dedent();
        self.line("}");
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
