//! Indentation layer: pretty-printing and line wrapping
//!
//! Wraps the namespace layer and derives the nesting depth from the base
//! writer's container stack. Structural writes get a newline plus one
//! indent unit per level; long text and comment content is reflowed into
//! indented lines. Wrapping happens on the raw content before it reaches
//! the base writer, so escaping is never corrupted by inserted breaks.

use std::io::Write;

use crate::error::Result;
use crate::types::{Attrs, Namespaces};
use crate::writer::namespaced::NamespacedWriter;

/// Pretty-printing settings, immutable for the writer's lifetime
#[derive(Debug, Clone)]
pub struct IndentConfig {
    /// One level of indentation
    pub indent: String,
    /// Target line width for wrapped content
    pub width: usize,
    /// Usable width never drops below this, however deep the nesting
    pub min_width: usize,
    /// Whether long element/comment content is reflowed at all
    pub text_wrap: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        IndentConfig {
            indent: "  ".to_string(),
            width: 70,
            min_width: 20,
            text_wrap: true,
        }
    }
}

/// XML writer with pretty-printing
#[derive(Debug)]
pub struct IndentedWriter<W: Write> {
    inner: NamespacedWriter<W>,
    config: IndentConfig,
}

impl<W: Write> IndentedWriter<W> {
    pub fn new(inner: NamespacedWriter<W>, config: IndentConfig) -> Self {
        IndentedWriter { inner, config }
    }

    /// Open a container on its own indented line
    pub fn open(&mut self, name: &str, attrs: &Attrs, namespaces: &Namespaces) -> Result<()> {
        // validate before the leading newline so a namespace error writes
        // nothing at all
        let (merged, visible) = self.inner.prepare(name, attrs, namespaces)?;
        self.line_break(self.depth())?;
        self.inner.commit_open(name, merged, visible)
    }

    /// Close the innermost container, placing the closing tag at the
    /// parent's indentation; a final newline follows the root's closing tag
    ///
    /// # Panics
    ///
    /// Panics if no container is open.
    pub fn close(&mut self) -> Result<()> {
        let depth = self.depth();
        self.line_break(depth.saturating_sub(1))?;
        self.inner.close()?;
        if self.depth() == 0 {
            self.inner.raw("\n")?;
        }
        Ok(())
    }

    /// Write a single element on its own indented line
    ///
    /// Content longer than the configured width is reflowed into indented
    /// lines with the closing tag on its own line; otherwise it stays
    /// inline.
    pub fn element(
        &mut self,
        name: &str,
        attrs: &Attrs,
        namespaces: &Namespaces,
        text: &str,
    ) -> Result<()> {
        let (merged, _) = self.inner.prepare(name, attrs, namespaces)?;
        let depth = self.depth();
        self.line_break(depth)?;
        let content = self.reflow(text, depth);
        self.inner.commit_element(name, merged, &content)
    }

    /// Write a stand-alone text node, always reflowed onto its own line(s)
    pub fn text(&mut self, value: &str) -> Result<()> {
        let filled = self.fill(value, self.depth());
        self.inner.text(&filled)
    }

    /// Write a comment on its own indented line, wrapping long content
    pub fn comment(&mut self, value: &str) -> Result<()> {
        let depth = self.depth();
        self.line_break(depth)?;
        let content = self.reflow(value, depth);
        self.inner.comment(&content)
    }

    /// Write one element per item, in sequence order
    pub fn map<I, F>(&mut self, mut transform: F, items: I) -> Result<()>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> (String, Attrs, String),
    {
        for item in items {
            let (name, attrs, text) = transform(item);
            self.element(&name, &attrs, &Namespaces::new(), &text)?;
        }
        Ok(())
    }

    pub fn declaration(&mut self) -> Result<()> {
        self.inner.declaration()
    }

    /// Current nesting depth, read from the base writer's container stack
    #[inline]
    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    fn line_break(&mut self, depth: usize) -> Result<()> {
        let mut prefix = String::with_capacity(1 + depth * self.config.indent.len());
        prefix.push('\n');
        for _ in 0..depth {
            prefix.push_str(&self.config.indent);
        }
        self.inner.raw(&prefix)
    }

    /// Inline content for an element or comment at `depth`: reflowed into
    /// indented lines when wrapping applies, unchanged otherwise
    fn reflow(&self, value: &str, depth: usize) -> String {
        if self.config.text_wrap && value.chars().count() > self.config.width {
            let mut content = self.fill(value, depth + 1);
            content.push('\n');
            content.push_str(&self.config.indent.repeat(depth));
            content
        } else {
            value.to_string()
        }
    }

    /// `\n` plus the content wrapped to indented lines at `depth`
    fn fill(&self, value: &str, depth: usize) -> String {
        let indent = self.config.indent.repeat(depth);
        let width = self
            .config
            .width
            .saturating_sub(indent.len())
            .max(self.config.min_width);
        let options = textwrap::Options::new(width)
            .initial_indent(&indent)
            .subsequent_indent(&indent);
        format!("\n{}", textwrap::fill(value, options))
    }
}
