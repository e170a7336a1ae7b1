//! Namespace layer: prefix scoping and validation
//!
//! Wraps the base [`XmlWriter`] and keeps one set of visible prefixes per
//! open container. Every element and attribute name of the form
//! `prefix:local` is checked against the enclosing scope before any output
//! is written, so a failed call leaves the sink exactly as it was.

use std::collections::HashSet;
use std::io::Write;

use crate::error::{Result, XmlError};
use crate::types::{Attrs, Namespaces};
use crate::writer::base::XmlWriter;

/// XML writer that validates and declares namespace prefixes
#[derive(Debug)]
pub struct NamespacedWriter<W: Write> {
    inner: XmlWriter<W>,
    // one visible-prefix set per open container, plus the root scope at the
    // bottom; never shorter than 1
    scopes: Vec<HashSet<String>>,
}

impl<W: Write> NamespacedWriter<W> {
    pub fn new(inner: XmlWriter<W>) -> Self {
        let mut root_scope = HashSet::new();
        // the xml prefix is implicitly declared in every document
        root_scope.insert("xml".to_string());
        NamespacedWriter {
            inner,
            scopes: vec![root_scope],
        }
    }

    /// Validate prefixes and merge `xmlns` declarations into the attributes
    ///
    /// Returns the merged attribute set and the visible-prefix set for the
    /// new scope. Writes nothing: callers commit the result afterwards, so
    /// a validation failure produces no partial output.
    ///
    /// A prefix declared in `namespaces` is already visible to the name and
    /// attributes of this same call.
    pub(crate) fn prepare(
        &self,
        name: &str,
        attrs: &Attrs,
        namespaces: &Namespaces,
    ) -> Result<(Attrs, HashSet<String>)> {
        let mut visible = self
            .scopes
            .last()
            .expect("scope stack invariant broken")
            .clone();
        for prefix in namespaces.prefixes() {
            visible.insert(prefix.to_string());
        }

        for candidate in std::iter::once(name).chain(attrs.names()) {
            if let Some((prefix, _)) = candidate.split_once(':') {
                if !visible.contains(prefix) {
                    return Err(XmlError::UnknownPrefix {
                        prefix: prefix.to_string(),
                    });
                }
            }
        }

        let mut merged = attrs.clone();
        for (prefix, uri) in namespaces.iter() {
            if prefix.is_empty() {
                merged.set("xmlns", uri);
            } else {
                merged.set(format!("xmlns:{}", prefix), uri);
            }
        }
        Ok((merged, visible))
    }

    /// Push the prepared scope and write the opening tag
    pub(crate) fn commit_open(
        &mut self,
        name: &str,
        merged: Attrs,
        visible: HashSet<String>,
    ) -> Result<()> {
        self.scopes.push(visible);
        self.inner.open(name, &merged)
    }

    /// Open a container, declaring any namespaces for its scope
    pub fn open(&mut self, name: &str, attrs: &Attrs, namespaces: &Namespaces) -> Result<()> {
        let (merged, visible) = self.prepare(name, attrs, namespaces)?;
        self.commit_open(name, merged, visible)
    }

    /// Close the innermost open container and drop its scope
    ///
    /// # Panics
    ///
    /// Panics if no container is open.
    pub fn close(&mut self) -> Result<()> {
        self.inner.close()?;
        self.scopes.pop();
        Ok(())
    }

    /// Write a prepared element without re-validating
    pub(crate) fn commit_element(&mut self, name: &str, merged: Attrs, text: &str) -> Result<()> {
        self.inner.element(name, &merged, text)
    }

    /// Write a single element; namespaces declared here apply only to the
    /// element itself, no scope is pushed
    pub fn element(
        &mut self,
        name: &str,
        attrs: &Attrs,
        namespaces: &Namespaces,
        text: &str,
    ) -> Result<()> {
        let (merged, _) = self.prepare(name, attrs, namespaces)?;
        self.commit_element(name, merged, text)
    }

    pub fn text(&mut self, value: &str) -> Result<()> {
        self.inner.text(value)
    }

    pub fn comment(&mut self, value: &str) -> Result<()> {
        self.inner.comment(value)
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

    #[inline]
    pub(crate) fn raw(&mut self, s: &str) -> Result<()> {
        self.inner.raw(s)
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
}
