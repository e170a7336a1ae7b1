//! Type definitions for XML generation

use indexmap::IndexMap;

/// Ordered set of element attributes
///
/// Insertion order is preserved and determines the order attributes are
/// serialized in. Setting a name twice overwrites the value but keeps the
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    entries: IndexMap<String, String>,
}

impl Attrs {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Attrs {
            entries: IndexMap::new(),
        }
    }

    /// Set an attribute value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Set an attribute to a formatted integer value
    pub fn set_int(&mut self, name: impl Into<String>, value: i64) {
        let mut buf = itoa::Buffer::new();
        self.entries.insert(name.into(), buf.format(value).to_string());
    }

    /// Builder-style variant of [`set`](Self::set)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style variant of [`set_int`](Self::set_int)
    pub fn with_int(mut self, name: impl Into<String>, value: i64) -> Self {
        self.set_int(name, value);
        self
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|v| v.as_str())
    }

    /// Iterate over attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attrs {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Ordered mapping of namespace prefixes to URIs
///
/// The default namespace is keyed by the empty prefix `""`. Declaration
/// order is preserved and determines the order of the emitted `xmlns`
/// attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    entries: IndexMap<String, String>,
}

impl Namespaces {
    /// Create an empty namespace mapping
    pub fn new() -> Self {
        Namespaces {
            entries: IndexMap::new(),
        }
    }

    /// Declare a prefix. Use `""` for the default namespace.
    pub fn declare(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.entries.insert(prefix.into(), uri.into());
    }

    /// Builder-style variant of [`declare`](Self::declare)
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.declare(prefix, uri);
        self
    }

    /// Iterate over declared prefixes in declaration order
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Iterate over `(prefix, uri)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Namespaces {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut namespaces = Namespaces::new();
        for (prefix, uri) in iter {
            namespaces.declare(prefix, uri);
        }
        namespaces
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Namespaces {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
