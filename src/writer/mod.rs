//! Streaming XML generation
//!
//! The writer is layered: [`XmlWriter`] keeps the container stack and
//! writes to the sink, [`NamespacedWriter`] adds prefix scoping and
//! validation on top of it, and [`IndentedWriter`] adds pretty-printing on
//! top of that. [`create_stream`] picks the right stack from the supplied
//! [`XmlOptions`] and returns it behind the [`XmlStream`] facade.

pub mod base;
pub mod indented;
pub mod namespaced;

use std::io::Write;

use crate::error::Result;
use crate::types::{Attrs, Namespaces};

pub use base::XmlWriter;
pub use indented::{IndentConfig, IndentedWriter};
pub use namespaced::NamespacedWriter;

/// Options for [`create_stream`]
///
/// All fields are optional; the defaults produce a compact document with no
/// namespace handling and no pretty-printing.
#[derive(Debug, Clone)]
pub struct XmlOptions {
    /// Attributes of the root element
    pub attrs: Attrs,
    /// Namespace declarations for the root scope
    pub namespaces: Namespaces,
    /// Spaces per indentation level; `None` disables pretty-printing
    /// entirely
    pub indent: Option<usize>,
    /// Target line width for wrapped content (default 70)
    pub width: usize,
    /// Wrapped lines never get narrower than this (default 20)
    pub min_width: usize,
    /// Whether long element/comment content is reflowed (default true)
    pub text_wrap: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            attrs: Attrs::new(),
            namespaces: Namespaces::new(),
            indent: None,
            width: 70,
            min_width: 20,
            text_wrap: true,
        }
    }
}

impl XmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root element attributes
    pub fn attrs(mut self, attrs: impl Into<Attrs>) -> Self {
        self.attrs = attrs.into();
        self
    }

    /// Declare namespaces for the root scope
    pub fn namespaces(mut self, namespaces: impl Into<Namespaces>) -> Self {
        self.namespaces = namespaces.into();
        self
    }

    /// Enable pretty-printing with the given indent size
    pub fn indent(mut self, size: usize) -> Self {
        self.indent = Some(size);
        self
    }

    /// Set the target wrap width
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the minimum wrap width
    pub fn min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    /// Enable or disable reflowing of long content
    pub fn text_wrap(mut self, text_wrap: bool) -> Self {
        self.text_wrap = text_wrap;
        self
    }
}

/// Streaming XML generator over any [`Write`] sink
///
/// Created by [`create_stream`], which selects the cheapest layer stack the
/// options allow. Every operation writes through to the sink immediately,
/// in call order.
#[derive(Debug)]
pub enum XmlStream<W: Write> {
    /// No namespace handling, no pretty-printing
    Plain(XmlWriter<W>),
    /// Namespace scoping and validation
    Namespaced(NamespacedWriter<W>),
    /// Pretty-printing on top of namespace handling
    Indented(IndentedWriter<W>),
}

/// Create a streaming XML generator
///
/// Immediately writes the XML declaration and opens the root container.
/// Call [`finish`](XmlStream::finish) to close the root and get the sink
/// back.
///
/// # Examples
///
/// ```
/// use xmlstream::{create_stream, Attrs, XmlOptions};
///
/// # fn main() -> xmlstream::Result<()> {
/// let mut xml = create_stream(Vec::new(), "root", XmlOptions::default())?;
/// xml.element("item", &Attrs::from([("key", "value")]), "text")?;
/// xml.container("container", &Attrs::new(), |xml| {
///     xml.text("text")?;
///     xml.element("subelement", &Attrs::new(), "subelement text")
/// })?;
/// let bytes = xml.finish()?;
/// assert!(bytes.starts_with(b"<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
/// # Ok(())
/// # }
/// ```
pub fn create_stream<W: Write>(sink: W, root: &str, options: XmlOptions) -> Result<XmlStream<W>> {
    let XmlOptions {
        attrs,
        namespaces,
        indent,
        width,
        min_width,
        text_wrap,
    } = options;

    let mut base = XmlWriter::new(sink);
    base.declaration()?;

    if let Some(size) = indent {
        let config = IndentConfig {
            indent: " ".repeat(size),
            width,
            min_width,
            text_wrap,
        };
        let mut writer = IndentedWriter::new(NamespacedWriter::new(base), config);
        writer.open(root, &attrs, &namespaces)?;
        Ok(XmlStream::Indented(writer))
    } else if !namespaces.is_empty() {
        let mut writer = NamespacedWriter::new(base);
        writer.open(root, &attrs, &namespaces)?;
        Ok(XmlStream::Namespaced(writer))
    } else {
        base.open(root, &attrs)?;
        Ok(XmlStream::Plain(base))
    }
}

impl<W: Write> XmlStream<W> {
    /// Open a container element
    pub fn open(&mut self, name: &str, attrs: &Attrs) -> Result<()> {
        match self {
            XmlStream::Plain(w) => w.open(name, attrs),
            XmlStream::Namespaced(w) => w.open(name, attrs, &Namespaces::new()),
            XmlStream::Indented(w) => w.open(name, attrs, &Namespaces::new()),
        }
    }

    /// Open a container element, declaring namespaces for its scope
    ///
    /// # Panics
    ///
    /// Panics on a stream created without namespaces and without indent:
    /// declaring namespaces there is a caller logic error.
    pub fn open_ns(&mut self, name: &str, attrs: &Attrs, namespaces: &Namespaces) -> Result<()> {
        match self {
            XmlStream::Plain(_) => panic!("stream was created without namespace support"),
            XmlStream::Namespaced(w) => w.open(name, attrs, namespaces),
            XmlStream::Indented(w) => w.open(name, attrs, namespaces),
        }
    }

    /// Close the innermost open container
    ///
    /// # Panics
    ///
    /// Panics if no container is open.
    pub fn close(&mut self) -> Result<()> {
        match self {
            XmlStream::Plain(w) => w.close(),
            XmlStream::Namespaced(w) => w.close(),
            XmlStream::Indented(w) => w.close(),
        }
    }

    /// Open a container, run `body`, and close it on normal exit
    ///
    /// When `body` returns an error it propagates immediately and the
    /// closing tag is NOT written: the document is deliberately left
    /// non-well-formed so a partial export fails downstream parsing instead
    /// of passing for a complete one.
    pub fn container<F>(&mut self, name: &str, attrs: &Attrs, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.open(name, attrs)?;
        body(self)?;
        self.close()
    }

    /// Scoped form of [`open_ns`](Self::open_ns); same abnormal-exit
    /// behavior as [`container`](Self::container)
    pub fn container_ns<F>(
        &mut self,
        name: &str,
        attrs: &Attrs,
        namespaces: &Namespaces,
        body: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.open_ns(name, attrs, namespaces)?;
        body(self)?;
        self.close()
    }

    /// Write a single element, self-closing when `text` is empty
    pub fn element(&mut self, name: &str, attrs: &Attrs, text: &str) -> Result<()> {
        match self {
            XmlStream::Plain(w) => w.element(name, attrs, text),
            XmlStream::Namespaced(w) => w.element(name, attrs, &Namespaces::new(), text),
            XmlStream::Indented(w) => w.element(name, attrs, &Namespaces::new(), text),
        }
    }

    /// Write a single element with namespace declarations of its own
    ///
    /// # Panics
    ///
    /// Panics on a stream created without namespace support.
    pub fn element_ns(
        &mut self,
        name: &str,
        attrs: &Attrs,
        namespaces: &Namespaces,
        text: &str,
    ) -> Result<()> {
        match self {
            XmlStream::Plain(_) => panic!("stream was created without namespace support"),
            XmlStream::Namespaced(w) => w.element(name, attrs, namespaces, text),
            XmlStream::Indented(w) => w.element(name, attrs, namespaces, text),
        }
    }

    /// Write text into the currently open container
    pub fn text(&mut self, value: &str) -> Result<()> {
        match self {
            XmlStream::Plain(w) => w.text(value),
            XmlStream::Namespaced(w) => w.text(value),
            XmlStream::Indented(w) => w.text(value),
        }
    }

    /// Write a comment
    pub fn comment(&mut self, value: &str) -> Result<()> {
        match self {
            XmlStream::Plain(w) => w.comment(value),
            XmlStream::Namespaced(w) => w.comment(value),
            XmlStream::Indented(w) => w.comment(value),
        }
    }

    /// Write one element per item, in sequence order
    ///
    /// `transform` turns each item into `(name, attrs, text)` arguments for
    /// [`element`](Self::element).
    pub fn map<I, F>(&mut self, transform: F, items: I) -> Result<()>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> (String, Attrs, String),
    {
        match self {
            XmlStream::Plain(w) => w.map(transform, items),
            XmlStream::Namespaced(w) => w.map(transform, items),
            XmlStream::Indented(w) => w.map(transform, items),
        }
    }

    /// Current nesting depth (number of open containers)
    pub fn depth(&self) -> usize {
        match self {
            XmlStream::Plain(w) => w.depth(),
            XmlStream::Namespaced(w) => w.depth(),
            XmlStream::Indented(w) => w.depth(),
        }
    }

    /// Close the root container and return the sink
    ///
    /// # Panics
    ///
    /// Panics unless exactly the root container is open; nested containers
    /// must be closed by the code that opened them.
    pub fn finish(mut self) -> Result<W> {
        assert_eq!(
            self.depth(),
            1,
            "finish() requires exactly the root container open"
        );
        self.close()?;
        Ok(match self {
            XmlStream::Plain(w) => w.into_inner(),
            XmlStream::Namespaced(w) => w.into_inner(),
            XmlStream::Indented(w) => w.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XmlError;

    fn to_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_default_options_pick_plain_stream() {
        let xml = create_stream(Vec::new(), "root", XmlOptions::default()).unwrap();
        assert!(matches!(xml, XmlStream::Plain(_)));
    }

    #[test]
    fn test_namespaces_pick_namespaced_stream() {
        let options = XmlOptions::new().namespaces([("n1", "urn:n1")]);
        let xml = create_stream(Vec::new(), "root", options).unwrap();
        assert!(matches!(xml, XmlStream::Namespaced(_)));
    }

    #[test]
    fn test_indent_picks_indented_stream() {
        let options = XmlOptions::new().indent(2);
        let xml = create_stream(Vec::new(), "root", options).unwrap();
        assert!(matches!(xml, XmlStream::Indented(_)));
    }

    #[test]
    fn test_compact_document() {
        let mut xml = create_stream(Vec::new(), "root", XmlOptions::default()).unwrap();
        xml.element("item", &Attrs::new(), "Text").unwrap();
        let bytes = xml.finish().unwrap();
        assert_eq!(
            to_string(bytes),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><root><item>Text</item></root>"
        );
    }

    #[test]
    fn test_root_namespace_declarations() {
        let options = XmlOptions::new().namespaces([("", "urn:n"), ("n1", "urn:n1")]);
        let mut xml = create_stream(Vec::new(), "root", options).unwrap();
        xml.element("n1:item", &Attrs::new(), "").unwrap();
        let bytes = xml.finish().unwrap();
        assert_eq!(
            to_string(bytes),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <root xmlns=\"urn:n\" xmlns:n1=\"urn:n1\"><n1:item/></root>"
        );
    }

    #[test]
    fn test_unknown_root_prefix_fails_construction() {
        let options = XmlOptions::new().namespaces([("n", "urn:n")]);
        let err = create_stream(Vec::new(), "n1:root", options).unwrap_err();
        assert!(matches!(err, XmlError::UnknownPrefix { prefix } if prefix == "n1"));
    }

    #[test]
    fn test_container_scoped_close() {
        let mut xml = create_stream(Vec::new(), "root", XmlOptions::default()).unwrap();
        xml.container("a", &Attrs::new(), |xml| {
            xml.container("b", &Attrs::new(), |xml| xml.text("deep"))
        })
        .unwrap();
        assert_eq!(xml.depth(), 1);
        let bytes = xml.finish().unwrap();
        assert!(to_string(bytes).ends_with("<a><b>deep</b></a></root>"));
    }

    #[test]
    fn test_container_error_leaves_document_unbalanced() {
        let mut xml = create_stream(Vec::new(), "root", XmlOptions::default()).unwrap();
        let result = xml.container("a", &Attrs::new(), |xml| {
            xml.text("partial")?;
            Err(XmlError::UnknownPrefix {
                prefix: "x".to_string(),
            })
        });
        assert!(result.is_err());
        assert_eq!(xml.depth(), 2);
    }

    #[test]
    #[should_panic(expected = "without namespace support")]
    fn test_open_ns_on_plain_stream_panics() {
        let mut xml = create_stream(Vec::new(), "root", XmlOptions::default()).unwrap();
        let _ = xml.open_ns("a", &Attrs::new(), &Namespaces::from([("n", "urn:n")]));
    }

    #[test]
    #[should_panic(expected = "exactly the root container")]
    fn test_finish_with_nested_container_panics() {
        let mut xml = create_stream(Vec::new(), "root", XmlOptions::default()).unwrap();
        xml.open("a", &Attrs::new()).unwrap();
        let _ = xml.finish();
    }

    #[test]
    fn test_map_through_stream() {
        let data = [(1, "One"), (2, "Two"), (3, "Three")];
        let mut xml = create_stream(Vec::new(), "root", XmlOptions::default()).unwrap();
        xml.map(
            |(key, label): (i64, &str)| {
                (
                    "item".to_string(),
                    Attrs::new().with_int("key", key),
                    label.to_string(),
                )
            },
            data,
        )
        .unwrap();
        let bytes = xml.finish().unwrap();
        assert!(to_string(bytes).contains(
            "<item key=\"1\">One</item><item key=\"2\">Two</item><item key=\"3\">Three</item>"
        ));
    }
}
