//! Base XML writer: container stack and direct-to-sink output

use std::io::Write;

use crate::error::Result;
use crate::escape::{escape_attr, escape_text, sanitize_comment};
use crate::types::Attrs;

/// Fixed header written once at the start of every document
pub(crate) const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// XML writer that writes directly to the sink without intermediate buffers
///
/// Maintains a stack of currently-open container names so that closing tags
/// always match in nested order. Pass `&mut sink` as `W` to keep ownership
/// of the sink outside the writer.
#[derive(Debug)]
pub struct XmlWriter<W: Write> {
    sink: W,
    stack: Vec<String>,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(sink: W) -> Self {
        XmlWriter {
            sink,
            stack: Vec::new(),
        }
    }

    /// Write raw, pre-escaped output directly
    #[inline]
    pub(crate) fn raw(&mut self, s: &str) -> Result<()> {
        self.sink.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Write the XML declaration
    pub fn declaration(&mut self) -> Result<()> {
        self.raw(XML_DECLARATION)
    }

    /// Open a container element and push it onto the stack
    ///
    /// The name is written as given, without syntax validation. Attribute
    /// values are escaped and quoted.
    pub fn open(&mut self, name: &str, attrs: &Attrs) -> Result<()> {
        write!(self.sink, "<{}", name)?;
        self.write_attrs(attrs)?;
        self.sink.write_all(b">")?;
        self.stack.push(name.to_string());
        Ok(())
    }

    /// Close the innermost open container
    ///
    /// # Panics
    ///
    /// Panics if no container is open.
    pub fn close(&mut self) -> Result<()> {
        let name = self
            .stack
            .pop()
            .expect("close() called with no open container");
        write!(self.sink, "</{}>", name)?;
        Ok(())
    }

    /// Open a container, run `body`, and close it on normal exit
    ///
    /// When `body` returns an error it propagates immediately and the
    /// closing tag is NOT written: the sink then holds a syntactically
    /// incomplete document, which downstream parsing will reject instead of
    /// silently treating a partial export as complete.
    pub fn container<F>(&mut self, name: &str, attrs: &Attrs, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.open(name, attrs)?;
        body(self)?;
        self.close()
    }

    /// Write a single element, either self-closing or with text content
    ///
    /// Does not touch the container stack.
    pub fn element(&mut self, name: &str, attrs: &Attrs, text: &str) -> Result<()> {
        write!(self.sink, "<{}", name)?;
        self.write_attrs(attrs)?;
        if text.is_empty() {
            self.sink.write_all(b"/>")?;
        } else {
            write!(self.sink, ">{}</{}>", escape_text(text), name)?;
        }
        Ok(())
    }

    /// Write escaped text at the current position, with no markup around it
    pub fn text(&mut self, value: &str) -> Result<()> {
        self.raw(&escape_text(value))
    }

    /// Write a comment; `--` sequences are removed from the content
    pub fn comment(&mut self, value: &str) -> Result<()> {
        write!(self.sink, "<!--{}-->", sanitize_comment(value))?;
        Ok(())
    }

    /// Write one element per item, in sequence order
    ///
    /// `transform` turns each item into `(name, attrs, text)` arguments for
    /// [`element`](Self::element).
    pub fn map<I, F>(&mut self, mut transform: F, items: I) -> Result<()>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> (String, Attrs, String),
    {
        for item in items {
            let (name, attrs, text) = transform(item);
            self.element(&name, &attrs, &text)?;
        }
        Ok(())
    }

    /// Current nesting depth (number of open containers)
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume the writer and return the sink
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_attrs(&mut self, attrs: &Attrs) -> Result<()> {
        for (name, value) in attrs.iter() {
            write!(self.sink, " {}={}", name, escape_attr(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string<F>(f: F) -> String
    where
        F: FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>,
    {
        let mut writer = XmlWriter::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_open_close() {
        let result = write_to_string(|w| {
            w.open("root", &Attrs::new())?;
            w.open("child", &Attrs::from([("key", "value")]))?;
            w.close()?;
            w.close()
        });
        assert_eq!(result, "<root><child key=\"value\"></child></root>");
    }

    #[test]
    fn test_element_with_text() {
        let result = write_to_string(|w| w.element("item", &Attrs::new(), "a & b"));
        assert_eq!(result, "<item>a &amp; b</item>");
    }

    #[test]
    fn test_element_self_closing() {
        let result = write_to_string(|w| w.element("item", &Attrs::from([("id", "1")]), ""));
        assert_eq!(result, "<item id=\"1\"/>");
    }

    #[test]
    fn test_attribute_escaping() {
        let result = write_to_string(|w| w.element("item", &Attrs::from([("key", "\"v\"")]), ""));
        assert_eq!(result, "<item key=\"&quot;v&quot;\"/>");
    }

    #[test]
    fn test_text_and_comment() {
        let result = write_to_string(|w| {
            w.open("root", &Attrs::new())?;
            w.text("<escaped>")?;
            w.comment("--note--")?;
            w.close()
        });
        assert_eq!(result, "<root>&lt;escaped><!--note--></root>");
    }

    #[test]
    fn test_container_closes_on_normal_exit() {
        let result = write_to_string(|w| {
            w.container("root", &Attrs::new(), |w| w.element("item", &Attrs::new(), ""))
        });
        assert_eq!(result, "<root><item/></root>");
    }

    #[test]
    fn test_container_leaves_tag_open_on_error() {
        let mut writer = XmlWriter::new(Vec::new());
        let result = writer.container("root", &Attrs::new(), |w| {
            w.text("partial")?;
            Err(crate::error::XmlError::UnknownPrefix {
                prefix: "n".to_string(),
            })
        });
        assert!(result.is_err());
        assert_eq!(writer.depth(), 1);
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "<root>partial");
    }

    #[test]
    fn test_map() {
        let data = [(1, "One"), (2, "Two"), (3, "Three")];
        let result = write_to_string(|w| {
            w.open("root", &Attrs::new())?;
            w.map(
                |(key, label): (i64, &str)| {
                    ("item".to_string(), Attrs::new().with_int("key", key), label.to_string())
                },
                data,
            )?;
            w.close()
        });
        assert_eq!(
            result,
            "<root>\
             <item key=\"1\">One</item>\
             <item key=\"2\">Two</item>\
             <item key=\"3\">Three</item>\
             </root>"
        );
    }

    #[test]
    #[should_panic(expected = "no open container")]
    fn test_close_without_open_panics() {
        let mut writer = XmlWriter::new(Vec::new());
        let _ = writer.close();
    }

    #[test]
    fn test_declaration() {
        let result = write_to_string(|w| w.declaration());
        assert_eq!(result, "<?xml version=\"1.0\" encoding=\"utf-8\"?>");
    }
}
