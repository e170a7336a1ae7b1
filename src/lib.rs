//! # xmlstream
//!
//! A Rust library for generating XML as a stream, without first building a
//! tree in memory.
//!
//! ## Features
//!
//! - **Streaming Write**: XML goes straight to any [`std::io::Write`] sink
//!   as calls are made; memory usage stays constant however large the
//!   document gets
//! - **Matched Nesting**: a container stack guarantees closing tags match
//!   in nested order
//! - **Namespaces**: prefix declarations are scoped to their container and
//!   validated before anything is written
//! - **Pretty-Printing**: optional indentation with line wrapping for long
//!   text and comments
//! - **Fail Loudly**: an error escaping a container body leaves the
//!   document unclosed on purpose, so partial exports cannot pass for
//!   complete ones
//!
//! ## Quick Start
//!
//! ```
//! use xmlstream::{create_stream, Attrs, XmlOptions};
//!
//! # fn main() -> xmlstream::Result<()> {
//! let mut out = Vec::new();
//! let mut xml = create_stream(&mut out, "root", XmlOptions::default())?;
//!
//! xml.element("item", &Attrs::from([("key", "value")]), "text")?;
//! xml.container("container", &Attrs::from([("key", "value")]), |xml| {
//!     xml.text("text")?;
//!     xml.element("subelement", &Attrs::new(), "subelement text")
//! })?;
//!
//! xml.finish()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Namespaces
//!
//! ```
//! use xmlstream::{create_stream, Attrs, Namespaces, XmlOptions};
//!
//! # fn main() -> xmlstream::Result<()> {
//! let options = XmlOptions::new().namespaces([("", "urn:n"), ("n1", "urn:n1")]);
//! let mut xml = create_stream(Vec::new(), "root", options)?;
//!
//! xml.element("item", &Attrs::new(), "")?;
//! xml.container_ns("container", &Attrs::new(), &Namespaces::from([("n2", "urn:n2")]), |xml| {
//!     xml.element("n1:subelement", &Attrs::new(), "")?;
//!     xml.element("n2:subelement", &Attrs::new(), "")
//! })?;
//!
//! xml.finish()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Pretty-Printing
//!
//! ```
//! use xmlstream::{create_stream, Attrs, XmlOptions};
//!
//! # fn main() -> xmlstream::Result<()> {
//! let mut xml = create_stream(Vec::new(), "root", XmlOptions::new().indent(2))?;
//! xml.element("item", &Attrs::new(), "text")?;
//! let bytes = xml.finish()?;
//! assert!(bytes.ends_with(b"</root>\n"));
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod error;
pub mod escape;
pub mod types;
pub mod writer;

pub use buffer::MemoryBuffer;
pub use error::{Result, XmlError};
pub use types::{Attrs, Namespaces};
pub use writer::{
    create_stream, IndentConfig, IndentedWriter, NamespacedWriter, XmlOptions, XmlStream,
    XmlWriter,
};
