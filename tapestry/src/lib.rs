//! Byte-tape HTML recording and rendering.
//!
//! tapestry provides:
//! - **Recording**: a [`Recorder`] that turns nested builder calls into a
//!   single compact byte tape, with string values kept in a side table
//! - **Reading**: a pull-style DOM ([`Document`], [`Element`], [`Attribute`])
//!   decoded from the tape without allocating nodes
//! - **Rendering**: minified-but-readable HTML with correct escaping and
//!   optional link rewriting
//! - **Markup**: a fluent [`Markup`] facade for templates
//!
//! # Example
//!
//! ```rust
//! use tapestry::{AttributeName, ElementName, Recorder, RenderOptions, render_to_string};
//!
//! let mut r = Recorder::new();
//! r.doctype()?;
//! let href = r.attribute(AttributeName::Href, Some("/index.html".into()))?;
//! let label = r.text("home")?;
//! r.element(ElementName::A, [href, label])?;
//!
//! let mut document = r.compile()?;
//! let options = RenderOptions::new().with_base_path("/about.html");
//! let html = render_to_string(&mut document, &options)?;
//! assert_eq!(html, "<!DOCTYPE html>\n<a href=\"index.html\">home</a>\n");
//! # Ok::<(), tapestry::Error>(())
//! ```

mod tracing_macros;
pub(crate) use tracing_macros::{debug, trace};

mod bytes;
mod dom;
mod error;
mod markup;
pub mod names;
mod objects;
mod path;
mod proto;
mod recorder;
mod render;
mod stem;

pub use dom::{Attribute, Attributes, Document, DocumentNodes, Element, ElementNodes, Node, Values};
pub use error::{Error, Result};
pub use markup::Markup;
pub use names::{Ambiguous, AttributeName, Content, ElementName};
pub use path::relativize;
pub use recorder::{
    DEFAULT_SCRATCH_CAPACITY, DEFAULT_TAPE_CAPACITY, FragmentStart, Instruction, Recorder,
};
pub use render::{RenderOptions, render, render_to_string};
pub use stem::Stem;
