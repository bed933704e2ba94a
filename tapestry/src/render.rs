//! HTML pretty printer over the pull cursor.
//!
//! Line breaks follow the content model of each element:
//!
//! - block elements start on their own line, and their end tag goes on its
//!   own line when they have children
//! - phrasing elements never force a line break
//! - raw text elements (`script`, `style`) write their children verbatim,
//!   wrapped in newlines
//!
//! Only the kind of the last emitted node is tracked, so output is decided
//! one node at a time.

use std::borrow::Cow;
use std::fmt::Write;

use crate::debug;
use crate::dom::{Attribute, Document, Element, Node};
use crate::error::Result;
use crate::names::{AttributeName, Content, ElementName};
use crate::path::relativize;

const NL: &str = "\n";

/// Options for rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Path of the document being rendered. When set, `href` values that
    /// start with `/` are rewritten relative to it.
    pub base_path: Option<String>,
    /// Whether to escape `</script` sequences in script content (default: false)
    pub escape_script_end_tags: bool,
}

impl RenderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite absolute links relative to `path`.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Escape `</script` in script content.
    pub fn escape_script_end_tags(mut self) -> Self {
        self.escape_script_end_tags = true;
        self
    }
}

/// What was written last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Emitted {
    Start,
    BlockStart,
    BlockEnd,
    Phrase,
    Script,
}

/// Render a compiled document into `out`.
pub fn render<W: Write>(
    document: &mut Document<'_, '_>,
    out: &mut W,
    options: &RenderOptions,
) -> Result<()> {
    let mut renderer = Renderer { out, options };
    renderer.document(document)
}

/// Render a compiled document to a string.
pub fn render_to_string(document: &mut Document<'_, '_>, options: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    render(document, &mut out, options)?;
    Ok(out)
}

struct Renderer<'o, W: Write> {
    out: &'o mut W,
    options: &'o RenderOptions,
}

impl<W: Write> Renderer<'_, W> {
    fn document(&mut self, document: &mut Document<'_, '_>) -> Result<()> {
        let mut state = Emitted::Start;
        let mut nodes = document.nodes()?;
        while nodes.has_next()? {
            let node = nodes.next()?;
            state = self.node(state, None, node)?;
        }
        if state != Emitted::Start {
            self.out.write_str(NL)?;
        }
        debug!("rendered document");
        Ok(())
    }

    fn node(
        &mut self,
        state: Emitted,
        parent: Option<ElementName>,
        node: Node<'_, '_>,
    ) -> Result<Emitted> {
        match node {
            Node::DocumentType => {
                self.out.write_str("<!DOCTYPE html>")?;
                Ok(Emitted::BlockEnd)
            }
            Node::Element(mut element) => self.element(state, &mut element),
            Node::Text(text) => self.text(state, parent, text),
            Node::Raw(text) => {
                self.out.write_str(text)?;
                Ok(Emitted::Phrase)
            }
        }
    }

    fn element(&mut self, state: Emitted, element: &mut Element<'_, '_>) -> Result<Emitted> {
        let name = element.name();

        let (next, mut child) = match name.content() {
            Content::Phrasing => {
                if state == Emitted::BlockEnd {
                    self.out.write_str(NL)?;
                }
                (Emitted::Phrase, Emitted::Phrase)
            }
            Content::RawText => {
                if state != Emitted::Start {
                    self.out.write_str(NL)?;
                }
                (Emitted::Script, Emitted::Script)
            }
            Content::Block => {
                if state != Emitted::Start {
                    self.out.write_str(NL)?;
                }
                (Emitted::BlockEnd, Emitted::BlockStart)
            }
        };

        write!(self.out, "<{}", name.name())?;
        let mut attributes = element.attributes()?;
        while attributes.has_next()? {
            let mut attribute = attributes.next()?;
            self.attribute(&mut attribute)?;
        }
        self.out.write_str(">")?;

        if name.is_void() {
            return Ok(next);
        }

        let mut count = 0;
        let mut nodes = element.nodes()?;
        while nodes.has_next()? {
            let node = nodes.next()?;
            child = self.node(child, Some(name), node)?;
            count += 1;
        }

        if count > 0 {
            let newline = if next == Emitted::Phrase {
                child == Emitted::BlockEnd
            } else {
                child != Emitted::Phrase
            };
            if newline {
                self.out.write_str(NL)?;
            }
        }

        write!(self.out, "</{}>", name.name())?;
        Ok(next)
    }

    fn attribute(&mut self, attribute: &mut Attribute<'_, '_>) -> Result<()> {
        let name = attribute.name();
        write!(self.out, " {}", name.name())?;
        if attribute.is_boolean() {
            return Ok(());
        }

        let quote = if attribute.is_single_quoted() { '\'' } else { '"' };
        self.out.write_char('=')?;
        self.out.write_char(quote)?;

        let options = self.options;
        match (&options.base_path, name) {
            (Some(base), AttributeName::Href) => {
                let value = attribute.value()?;
                let value = if value.starts_with('/') {
                    relativize(base, &value)
                } else {
                    Cow::Borrowed(value.as_str())
                };
                self.write_attr_value_escaped(&value)?;
            }
            _ => {
                let mut values = attribute.values()?;
                let mut first = true;
                while values.has_next()? {
                    if !first {
                        self.out.write_char(' ')?;
                    }
                    first = false;
                    let value = values.next()?;
                    self.write_attr_value_escaped(value)?;
                }
            }
        }

        self.out.write_char(quote)?;
        Ok(())
    }

    fn text(&mut self, state: Emitted, parent: Option<ElementName>, text: &str) -> Result<Emitted> {
        let raw_parent = parent.filter(|p| p.content() == Content::RawText);

        if let Some(parent) = raw_parent {
            if state == Emitted::Script && !starts_with_newline(text) {
                self.out.write_str(NL)?;
            }
            self.write_raw_text(text, parent)?;
            if !ends_with_newline(text) {
                self.out.write_str(NL)?;
            }
            return Ok(Emitted::Phrase);
        }

        if state == Emitted::BlockEnd && !starts_with_newline(text) {
            self.out.write_str(NL)?;
        }
        self.write_text_escaped(text)?;
        Ok(Emitted::Phrase)
    }

    /// Escape text content.
    fn write_text_escaped(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            match c {
                '&' => self.out.write_str("&amp;")?,
                '<' => self.out.write_str("&lt;")?,
                '>' => self.out.write_str("&gt;")?,
                _ => self.out.write_char(c)?,
            }
        }
        Ok(())
    }

    /// Escape an attribute value. Both quote characters are escaped so the
    /// value is safe inside either kind of quote.
    fn write_attr_value_escaped(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            match c {
                '&' => self.out.write_str("&amp;")?,
                '<' => self.out.write_str("&lt;")?,
                '>' => self.out.write_str("&gt;")?,
                '"' => self.out.write_str("&#34;")?,
                '\'' => self.out.write_str("&#39;")?,
                _ => self.out.write_char(c)?,
            }
        }
        Ok(())
    }

    /// Write raw text content, optionally escaping script end tags.
    fn write_raw_text(&mut self, text: &str, parent: ElementName) -> Result<()> {
        if !(self.options.escape_script_end_tags && parent == ElementName::Script) {
            self.out.write_str(text)?;
            return Ok(());
        }

        // ASCII case-insensitive match on the original bytes keeps indices
        // aligned with `text`
        const PATTERN: &[u8] = b"</script";
        let bytes = text.as_bytes();
        let mut last_end = 0;
        let mut i = 0;
        while i + PATTERN.len() <= bytes.len() {
            if bytes[i..i + PATTERN.len()].eq_ignore_ascii_case(PATTERN) {
                self.out.write_str(&text[last_end..i])?;
                self.out.write_str("<\\/script")?;
                last_end = i + PATTERN.len();
                i = last_end;
            } else {
                i += 1;
            }
        }
        self.out.write_str(&text[last_end..])?;
        Ok(())
    }
}

fn starts_with_newline(text: &str) -> bool {
    text.starts_with(['\n', '\r'])
}

fn ends_with_newline(text: &str) -> bool {
    text.ends_with(['\n', '\r'])
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Recorder;
    use facet_testhelpers::test;

    fn to_html(rec: &mut Recorder<'_>, options: &RenderOptions) -> String {
        let mut doc = rec.compile().unwrap();
        render_to_string(&mut doc, options).unwrap()
    }

    #[test]
    fn test_block_children_on_own_lines() {
        let mut rec = Recorder::new();
        let h1 = rec.element_text(ElementName::H1, "T").unwrap();
        let a = rec.element_text(ElementName::P, "A").unwrap();
        let b = rec.element_text(ElementName::P, "B").unwrap();
        let _ = rec.element(ElementName::Div, [h1, a, b]).unwrap();
        assert_eq!(
            to_html(&mut rec, &RenderOptions::default()),
            "<div>\n<h1>T</h1>\n<p>A</p>\n<p>B</p>\n</div>\n"
        );
    }

    #[test]
    fn test_phrasing_stays_inline() {
        let mut rec = Recorder::new();
        let strong = rec.element_text(ElementName::Strong, "bold").unwrap();
        let text = rec.text(" & plain").unwrap();
        let _ = rec.element(ElementName::P, [strong, text]).unwrap();
        assert_eq!(
            to_html(&mut rec, &RenderOptions::default()),
            "<p><strong>bold</strong> &amp; plain</p>\n"
        );
    }

    #[test]
    fn test_style_content_is_padded() {
        let mut rec = Recorder::new();
        let css = rec.text("body { color: red }").unwrap();
        let _ = rec.element(ElementName::Style, [css]).unwrap();
        assert_eq!(
            to_html(&mut rec, &RenderOptions::default()),
            "<style>\nbody { color: red }\n</style>\n"
        );

        rec.reset();
        let css = rec.text("\nbody {}\n").unwrap();
        let _ = rec.element(ElementName::Style, [css]).unwrap();
        assert_eq!(
            to_html(&mut rec, &RenderOptions::default()),
            "<style>\nbody {}\n</style>\n"
        );
    }

    #[test]
    fn test_script_end_tag_escaping() {
        let mut rec = Recorder::new();
        let js = rec.text("let s = '</SCRIPT>';").unwrap();
        let _ = rec.element(ElementName::Script, [js]).unwrap();
        assert_eq!(
            to_html(&mut rec, &RenderOptions::new()),
            "<script>\nlet s = '</SCRIPT>';\n</script>\n"
        );
        assert_eq!(
            to_html(&mut rec, &RenderOptions::new().escape_script_end_tags()),
            "<script>\nlet s = '<\\/script>';\n</script>\n"
        );
    }

    #[test]
    fn test_attribute_quoting() {
        let mut rec = Recorder::new();
        let disabled = rec.attribute(AttributeName::Disabled, None).unwrap();
        let click = rec
            .attribute(AttributeName::DataOnClick, Some("[\"x\"]".into()))
            .unwrap();
        let title = rec
            .attribute(AttributeName::Title, Some("\"quote\" & <tag>".into()))
            .unwrap();
        let _ = rec
            .element(ElementName::Button, [disabled, click, title])
            .unwrap();
        assert_eq!(
            to_html(&mut rec, &RenderOptions::default()),
            "<button disabled data-on-click='[&#34;x&#34;]' title=\"&#34;quote&#34; &amp; &lt;tag&gt;\"></button>\n"
        );
    }

    #[test]
    fn test_link_rewriting() {
        let mut rec = Recorder::new();
        let href = rec
            .attribute(AttributeName::Href, Some("/a/b/d".into()))
            .unwrap();
        let _ = rec.element(ElementName::A, [href]).unwrap();
        let options = RenderOptions::new().with_base_path("/a/b/c");
        assert_eq!(to_html(&mut rec, &options), "<a href=\"d\"></a>\n");
        assert_eq!(
            to_html(&mut rec, &RenderOptions::new()),
            "<a href=\"/a/b/d\"></a>\n"
        );
    }
}
