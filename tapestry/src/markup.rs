//! A fluent surface over [`Recorder`].
//!
//! Every method takes `&self`, so calls nest the way the document does:
//!
//! ```
//! use tapestry::{ElementName, Markup};
//!
//! let m = Markup::new();
//! m.element(ElementName::Div, [
//!     m.element_text(ElementName::H1, "T"),
//!     m.element_text(ElementName::P, "A"),
//! ]);
//! assert_eq!(m.to_html().unwrap(), "<div>\n<h1>T</h1>\n<p>A</p>\n</div>\n");
//! ```
//!
//! Methods return tokens rather than `Result`s. The first recording error is
//! kept and returned by whatever reads the document next (`render`,
//! `to_html`, `into_recorder`); calls made after it record nothing, and
//! reporting it starts a fresh document.

use std::cell::{Cell, RefCell};
use std::fmt::Write;

use crate::error::{Error, Result};
use crate::names::{Ambiguous, AttributeName, ElementName};
use crate::recorder::{Instruction, Recorder};
use crate::render::{RenderOptions, render};
use crate::stem::Stem;

#[derive(Debug, Default)]
pub struct Markup<'a> {
    recorder: RefCell<Recorder<'a>>,
    error: RefCell<Option<Error>>,
    ids: Cell<usize>,
}

impl<'a> From<Recorder<'a>> for Markup<'a> {
    fn from(recorder: Recorder<'a>) -> Self {
        Self {
            recorder: RefCell::new(recorder),
            error: RefCell::new(None),
            ids: Cell::new(0),
        }
    }
}

impl<'a> Markup<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the recorder unless an earlier call failed.
    fn record<T>(&self, f: impl FnOnce(&mut Recorder<'a>) -> Result<T>) -> Option<T> {
        if self.error.borrow().is_some() {
            return None;
        }
        let result = f(&mut self.recorder.borrow_mut());
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                *self.error.borrow_mut() = Some(error);
                None
            }
        }
    }

    fn instruction(
        &self,
        f: impl FnOnce(&mut Recorder<'a>) -> Result<Instruction<'a>>,
    ) -> Instruction<'a> {
        self.record(f).unwrap_or_else(Instruction::noop)
    }

    /// Reports a pending error once, discarding the half-recorded document.
    fn take_error(&self) -> Result<()> {
        let Some(error) = self.error.borrow_mut().take() else {
            return Ok(());
        };
        self.recorder.borrow_mut().reset();
        self.ids.set(0);
        Err(error)
    }

    pub fn doctype(&self) {
        self.record(|r| r.doctype());
    }

    pub fn element<I>(&self, name: ElementName, contents: I) -> Instruction<'a>
    where
        I: IntoIterator<Item = Instruction<'a>>,
    {
        // contents may record as they are iterated
        let contents: Vec<_> = contents.into_iter().collect();
        self.instruction(|r| r.element(name, contents))
    }

    pub fn element_text(&self, name: ElementName, text: impl Into<Stem<'a>>) -> Instruction<'a> {
        let text = text.into();
        self.instruction(|r| r.element_text(name, text))
    }

    /// An attribute with a value.
    pub fn attr(&self, name: AttributeName, value: impl Into<Stem<'a>>) -> Instruction<'a> {
        let value = value.into();
        self.instruction(|r| r.attribute(name, Some(value)))
    }

    /// A boolean attribute.
    pub fn flag(&self, name: AttributeName) -> Instruction<'a> {
        self.instruction(|r| r.attribute(name, None))
    }

    pub fn ambiguous(&self, name: Ambiguous, value: impl Into<Stem<'a>>) -> Instruction<'a> {
        let value = value.into();
        self.instruction(|r| r.ambiguous(name, value))
    }

    pub fn text(&self, value: impl Into<Stem<'a>>) -> Instruction<'a> {
        let value = value.into();
        self.instruction(|r| r.text(value))
    }

    pub fn raw(&self, value: impl Into<Stem<'a>>) -> Instruction<'a> {
        let value = value.into();
        self.instruction(|r| r.raw(value))
    }

    pub fn flatten<I>(&self, contents: I) -> Instruction<'a>
    where
        I: IntoIterator<Item = Instruction<'a>>,
    {
        let contents: Vec<_> = contents.into_iter().collect();
        self.instruction(|r| r.flatten(contents))
    }

    pub fn flatten_non_null<I>(&self, contents: I) -> Instruction<'a>
    where
        I: IntoIterator<Item = Option<Instruction<'a>>>,
    {
        let contents: Vec<_> = contents.into_iter().collect();
        self.instruction(|r| r.flatten_non_null(contents))
    }

    /// Records everything `f` records as one fragment.
    pub fn fragment(&self, f: impl FnOnce(&Self)) -> Instruction<'a> {
        let Some(start) = self.record(|r| r.fragment_begin()) else {
            return Instruction::noop();
        };
        f(self);
        self.instruction(|r| r.fragment_end(start))
    }

    pub fn noop(&self) -> Instruction<'a> {
        Instruction::noop()
    }

    pub fn id(&self, value: impl Into<Stem<'a>>) -> Instruction<'a> {
        Instruction::id(value)
    }

    pub fn class_name(&self, value: impl Into<Stem<'a>>) -> Instruction<'a> {
        Instruction::class_name(value)
    }

    /// An `id` unique within the document: `html-1`, `html-2`, ...
    pub fn next_id(&self) -> Instruction<'a> {
        let n = self.ids.get() + 1;
        self.ids.set(n);
        Instruction::id(format!("html-{n}"))
    }

    /// Forgets the document and any pending error.
    pub fn reset(&self) {
        self.recorder.borrow_mut().reset();
        self.error.borrow_mut().take();
        self.ids.set(0);
    }

    pub fn render<W: Write>(&self, out: &mut W, options: &RenderOptions) -> Result<()> {
        self.take_error()?;
        let mut recorder = self.recorder.borrow_mut();
        let mut document = recorder.compile()?;
        render(&mut document, out, options)
    }

    pub fn to_html(&self) -> Result<String> {
        self.to_html_with_options(&RenderOptions::default())
    }

    pub fn to_html_with_options(&self, options: &RenderOptions) -> Result<String> {
        let mut out = String::new();
        self.render(&mut out, options)?;
        Ok(out)
    }

    pub fn into_recorder(self) -> Result<Recorder<'a>> {
        self.take_error()?;
        Ok(self.recorder.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_nested_calls() {
        let m = Markup::new();
        m.doctype();
        m.element(
            ElementName::Html,
            [
                m.element(
                    ElementName::Head,
                    [m.element(ElementName::Meta, [m.attr(AttributeName::Charset, "utf-8")])],
                ),
                m.element(ElementName::Body, []),
            ],
        );
        assert_eq!(
            m.to_html().unwrap(),
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body></body>\n</html>\n"
        );
    }

    #[test]
    fn test_lazy_contents_record_in_order() {
        let m = Markup::new();
        let items = ["a", "b"];
        m.element(
            ElementName::Ul,
            items.iter().map(|item| m.element_text(ElementName::Li, *item)),
        );
        assert_eq!(m.to_html().unwrap(), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
    }

    #[test]
    fn test_next_id_counts_per_document() {
        let m = Markup::new();
        m.element(ElementName::Div, [m.next_id()]);
        m.element(ElementName::Div, [m.next_id()]);
        assert_eq!(
            m.to_html().unwrap(),
            "<div id=\"html-1\"></div>\n<div id=\"html-2\"></div>\n"
        );

        m.reset();
        m.element(ElementName::Div, [m.next_id()]);
        assert_eq!(m.to_html().unwrap(), "<div id=\"html-1\"></div>\n");
    }

    #[test]
    fn test_first_error_is_reported() {
        let m = Markup::new();
        let mut children = Vec::new();
        for _ in 0..20_000 {
            children.push(m.text("x"));
        }
        m.element(ElementName::Div, children);
        m.text("after");
        let err = m.to_html().unwrap_err();
        assert!(err.is_capacity());
        assert_eq!(m.to_html().unwrap(), "");

        m.element_text(ElementName::P, "ok");
        assert_eq!(m.to_html().unwrap(), "<p>ok</p>\n");
    }
}
