//! The read side: a pull cursor over a recorded tape.
//!
//! Nothing here allocates a node. [`Recorder::compile`] turns the recorder
//! into a [`Document`], and every handle below borrows the recorder
//! mutably, so only the innermost live cursor can be advanced. Iteration
//! state lives in fixed-size frames pushed onto the scratch buffer:
//!
//! ```text
//! document frame:  state | nodes(3)
//! element frame:   state | attrs(3) | nodes(3) | start(3) | parent(3) | values(3) | parent len
//! ```
//!
//! `start` is the position of the element's name, `parent` the position in
//! the enclosing body just past this element's record. An element frame is
//! popped lazily, by the enclosing cursor's next `has_next`, which checks
//! that the popped `parent` is where the enclosing cursor would resume.

use crate::bytes::{self, decode_int, decode_int3, decode_offset, encode_common_end, skip_offset};
use crate::error::{Error, Result};
use crate::names::{Ambiguous, AttributeName, ElementName};
use crate::proto;
use crate::recorder::Recorder;
use crate::{debug, trace};

const DOCUMENT_FRAME: usize = 4;
const ELEMENT_FRAME: usize = 17;

const STATE: usize = 0;
const DOCUMENT_NODES: usize = 1;
const ATTRS: usize = 1;
const NODES: usize = 4;
const START: usize = 7;
const PARENT: usize = 10;
const VALUES: usize = 13;
const PARENT_LEN: usize = 16;

macro_rules! states {
    ($($variant:ident),* $(,)?) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[repr(u8)]
        enum State {
            $($variant,)*
        }

        impl State {
            const ALL: &'static [State] = &[$(State::$variant,)*];

            fn name(self) -> &'static str {
                match self {
                    $(State::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

states! {
    DocumentStart,
    DocumentNodesIterable,
    DocumentNodesIterator,
    DocumentNodesHasNext,
    DocumentNodesNext,
    DocumentNodesExhausted,

    ElementStart,
    ElementAttrsIterable,
    ElementAttrsIterator,
    ElementAttrsHasNext,
    ElementAttrsNext,
    ElementAttrsExhausted,
    ElementNodesIterable,
    ElementNodesIterator,
    ElementNodesHasNext,
    ElementNodesNext,
    ElementNodesExhausted,

    AttributeValuesIterable,
    AttributeValuesIterator,
    AttributeValuesHasNext,
    AttributeValuesNext,
    AttributeValuesExhausted,
}

/// One record of an element body, as seen from that element.
enum Entry {
    Attribute {
        name: AttributeName,
        value: Option<usize>,
    },
    Child,
    End,
}

/// What `next` found.
enum Item {
    DocumentType,
    Element(ElementName),
    Text(usize),
    Raw(usize),
}

impl<'a> Recorder<'a> {
    /// Prepares the recorded tape for traversal.
    ///
    /// May be called again after a traversal to walk the same document
    /// twice.
    pub fn compile(&mut self) -> Result<Document<'_, 'a>> {
        if self.scope_open() {
            return Err(Error::ScopeOpen);
        }
        let end = match self.tape_end {
            Some(end) => {
                self.main.truncate(end);
                end
            }
            None => self.main.len(),
        };
        if end > bytes::MAX_INT3 {
            return Err(Error::DocumentTooLarge { length: end });
        }
        self.tape_end = Some(end);

        self.aux.clear();
        self.aux.push(State::DocumentStart as u8);
        self.aux.resize(DOCUMENT_FRAME, 0);
        self.ctx = 0;

        debug!(
            "compiled document: {} tape bytes, {} objects",
            end,
            self.objects.len()
        );
        Ok(Document { recorder: self })
    }

    // =========================================================================
    // Frames
    // =========================================================================

    fn frame_get(&self, field: usize) -> usize {
        let at = self.ctx + field;
        decode_int3(self.aux[at], self.aux[at + 1], self.aux[at + 2])
    }

    fn frame_set(&mut self, field: usize, value: usize) {
        let at = self.ctx + field;
        self.aux[at] = bytes::encode_int0(value);
        self.aux[at + 1] = bytes::encode_int1(value);
        self.aux[at + 2] = bytes::encode_int2(value);
    }

    fn state(&self) -> Result<State> {
        let value = self.aux[self.ctx + STATE];
        State::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::IllegalState {
                found: "corrupt frame",
                expected: "a cursor state",
            })
    }

    fn set_state(&mut self, state: State) {
        self.aux[self.ctx + STATE] = state as u8;
    }

    fn state_cas(&mut self, expected: State, next: State) -> Result<()> {
        let found = self.state()?;
        if found != expected {
            return Err(Error::IllegalState {
                found: found.name(),
                expected: expected.name(),
            });
        }
        self.set_state(next);
        Ok(())
    }

    fn element_push(&mut self, start: usize, parent: usize) -> Result<ElementName> {
        let tag = self.main[start];
        if tag != proto::STANDARD_NAME {
            return Err(Error::MalformedElement { proto: tag });
        }
        let ordinal = self.main[start + 1];
        let name =
            ElementName::from_index(ordinal).ok_or(Error::MalformedElement { proto: ordinal })?;

        let parent_len = self.aux.len() - self.ctx;
        self.ctx = self.aux.len();
        self.aux.resize(self.ctx + ELEMENT_FRAME, 0);
        self.set_state(State::ElementStart);
        self.frame_set(ATTRS, start + 2);
        self.frame_set(NODES, start + 2);
        self.frame_set(START, start);
        self.frame_set(PARENT, parent);
        self.frame_set(VALUES, start + 2);
        self.aux[self.ctx + PARENT_LEN] = parent_len as u8;

        trace!("push {} frame at {}", name.name(), self.ctx);
        Ok(name)
    }

    /// Pops the element frame on top, returning its recorded parent index.
    fn element_pop(&mut self) -> usize {
        let parent = self.frame_get(PARENT);
        let parent_len = self.aux[self.ctx + PARENT_LEN] as usize;
        self.aux.truncate(self.ctx);
        self.ctx -= parent_len;
        trace!("pop frame, back to {}", self.ctx);
        parent
    }

    /// Makes `frame` the current frame again, popping the child frame the
    /// previous `next` pushed if it is still on top.
    fn enter(&mut self, frame: usize, resume: usize, not_a_child: Error) -> Result<()> {
        if self.ctx == frame {
            return Ok(());
        }
        if self.ctx < frame {
            return Err(Error::IllegalState {
                found: "frame already popped",
                expected: "an open cursor",
            });
        }

        let found = self.state()?;
        if !matches!(
            found,
            State::ElementStart | State::ElementAttrsExhausted | State::ElementNodesExhausted
        ) {
            return Err(Error::IllegalState {
                found: found.name(),
                expected: "ElementStart | ElementAttrsExhausted | ElementNodesExhausted",
            });
        }

        let parent = self.element_pop();
        if self.ctx != frame || parent != self.frame_get(resume) {
            return Err(not_a_child);
        }
        Ok(())
    }

    /// Number of frames on the stack.
    #[cfg(test)]
    pub(crate) fn frame_depth(&self) -> usize {
        if self.aux.is_empty() {
            return 0;
        }
        1 + (self.aux.len() - DOCUMENT_FRAME) / ELEMENT_FRAME
    }

    fn text_at(&self, index: usize) -> Result<&str> {
        Ok(self.objects.get(index)?.as_str())
    }

    // =========================================================================
    // Document level
    // =========================================================================

    fn document_nodes(&mut self) -> Result<()> {
        self.state_cas(State::DocumentStart, State::DocumentNodesIterable)?;
        self.state_cas(State::DocumentNodesIterable, State::DocumentNodesIterator)
    }

    fn document_has_next(&mut self) -> Result<bool> {
        self.enter(0, DOCUMENT_NODES, Error::NotAChildOfDocument)?;
        let found = self.state()?;
        if !matches!(
            found,
            State::DocumentNodesIterator | State::DocumentNodesNext
        ) {
            return Err(Error::IllegalState {
                found: found.name(),
                expected: "DocumentNodesIterator | DocumentNodesNext",
            });
        }

        let end = self.tape_end.unwrap_or(self.main.len());
        let mut index = self.frame_get(DOCUMENT_NODES);
        let found = loop {
            if index >= end {
                break false;
            }
            let proto = self.main[index];
            match proto {
                proto::DOCTYPE | proto::ELEMENT | proto::TEXT | proto::RAW => break true,
                // the contents of a fragment left at document level are
                // document nodes
                proto::FRAGMENT => index += 4,
                proto::END => {
                    index = bytes::skip_common_end(&self.main, index + 1);
                    if self.main.get(index) != Some(&proto::INTERNAL) {
                        return Err(Error::UnsupportedProto { proto, index });
                    }
                    index += 1;
                }
                proto::LENGTH2 => index = self.skip_length2(index),
                proto::LENGTH3 => index = self.skip_length3(index),
                proto::MARKED3 => index += 3,
                proto::MARKED4 => index += 4,
                proto::MARKED5 => index += 5,
                proto::FLATTEN => return Err(Error::DetachedFlatten),
                _ => return Err(Error::UnsupportedProto { proto, index }),
            }
        };

        self.frame_set(DOCUMENT_NODES, index);
        self.set_state(if found {
            State::DocumentNodesHasNext
        } else {
            State::DocumentNodesExhausted
        });
        Ok(found)
    }

    fn document_next(&mut self) -> Result<Item> {
        self.state_cas(State::DocumentNodesHasNext, State::DocumentNodesNext)?;

        let index = self.frame_get(DOCUMENT_NODES);
        let proto = self.main[index];
        match proto {
            proto::DOCTYPE => {
                self.frame_set(DOCUMENT_NODES, index + 1);
                Ok(Item::DocumentType)
            }
            proto::ELEMENT => {
                let parent = self.skip_length2(index);
                self.frame_set(DOCUMENT_NODES, parent);
                let name = self.element_push(index + 3, parent)?;
                Ok(Item::Element(name))
            }
            proto::TEXT | proto::RAW => {
                self.frame_set(DOCUMENT_NODES, index + 4);
                let object = decode_int(self.main[index + 1], self.main[index + 2]);
                Ok(if proto == proto::TEXT {
                    Item::Text(object)
                } else {
                    Item::Raw(object)
                })
            }
            _ => Err(Error::UnsupportedProto { proto, index }),
        }
    }

    // =========================================================================
    // Element bodies
    // =========================================================================

    /// Classifies the body record at `index` for an element named `parent`.
    ///
    /// Returns the entry and the index of the record after it.
    fn entry(&self, index: usize, parent: ElementName) -> Result<(Entry, usize)> {
        let proto = self.main[index];
        match proto {
            proto::END => Ok((Entry::End, index)),
            proto::ATTRIBUTE0 | proto::ATTRIBUTE1 | proto::AMBIGUOUS1 => {
                let (offset, next) = decode_offset(&self.main, index + 1);
                let target = index + 1 - offset;
                let ordinal = self.main[target + 1];
                let bad_ordinal = Error::UnsupportedProto {
                    proto: ordinal,
                    index: target + 1,
                };
                let entry = match proto {
                    proto::ATTRIBUTE0 => Entry::Attribute {
                        name: AttributeName::from_index(ordinal).ok_or(bad_ordinal)?,
                        value: None,
                    },
                    proto::ATTRIBUTE1 => Entry::Attribute {
                        name: AttributeName::from_index(ordinal).ok_or(bad_ordinal)?,
                        value: Some(decode_int(self.main[target + 2], self.main[target + 3])),
                    },
                    _ => {
                        let name = Ambiguous::from_index(ordinal).ok_or(bad_ordinal)?;
                        if name.is_attribute_of(parent) {
                            Entry::Attribute {
                                name: name.attribute(),
                                value: Some(decode_int(
                                    self.main[target + 2],
                                    self.main[target + 3],
                                )),
                            }
                        } else {
                            Entry::Child
                        }
                    }
                };
                Ok((entry, next))
            }
            proto::ATTRIBUTE_CLASS | proto::ATTRIBUTE_ID => {
                let name = if proto == proto::ATTRIBUTE_CLASS {
                    AttributeName::Class
                } else {
                    AttributeName::Id
                };
                let value = decode_int(self.main[index + 1], self.main[index + 2]);
                Ok((
                    Entry::Attribute {
                        name,
                        value: Some(value),
                    },
                    index + 3,
                ))
            }
            proto::ELEMENT | proto::RAW | proto::TEXT => {
                Ok((Entry::Child, skip_offset(&self.main, index + 1)))
            }
            _ => Err(Error::UnsupportedProto { proto, index }),
        }
    }

    /// Whether an attribute named `name` appears in the body before `until`.
    fn seen_before(&self, until: usize, name: AttributeName, parent: ElementName) -> Result<bool> {
        let mut index = self.frame_get(START) + 2;
        while index < until {
            let (entry, next) = self.entry(index, parent)?;
            match entry {
                Entry::Attribute { name: seen, .. } if seen == name => return Ok(true),
                Entry::End => break,
                _ => index = next,
            }
        }
        Ok(false)
    }

    fn element_attributes(&mut self) -> Result<()> {
        self.state_cas(State::ElementStart, State::ElementAttrsIterable)?;
        self.state_cas(State::ElementAttrsIterable, State::ElementAttrsIterator)
    }

    fn element_attributes_has_next(&mut self, parent: ElementName) -> Result<bool> {
        match self.state()? {
            State::ElementAttrsIterator
            | State::ElementAttrsNext
            | State::AttributeValuesExhausted => {}
            found => {
                return Err(Error::IllegalState {
                    found: found.name(),
                    expected: "ElementAttrsIterator | ElementAttrsNext | AttributeValuesExhausted",
                });
            }
        }

        let mut index = self.frame_get(ATTRS);
        let found = loop {
            let (entry, next) = self.entry(index, parent)?;
            match entry {
                Entry::End => break false,
                Entry::Attribute { name, .. } => {
                    // later occurrences were merged into the first one's values
                    if !self.seen_before(index, name, parent)? {
                        break true;
                    }
                    index = next;
                }
                Entry::Child => index = next,
            }
        };

        self.frame_set(ATTRS, index);
        self.set_state(if found {
            State::ElementAttrsHasNext
        } else {
            State::ElementAttrsExhausted
        });
        Ok(found)
    }

    fn element_attributes_next(
        &mut self,
        parent: ElementName,
    ) -> Result<(AttributeName, Option<usize>)> {
        self.state_cas(State::ElementAttrsHasNext, State::ElementAttrsNext)?;

        let index = self.frame_get(ATTRS);
        match self.entry(index, parent)? {
            (Entry::Attribute { name, value }, next) => {
                self.frame_set(ATTRS, next);
                self.frame_set(VALUES, next);
                Ok((name, value))
            }
            _ => Err(Error::UnsupportedProto {
                proto: self.main[index],
                index,
            }),
        }
    }

    fn attribute_values(&mut self) -> Result<()> {
        self.state_cas(State::ElementAttrsNext, State::AttributeValuesIterable)?;
        self.state_cas(
            State::AttributeValuesIterable,
            State::AttributeValuesIterator,
        )
    }

    fn attribute_values_has_next(
        &mut self,
        parent: ElementName,
        name: AttributeName,
        pending: bool,
    ) -> Result<bool> {
        match self.state()? {
            State::AttributeValuesIterator | State::AttributeValuesNext => {}
            found => {
                return Err(Error::IllegalState {
                    found: found.name(),
                    expected: "AttributeValuesIterator | AttributeValuesNext",
                });
            }
        }

        if pending {
            self.set_state(State::AttributeValuesHasNext);
            return Ok(true);
        }

        let mut index = self.frame_get(VALUES);
        let found = loop {
            let (entry, next) = self.entry(index, parent)?;
            match entry {
                Entry::End => break false,
                Entry::Attribute {
                    name: seen,
                    value: Some(_),
                } if seen == name => break true,
                _ => index = next,
            }
        };

        self.frame_set(VALUES, index);
        self.set_state(if found {
            State::AttributeValuesHasNext
        } else {
            State::AttributeValuesExhausted
        });
        Ok(found)
    }

    fn attribute_values_next(
        &mut self,
        parent: ElementName,
        pending: Option<usize>,
    ) -> Result<usize> {
        self.state_cas(State::AttributeValuesHasNext, State::AttributeValuesNext)?;

        if let Some(value) = pending {
            return Ok(value);
        }

        let index = self.frame_get(VALUES);
        match self.entry(index, parent)? {
            (
                Entry::Attribute {
                    value: Some(value), ..
                },
                next,
            ) => {
                self.frame_set(VALUES, next);
                Ok(value)
            }
            _ => Err(Error::UnsupportedProto {
                proto: self.main[index],
                index,
            }),
        }
    }

    fn element_nodes(&mut self) -> Result<()> {
        let found = self.state()?;
        if !matches!(found, State::ElementStart | State::ElementAttrsExhausted) {
            return Err(Error::IllegalState {
                found: found.name(),
                expected: "ElementStart | ElementAttrsExhausted",
            });
        }
        self.set_state(State::ElementNodesIterable);
        self.state_cas(State::ElementNodesIterable, State::ElementNodesIterator)
    }

    fn element_nodes_has_next(&mut self, frame: usize, parent: ElementName) -> Result<bool> {
        self.enter(frame, NODES, Error::NotAChild)?;
        let found = self.state()?;
        if !matches!(found, State::ElementNodesIterator | State::ElementNodesNext) {
            return Err(Error::IllegalState {
                found: found.name(),
                expected: "ElementNodesIterator | ElementNodesNext",
            });
        }

        let mut index = self.frame_get(NODES);
        let found = loop {
            let (entry, next) = self.entry(index, parent)?;
            match entry {
                Entry::End => break false,
                Entry::Child => break true,
                Entry::Attribute { .. } => index = next,
            }
        };

        self.frame_set(NODES, index);
        self.set_state(if found {
            State::ElementNodesHasNext
        } else {
            State::ElementNodesExhausted
        });
        Ok(found)
    }

    fn element_nodes_next(&mut self) -> Result<Item> {
        self.state_cas(State::ElementNodesHasNext, State::ElementNodesNext)?;

        let index = self.frame_get(NODES);
        let proto = self.main[index];
        let (offset, next) = decode_offset(&self.main, index + 1);
        let target = index + 1 - offset;
        self.frame_set(NODES, next);

        match proto {
            proto::ELEMENT => {
                let name = self.element_push(target + 3, next)?;
                Ok(Item::Element(name))
            }
            proto::TEXT => Ok(Item::Text(decode_int(
                self.main[target + 1],
                self.main[target + 2],
            ))),
            proto::RAW => Ok(Item::Raw(decode_int(
                self.main[target + 1],
                self.main[target + 2],
            ))),
            proto::AMBIGUOUS1 => {
                let ordinal = self.main[target + 1];
                let name = Ambiguous::from_index(ordinal).ok_or(Error::UnsupportedProto {
                    proto: ordinal,
                    index: target + 1,
                })?;
                let (b0, b1) = (self.main[target + 2], self.main[target + 3]);
                let start = self.synthesize(name.element(), b0, b1)?;
                let name = self.element_push(start, next)?;
                Ok(Item::Element(name))
            }
            _ => Err(Error::UnsupportedProto { proto, index }),
        }
    }

    /// Appends an element with a single text child past the recorded end of
    /// the tape. Returns the position of its name.
    ///
    /// ```text
    /// MARKED4 v0 v1 INTERNAL4 LENGTH2 7 0 STANDARD_NAME name TEXT 10 END 11 INTERNAL
    /// ```
    fn synthesize(&mut self, name: ElementName, b0: u8, b1: u8) -> Result<usize> {
        let at = self.main.len();
        self.main.extend_from_slice(&[
            proto::MARKED4,
            b0,
            b1,
            proto::INTERNAL4,
            proto::LENGTH2,
            7,
            0,
            proto::STANDARD_NAME,
            name.index(),
            proto::TEXT,
            10,
            proto::END,
        ]);
        encode_common_end(&mut self.main, 11)?;
        self.main.push(proto::INTERNAL);

        if self.main.len() > bytes::MAX_INT3 {
            return Err(Error::DocumentTooLarge {
                length: self.main.len(),
            });
        }
        Ok(at + 7)
    }
}

// =============================================================================
// Handles
// =============================================================================

/// A compiled document, ready to be traversed once.
pub struct Document<'d, 'a> {
    recorder: &'d mut Recorder<'a>,
}

impl<'a> Document<'_, 'a> {
    /// Starts iterating top-level nodes. Can only be called once per compile.
    pub fn nodes(&mut self) -> Result<DocumentNodes<'_, 'a>> {
        self.recorder.document_nodes()?;
        Ok(DocumentNodes {
            recorder: &mut *self.recorder,
            done: false,
        })
    }
}

/// A node yielded by a cursor.
pub enum Node<'n, 'a> {
    DocumentType,
    Element(Element<'n, 'a>),
    Text(&'n str),
    Raw(&'n str),
}

impl<'n, 'a> Node<'n, 'a> {
    fn from_item(recorder: &'n mut Recorder<'a>, item: Item) -> Result<Self> {
        Ok(match item {
            Item::DocumentType => Node::DocumentType,
            Item::Element(name) => {
                let frame = recorder.ctx;
                Node::Element(Element {
                    recorder,
                    name,
                    frame,
                })
            }
            Item::Text(object) => Node::Text(recorder.text_at(object)?),
            Item::Raw(object) => Node::Raw(recorder.text_at(object)?),
        })
    }
}

/// Top-level nodes of a [`Document`].
pub struct DocumentNodes<'d, 'a> {
    recorder: &'d mut Recorder<'a>,
    done: bool,
}

impl<'a> DocumentNodes<'_, 'a> {
    pub fn has_next(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        let found = self.recorder.document_has_next()?;
        self.done = !found;
        Ok(found)
    }

    pub fn next(&mut self) -> Result<Node<'_, 'a>> {
        let item = self.recorder.document_next()?;
        Node::from_item(&mut *self.recorder, item)
    }
}

/// An element. Its attributes must be iterated before its children, and
/// either may be skipped.
pub struct Element<'e, 'a> {
    recorder: &'e mut Recorder<'a>,
    name: ElementName,
    frame: usize,
}

impl<'a> Element<'_, 'a> {
    pub fn name(&self) -> ElementName {
        self.name
    }

    pub fn is_void(&self) -> bool {
        self.name.is_void()
    }

    pub fn attributes(&mut self) -> Result<Attributes<'_, 'a>> {
        self.recorder.element_attributes()?;
        Ok(Attributes {
            recorder: &mut *self.recorder,
            parent: self.name,
            done: false,
        })
    }

    pub fn nodes(&mut self) -> Result<ElementNodes<'_, 'a>> {
        self.recorder.element_nodes()?;
        Ok(ElementNodes {
            recorder: &mut *self.recorder,
            parent: self.name,
            frame: self.frame,
            done: false,
        })
    }
}

/// Attributes of one element. Repeated names are yielded once, with all
/// their values.
pub struct Attributes<'e, 'a> {
    recorder: &'e mut Recorder<'a>,
    parent: ElementName,
    done: bool,
}

impl<'a> Attributes<'_, 'a> {
    pub fn has_next(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        let found = self.recorder.element_attributes_has_next(self.parent)?;
        self.done = !found;
        Ok(found)
    }

    pub fn next(&mut self) -> Result<Attribute<'_, 'a>> {
        let (name, first) = self.recorder.element_attributes_next(self.parent)?;
        Ok(Attribute {
            recorder: &mut *self.recorder,
            parent: self.parent,
            name,
            first,
        })
    }
}

pub struct Attribute<'t, 'a> {
    recorder: &'t mut Recorder<'a>,
    parent: ElementName,
    name: AttributeName,
    first: Option<usize>,
}

impl<'a> Attribute<'_, 'a> {
    pub fn name(&self) -> AttributeName {
        self.name
    }

    pub fn is_boolean(&self) -> bool {
        self.name.is_boolean()
    }

    pub fn is_single_quoted(&self) -> bool {
        self.name.is_single_quoted()
    }

    pub fn values(&mut self) -> Result<Values<'_, 'a>> {
        self.recorder.attribute_values()?;
        Ok(Values {
            recorder: &mut *self.recorder,
            parent: self.parent,
            name: self.name,
            pending: self.first.take(),
            done: false,
        })
    }

    /// All values joined with a single space.
    pub fn value(&mut self) -> Result<String> {
        let mut joined = String::new();
        let mut values = self.values()?;
        while values.has_next()? {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(values.next()?);
        }
        Ok(joined)
    }
}

/// Values of one attribute, in declaration order.
pub struct Values<'t, 'a> {
    recorder: &'t mut Recorder<'a>,
    parent: ElementName,
    name: AttributeName,
    pending: Option<usize>,
    done: bool,
}

impl Values<'_, '_> {
    pub fn has_next(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        let found = self.recorder.attribute_values_has_next(
            self.parent,
            self.name,
            self.pending.is_some(),
        )?;
        self.done = !found;
        Ok(found)
    }

    pub fn next(&mut self) -> Result<&str> {
        let pending = self.pending.take();
        let object = self.recorder.attribute_values_next(self.parent, pending)?;
        self.recorder.text_at(object)
    }
}

/// Children of one element.
pub struct ElementNodes<'e, 'a> {
    recorder: &'e mut Recorder<'a>,
    parent: ElementName,
    frame: usize,
    done: bool,
}

impl<'a> ElementNodes<'_, 'a> {
    pub fn has_next(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        let found = self
            .recorder
            .element_nodes_has_next(self.frame, self.parent)?;
        self.done = !found;
        Ok(found)
    }

    pub fn next(&mut self) -> Result<Node<'_, 'a>> {
        let item = self.recorder.element_nodes_next()?;
        Node::from_item(&mut *self.recorder, item)
    }
}

// =============================================================================
// Tests
// =============================================================================
