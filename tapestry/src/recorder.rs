//! The write side: recording build calls onto the tape.
//!
//! Values are recorded before the element that contains them, in call
//! order. When an element closes, every value it was given is relocated
//! into its body: the original record's tag is overwritten with a `MARKED*`
//! or `LENGTH*` placeholder and a pointer record pointing back at it is
//! appended after the element header. A finished block ends with
//! `END <trailing length> INTERNAL`, where the trailing length is the
//! distance from `END` back to the block's first content byte (its earliest
//! relocated value). Walking backward over that length is how the next
//! enclosing element finds its own values.

use smallvec::SmallVec;

use crate::bytes::{
    self, check_int2, decode_common_end, decode_int, decode_int3, decode_offset, encode_common_end,
    encode_int0, encode_int1, encode_int2, encode_offset,
};
use crate::error::{Error, Result};
use crate::names::{Ambiguous, AttributeName, ElementName};
use crate::objects::ObjectTable;
use crate::proto;
use crate::stem::Stem;
use crate::trace;

/// Default initial tape capacity in bytes.
pub const DEFAULT_TAPE_CAPACITY: usize = 256;

/// Default initial scratch capacity in bytes.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 128;

/// An opaque token returned by every recording call.
///
/// Tokens are passed back to [`Recorder::element`] (or its low-level
/// counterpart [`Recorder::element_value`]) to make the recorded value part
/// of an element. A token does not identify its record: an element simply
/// claims as many preceding records as it is given tokens.
#[derive(Debug)]
pub struct Instruction<'a>(pub(crate) Kind<'a>);

#[derive(Debug)]
pub(crate) enum Kind<'a> {
    Attribute,
    Ambiguous,
    Element,
    Fragment,
    NoOp,
    Id(Stem<'a>),
    ClassName(Stem<'a>),
}

impl<'a> Instruction<'a> {
    /// A value that contributes nothing to its element.
    pub fn noop() -> Self {
        Self(Kind::NoOp)
    }

    /// An `id` attribute that was not recorded ahead of its element.
    pub fn id(value: impl Into<Stem<'a>>) -> Self {
        Self(Kind::Id(value.into()))
    }

    /// A `class` attribute that was not recorded ahead of its element.
    pub fn class_name(value: impl Into<Stem<'a>>) -> Self {
        Self(Kind::ClassName(value.into()))
    }

    /// Whether this token stands for a record already on the tape.
    fn is_recorded(&self) -> bool {
        matches!(
            self.0,
            Kind::Attribute | Kind::Ambiguous | Kind::Element | Kind::Fragment
        )
    }
}

/// Position of an open fragment, returned by [`Recorder::fragment_begin`].
#[must_use = "a fragment must be closed with `fragment_end`"]
#[derive(Debug)]
pub struct FragmentStart(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Element,
    Flatten,
}

/// Records a document onto a tape.
///
/// A recorder is reused across documents: [`Recorder::reset`] empties it
/// without releasing its buffers.
#[derive(Debug)]
pub struct Recorder<'a> {
    /// The tape.
    pub(crate) main: Vec<u8>,
    /// Staging markers while recording, iteration frames while decoding.
    pub(crate) aux: SmallVec<[u8; DEFAULT_SCRATCH_CAPACITY]>,
    pub(crate) objects: ObjectTable<'a>,

    scope: Option<Scope>,
    aux_start: usize,
    main_contents: usize,
    main_start: usize,
    /// Starts of the open fragments, innermost last.
    fragments: SmallVec<[usize; 4]>,

    /// Length of the recorded tape at the last compile. Bytes past it were
    /// synthesized by the decoder.
    pub(crate) tape_end: Option<usize>,
    /// Offset of the current frame in `aux`.
    pub(crate) ctx: usize,
}

impl Default for Recorder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Recorder<'a> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TAPE_CAPACITY, DEFAULT_SCRATCH_CAPACITY)
    }

    pub fn with_capacity(tape: usize, scratch: usize) -> Self {
        Self {
            main: Vec::with_capacity(tape),
            aux: SmallVec::with_capacity(scratch),
            objects: ObjectTable::default(),
            scope: None,
            aux_start: 0,
            main_contents: 0,
            main_start: 0,
            fragments: SmallVec::new(),
            tape_end: None,
            ctx: 0,
        }
    }

    /// Forgets the current document, keeping buffer capacity.
    pub fn reset(&mut self) {
        self.main.clear();
        self.aux.clear();
        self.objects.clear();
        self.scope = None;
        self.aux_start = 0;
        self.main_contents = 0;
        self.main_start = 0;
        self.fragments.clear();
        self.tape_end = None;
        self.ctx = 0;
    }

    /// Length of the tape in bytes.
    pub fn tape_len(&self) -> usize {
        self.main.len()
    }

    /// Number of payload values recorded so far.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether an element, flatten group or fragment is still open.
    pub(crate) fn scope_open(&self) -> bool {
        self.scope.is_some() || !self.fragments.is_empty()
    }

    /// Called before any record is written outside of an open scope.
    fn recording(&mut self) -> Result<()> {
        if self.scope.is_some() {
            return Err(Error::ScopeOpen);
        }
        if let Some(end) = self.tape_end.take() {
            // back from decoding: drop synthesized records and frames
            self.main.truncate(end);
            self.aux.clear();
            self.ctx = 0;
        }
        Ok(())
    }

    fn object(&mut self, value: Stem<'a>) -> Result<usize> {
        self.objects.push(value)
    }

    // =========================================================================
    // Leaf records
    // =========================================================================

    pub fn doctype(&mut self) -> Result<()> {
        self.recording()?;
        self.main.push(proto::DOCTYPE);
        Ok(())
    }

    /// Records an attribute. `None` records a boolean attribute.
    pub fn attribute(
        &mut self,
        name: AttributeName,
        value: Option<Stem<'a>>,
    ) -> Result<Instruction<'a>> {
        self.recording()?;
        match value {
            None => {
                self.main
                    .extend_from_slice(&[proto::ATTRIBUTE0, name.index(), proto::INTERNAL3]);
            }
            Some(value) => {
                let object = self.object(value)?;
                self.main.extend_from_slice(&[
                    proto::ATTRIBUTE1,
                    name.index(),
                    encode_int0(object),
                    encode_int1(object),
                    proto::INTERNAL5,
                ]);
            }
        }
        Ok(Instruction(Kind::Attribute))
    }

    /// Records a name whose meaning depends on the element it ends up in.
    pub fn ambiguous(
        &mut self,
        name: Ambiguous,
        value: impl Into<Stem<'a>>,
    ) -> Result<Instruction<'a>> {
        self.recording()?;
        let object = self.object(value.into())?;
        self.main.extend_from_slice(&[
            proto::AMBIGUOUS1,
            name.index(),
            encode_int0(object),
            encode_int1(object),
            proto::INTERNAL5,
        ]);
        Ok(Instruction(Kind::Ambiguous))
    }

    /// Records a text node. It is escaped when rendered.
    pub fn text(&mut self, value: impl Into<Stem<'a>>) -> Result<Instruction<'a>> {
        self.leaf(proto::TEXT, value.into())
    }

    /// Records a raw node. It is written verbatim when rendered.
    pub fn raw(&mut self, value: impl Into<Stem<'a>>) -> Result<Instruction<'a>> {
        self.leaf(proto::RAW, value.into())
    }

    fn leaf(&mut self, tag: u8, value: Stem<'a>) -> Result<Instruction<'a>> {
        self.recording()?;
        let object = self.object(value)?;
        self.main.extend_from_slice(&[
            tag,
            encode_int0(object),
            encode_int1(object),
            proto::INTERNAL4,
        ]);
        Ok(Instruction(Kind::Element))
    }

    // =========================================================================
    // Elements and flatten groups
    // =========================================================================

    /// Records an element with the given values.
    ///
    /// The element claims one preceding record per recorded token, and keeps
    /// them in the order they were recorded: the order of `contents` only
    /// places `id` and `class_name` values among them.
    pub fn element<I>(&mut self, name: ElementName, contents: I) -> Result<Instruction<'a>>
    where
        I: IntoIterator<Item = Instruction<'a>>,
    {
        self.element_begin(name)?;
        for instruction in contents {
            self.element_value(instruction)?;
        }
        self.element_end()
    }

    /// Records an element whose only child is a text node.
    pub fn element_text(
        &mut self,
        name: ElementName,
        text: impl Into<Stem<'a>>,
    ) -> Result<Instruction<'a>> {
        let text = self.text(text)?;
        self.element(name, [text])
    }

    /// Groups values so they can be handed to an element as one.
    pub fn flatten<I>(&mut self, contents: I) -> Result<Instruction<'a>>
    where
        I: IntoIterator<Item = Instruction<'a>>,
    {
        self.flatten_begin()?;
        for instruction in contents {
            self.element_value(instruction)?;
        }
        self.flatten_end()
    }

    /// Like [`Recorder::flatten`], skipping `None` values.
    pub fn flatten_non_null<I>(&mut self, contents: I) -> Result<Instruction<'a>>
    where
        I: IntoIterator<Item = Option<Instruction<'a>>>,
    {
        self.flatten(contents.into_iter().flatten())
    }

    pub fn element_begin(&mut self, name: ElementName) -> Result<()> {
        self.scope_begin(Scope::Element)?;
        self.main.extend_from_slice(&[
            proto::ELEMENT,
            proto::NULL,
            proto::NULL,
            proto::STANDARD_NAME,
            name.index(),
        ]);
        Ok(())
    }

    pub fn flatten_begin(&mut self) -> Result<()> {
        self.scope_begin(Scope::Flatten)?;
        self.main
            .extend_from_slice(&[proto::FLATTEN, proto::NULL, proto::NULL]);
        Ok(())
    }

    fn scope_begin(&mut self, scope: Scope) -> Result<()> {
        self.recording()?;
        self.scope = Some(scope);
        self.aux_start = self.aux.len();
        self.main_start = self.main.len();
        self.main_contents = self.main_start;
        Ok(())
    }

    /// Adds one value to the open element or flatten group.
    pub fn element_value(&mut self, instruction: Instruction<'a>) -> Result<()> {
        if self.scope.is_none() {
            return Err(Error::ScopeNotOpen);
        }

        if instruction.is_recorded() {
            self.main_contents = self.walk_back(self.main_contents)?;
            self.aux.push(proto::MARK_RECORD);
            return Ok(());
        }

        match instruction.0 {
            Kind::Id(value) => self.stage_inline(proto::ATTRIBUTE_ID, value),
            Kind::ClassName(value) => self.stage_inline(proto::ATTRIBUTE_CLASS, value),
            _ => Ok(()),
        }
    }

    fn stage_inline(&mut self, tag: u8, value: Stem<'a>) -> Result<()> {
        let object = self.object(value)?;
        self.aux
            .extend_from_slice(&[tag, encode_int0(object), encode_int1(object)]);
        Ok(())
    }

    /// Returns the start of the record that ends right before `contents`.
    fn walk_back(&self, contents: usize) -> Result<usize> {
        let Some(trailer) = contents.checked_sub(1) else {
            return Err(Error::MissingRecord);
        };
        let start = match self.main[trailer] {
            proto::INTERNAL3 => contents.checked_sub(3),
            proto::INTERNAL4 => contents.checked_sub(4),
            proto::INTERNAL5 => contents.checked_sub(5),
            proto::INTERNAL => {
                let last = trailer.checked_sub(1).ok_or(Error::MissingRecord)?;
                let (length, first) = decode_common_end(&self.main, last);
                let end = first.checked_sub(1).ok_or(Error::MissingRecord)?;
                if self.main[end] != proto::END {
                    return Err(Error::MissingRecord);
                }
                end.checked_sub(length)
            }
            _ => None,
        };
        start.ok_or(Error::MissingRecord)
    }

    pub fn element_end(&mut self) -> Result<Instruction<'a>> {
        self.scope_end(Scope::Element)?;
        Ok(Instruction(Kind::Element))
    }

    pub fn flatten_end(&mut self) -> Result<Instruction<'a>> {
        self.scope_end(Scope::Flatten)?;
        Ok(Instruction(Kind::Element))
    }

    fn scope_end(&mut self, scope: Scope) -> Result<()> {
        if self.scope != Some(scope) {
            return Err(Error::ScopeNotOpen);
        }

        let mut contents = self.main_contents;
        let mut index = self.aux_start;
        while index < self.aux.len() {
            let mark = self.aux[index];
            match mark {
                proto::MARK_RECORD => {
                    contents = self.relocate_next(contents)?;
                    index += 1;
                }
                proto::ATTRIBUTE_CLASS | proto::ATTRIBUTE_ID => {
                    let (b0, b1) = (self.aux[index + 1], self.aux[index + 2]);
                    self.main.extend_from_slice(&[mark, b0, b1]);
                    index += 3;
                }
                proto => return Err(Error::UnsupportedProto { proto, index }),
            }
        }
        self.aux.truncate(self.aux_start);

        self.common_end(self.main_contents, self.main_start)?;
        self.scope = None;
        Ok(())
    }

    /// Relocates the first unconsumed record at or after `contents`.
    ///
    /// Returns the index just past that record.
    fn relocate_next(&mut self, contents: usize) -> Result<usize> {
        let mut index = contents;
        loop {
            if index >= self.main_start {
                return Err(Error::MissingRecord);
            }
            let proto = self.main[index];
            match proto {
                proto::ATTRIBUTE0 => return self.relocate_fixed(index, proto::MARKED3, 3),
                proto::ATTRIBUTE1 | proto::AMBIGUOUS1 => {
                    return self.relocate_fixed(index, proto::MARKED5, 5);
                }
                proto::TEXT | proto::RAW => return self.relocate_fixed(index, proto::MARKED4, 4),
                proto::ELEMENT => return self.encode_element(index),
                proto::FLATTEN => return self.encode_flatten(index),
                proto::FRAGMENT => return self.encode_fragment(index),
                proto::LENGTH2 => index = self.skip_length2(index),
                proto::LENGTH3 => index = self.skip_length3(index),
                proto::MARKED3 => index += 3,
                proto::MARKED4 => index += 4,
                proto::MARKED5 => index += 5,
                _ => return Err(Error::UnsupportedProto { proto, index }),
            }
        }
    }

    pub(crate) fn skip_length2(&self, index: usize) -> usize {
        index + 3 + decode_int(self.main[index + 1], self.main[index + 2])
    }

    pub(crate) fn skip_length3(&self, index: usize) -> usize {
        index + 4 + decode_int3(self.main[index + 1], self.main[index + 2], self.main[index + 3])
    }

    /// Appends a pointer record `tag <offset>` aimed at `target`.
    fn pointer(&mut self, tag: u8, target: usize) -> Result<()> {
        self.main.push(tag);
        let offset = self.main.len() - target;
        encode_offset(&mut self.main, offset)
    }

    fn relocate_fixed(&mut self, index: usize, marked: u8, size: usize) -> Result<usize> {
        let tag = self.main[index];
        self.main[index] = marked;
        trace!("relocate {} at {index}", proto::name(tag));
        self.pointer(tag, index)?;
        Ok(index + size)
    }

    fn encode_element(&mut self, index: usize) -> Result<usize> {
        let next = self.skip_length2(index);
        self.main[index] = proto::LENGTH2;
        trace!("relocate ELEMENT at {index}");
        self.pointer(proto::ELEMENT, index)?;
        Ok(next)
    }

    /// Splices the pointer records of a flatten group into the open body.
    fn encode_flatten(&mut self, index: usize) -> Result<usize> {
        let next = self.skip_length2(index);
        self.main[index] = proto::LENGTH2;
        trace!("splice FLATTEN at {index}");

        let mut body = index + 3;
        loop {
            let proto = self.main[body];
            match proto {
                proto::ATTRIBUTE0
                | proto::ATTRIBUTE1
                | proto::AMBIGUOUS1
                | proto::ELEMENT
                | proto::RAW
                | proto::TEXT => {
                    let (offset, after) = decode_offset(&self.main, body + 1);
                    let target = body + 1 - offset;
                    self.pointer(proto, target)?;
                    body = after;
                }
                proto::ATTRIBUTE_CLASS | proto::ATTRIBUTE_ID => {
                    let (b0, b1) = (self.main[body + 1], self.main[body + 2]);
                    self.main.extend_from_slice(&[proto, b0, b1]);
                    body += 3;
                }
                proto::END => break,
                _ => return Err(Error::UnsupportedProto { proto, index: body }),
            }
        }
        Ok(next)
    }

    /// Relocates every top-level record of a fragment into the open body.
    fn encode_fragment(&mut self, index: usize) -> Result<usize> {
        let next = self.skip_length3(index);
        self.main[index] = proto::LENGTH3;
        trace!("splice FRAGMENT at {index}");

        let mut body = index + 4;
        loop {
            let proto = self.main[body];
            body = match proto {
                proto::ATTRIBUTE0 => self.relocate_fixed(body, proto::MARKED3, 3)?,
                proto::ATTRIBUTE1 | proto::AMBIGUOUS1 => {
                    self.relocate_fixed(body, proto::MARKED5, 5)?
                }
                proto::TEXT | proto::RAW => self.relocate_fixed(body, proto::MARKED4, 4)?,
                proto::ELEMENT => self.encode_element(body)?,
                proto::FLATTEN => self.encode_flatten(body)?,
                proto::FRAGMENT => self.encode_fragment(body)?,
                proto::LENGTH2 => self.skip_length2(body),
                proto::LENGTH3 => self.skip_length3(body),
                proto::MARKED3 => body + 3,
                proto::MARKED4 => body + 4,
                proto::MARKED5 => body + 5,
                proto::END => break,
                _ => return Err(Error::UnsupportedProto { proto, index: body }),
            };
        }
        Ok(next)
    }

    /// Seals the block that starts at `start` and whose content starts at
    /// `contents`.
    fn common_end(&mut self, contents: usize, start: usize) -> Result<()> {
        self.main.push(proto::END);
        let length = self.main.len() - contents - 1;
        encode_common_end(&mut self.main, length)?;
        self.main.push(proto::INTERNAL);

        let length = check_int2(self.main.len() - start - 3)?;
        self.main[start + 1] = encode_int0(length);
        self.main[start + 2] = encode_int1(length);
        Ok(())
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    pub fn fragment_begin(&mut self) -> Result<FragmentStart> {
        self.recording()?;
        let start = self.main.len();
        self.main
            .extend_from_slice(&[proto::FRAGMENT, proto::NULL, proto::NULL, proto::NULL]);
        self.fragments.push(start);
        Ok(FragmentStart(start))
    }

    pub fn fragment_end(&mut self, start: FragmentStart) -> Result<Instruction<'a>> {
        self.recording()?;
        let FragmentStart(start) = start;
        // fragments close innermost first
        if self.fragments.last() != Some(&start) {
            return Err(Error::ScopeNotOpen);
        }
        self.fragments.pop();

        self.main.push(proto::END);
        let length = self.main.len() - start - 1;
        encode_common_end(&mut self.main, length)?;
        self.main.push(proto::INTERNAL);

        let length = self.main.len() - start - 4;
        if length > bytes::MAX_INT3 {
            return Err(Error::DocumentTooLarge { length });
        }
        self.main[start + 1] = encode_int0(length);
        self.main[start + 2] = encode_int1(length);
        self.main[start + 3] = encode_int2(length);
        Ok(Instruction(Kind::Fragment))
    }

    /// Records everything `f` records as one fragment.
    pub fn fragment<F>(&mut self, f: F) -> Result<Instruction<'a>>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let start = self.fragment_begin()?;
        f(self)?;
        self.fragment_end(start)
    }
}

// =============================================================================
// Tests
// =============================================================================
