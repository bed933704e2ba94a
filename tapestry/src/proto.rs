//! Tape tag bytes.
//!
//! Every record starts with one of these. All tags stay below `0x80` so a
//! forward scan over a trailing length field can tell flagged length bytes
//! from the tag that follows.

/// Placeholder for length bytes that are patched later.
pub(crate) const NULL: u8 = 0x00;

pub(crate) const END: u8 = 0x01;

/// Trailer of a variable-size block (element, flatten, fragment).
pub(crate) const INTERNAL: u8 = 0x02;
/// Trailer of a 3-byte record.
pub(crate) const INTERNAL3: u8 = 0x03;
/// Trailer of a 4-byte record.
pub(crate) const INTERNAL4: u8 = 0x04;
/// Trailer of a 5-byte record.
pub(crate) const INTERNAL5: u8 = 0x05;

/// A consumed element or flatten header.
pub(crate) const LENGTH2: u8 = 0x06;
/// A consumed fragment header.
pub(crate) const LENGTH3: u8 = 0x07;
pub(crate) const MARKED3: u8 = 0x08;
pub(crate) const MARKED4: u8 = 0x09;
pub(crate) const MARKED5: u8 = 0x0A;

pub(crate) const STANDARD_NAME: u8 = 0x0B;

pub(crate) const AMBIGUOUS1: u8 = 0x10;
pub(crate) const ATTRIBUTE0: u8 = 0x11;
pub(crate) const ATTRIBUTE1: u8 = 0x12;
pub(crate) const ATTRIBUTE_CLASS: u8 = 0x13;
pub(crate) const ATTRIBUTE_ID: u8 = 0x14;
pub(crate) const DOCTYPE: u8 = 0x15;
pub(crate) const ELEMENT: u8 = 0x16;
pub(crate) const FLATTEN: u8 = 0x17;
pub(crate) const FRAGMENT: u8 = 0x18;
pub(crate) const RAW: u8 = 0x19;
pub(crate) const TEXT: u8 = 0x1A;

/// Staging marker: the next unconsumed record in the contents region.
pub(crate) const MARK_RECORD: u8 = INTERNAL;

/// Human readable tag name, for errors and traces.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn name(proto: u8) -> &'static str {
    match proto {
        NULL => "NULL",
        END => "END",
        INTERNAL => "INTERNAL",
        INTERNAL3 => "INTERNAL3",
        INTERNAL4 => "INTERNAL4",
        INTERNAL5 => "INTERNAL5",
        LENGTH2 => "LENGTH2",
        LENGTH3 => "LENGTH3",
        MARKED3 => "MARKED3",
        MARKED4 => "MARKED4",
        MARKED5 => "MARKED5",
        STANDARD_NAME => "STANDARD_NAME",
        AMBIGUOUS1 => "AMBIGUOUS1",
        ATTRIBUTE0 => "ATTRIBUTE0",
        ATTRIBUTE1 => "ATTRIBUTE1",
        ATTRIBUTE_CLASS => "ATTRIBUTE_CLASS",
        ATTRIBUTE_ID => "ATTRIBUTE_ID",
        DOCTYPE => "DOCTYPE",
        ELEMENT => "ELEMENT",
        FLATTEN => "FLATTEN",
        FRAGMENT => "FRAGMENT",
        RAW => "RAW",
        TEXT => "TEXT",
        _ => "UNKNOWN",
    }
}
