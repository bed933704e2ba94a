use facet::Facet;

/// Errors raised while recording, decoding, or rendering a document.
///
/// Variants fall in three groups. Caller contract violations
/// (`IllegalState`, `NotAChild`, `NotAChildOfDocument`, `ScopeOpen`,
/// `ScopeNotOpen`, `MissingRecord`, `DetachedFlatten`) point at a bug in the
/// calling code. Capacity violations (`DocumentTooLarge`, `TooManyObjects`)
/// mean the document does not fit the tape encoding. The rest signal tape
/// content the decoder does not recognize.
#[derive(Facet, Debug)]
#[facet(derive(Error))]
#[repr(u8)]
pub enum Error {
    /// cursor is in state {found}, expected {expected}
    IllegalState {
        found: &'static str,
        expected: &'static str,
    },

    /// the last consumed element was not a child of this element
    NotAChild,

    /// the last consumed element was not a child of this document
    NotAChildOfDocument,

    /// an element or flatten scope is still open
    ScopeOpen,

    /// no element or flatten scope is open
    ScopeNotOpen,

    /// an instruction has no matching record on the tape
    MissingRecord,

    /// a flatten group was left outside of an element
    DetachedFlatten,

    /// document too large: {length} does not fit the tape encoding
    DocumentTooLarge { length: usize },

    /// document too large: {count} payload values exceed the object table
    TooManyObjects { count: usize },

    /// unsupported construct: tag {proto} at index {index}
    UnsupportedProto { proto: u8, index: usize },

    /// malformed element: expected a name but found tag {proto}
    MalformedElement { proto: u8 },

    /// payload index {index} is not in the object table
    UnknownObject { index: usize },

    /// the output sink reported an error
    Format,
}

impl Error {
    /// Returns `true` for size-limit errors, as opposed to logic bugs.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            Error::DocumentTooLarge { .. } | Error::TooManyObjects { .. }
        )
    }
}

impl From<std::fmt::Error> for Error {
    fn from(_: std::fmt::Error) -> Self {
        Error::Format
    }
}

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
