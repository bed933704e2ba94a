//! Payload strings referenced from the tape.

use compact_str::CompactString;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A text payload held by the object table.
///
/// Payloads are never mutated once recorded. Borrowed text must outlive the
/// render pass, which the `'a` lifetime enforces. Text that is shared with
/// the caller can be handed over as an `Rc<str>` without copying.
#[derive(Clone)]
pub enum Stem<'a> {
    Borrowed(&'a str),
    Owned(CompactString),
    Shared(Rc<str>),
}

impl Stem<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Stem::Borrowed(text) => text,
            Stem::Owned(text) => text,
            Stem::Shared(text) => text,
        }
    }

    /// Detaches the payload from the borrowed text, if any.
    pub fn into_owned(self) -> Stem<'static> {
        match self {
            Stem::Borrowed(text) => Stem::Owned(text.into()),
            Stem::Owned(text) => Stem::Owned(text),
            Stem::Shared(text) => Stem::Shared(text),
        }
    }
}

impl Default for Stem<'_> {
    fn default() -> Self {
        Stem::Borrowed("")
    }
}

impl Deref for Stem<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<T: AsRef<str> + ?Sized> PartialEq<T> for Stem<'_> {
    fn eq(&self, other: &T) -> bool {
        self.as_str() == other.as_ref()
    }
}

impl Eq for Stem<'_> {}

impl AsRef<str> for Stem<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Stem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Stem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> From<&'a str> for Stem<'a> {
    fn from(text: &'a str) -> Self {
        Stem::Borrowed(text)
    }
}

impl<'a> From<&'a String> for Stem<'a> {
    fn from(text: &'a String) -> Self {
        Stem::Borrowed(text)
    }
}

impl From<String> for Stem<'_> {
    fn from(text: String) -> Self {
        Stem::Owned(text.into())
    }
}

impl From<CompactString> for Stem<'_> {
    fn from(text: CompactString) -> Self {
        Stem::Owned(text)
    }
}

impl From<Rc<str>> for Stem<'_> {
    fn from(text: Rc<str>) -> Self {
        Stem::Shared(text)
    }
}

impl<'a> From<Cow<'a, str>> for Stem<'a> {
    fn from(text: Cow<'a, str>) -> Self {
        match text {
            Cow::Borrowed(text) => Stem::Borrowed(text),
            Cow::Owned(text) => text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_variants_compare_by_content() {
        let shared: Rc<str> = Rc::from("same");
        assert_eq!(Stem::from("same"), Stem::from(String::from("same")));
        assert_eq!(Stem::from(shared.clone()), "same");
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn test_into_owned_keeps_text() {
        let text = String::from("borrowed");
        let stem = Stem::from(&text).into_owned();
        drop(text);
        assert_eq!(stem.as_str(), "borrowed");
        assert!(matches!(stem, Stem::Owned(_)));
    }
}
