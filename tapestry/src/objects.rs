//! The object table: payload values referenced from the tape by index.

use crate::error::{Error, Result};
use crate::stem::Stem;

/// Number of distinct indices a 2-byte payload field can address.
const CAPACITY: usize = 1 << 16;

/// Append-only list of payload strings.
///
/// A slot's identity is its index; slots are never reused or mutated until
/// the whole table is cleared for the next document.
#[derive(Debug, Default)]
pub(crate) struct ObjectTable<'a> {
    values: Vec<Stem<'a>>,
}

impl<'a> ObjectTable<'a> {
    pub(crate) fn push(&mut self, value: Stem<'a>) -> Result<usize> {
        let index = self.values.len();
        if index >= CAPACITY {
            return Err(Error::TooManyObjects { count: index + 1 });
        }
        self.values.push(value);
        Ok(index)
    }

    pub(crate) fn get(&self, index: usize) -> Result<&Stem<'a>> {
        self.values
            .get(index)
            .ok_or(Error::UnknownObject { index })
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_indices_are_append_order() {
        let mut table = ObjectTable::default();
        assert_eq!(table.push("a".into()).unwrap(), 0);
        assert_eq!(table.push("b".into()).unwrap(), 1);
        assert_eq!(table.get(1).unwrap(), "b");
        assert!(matches!(table.get(2), Err(Error::UnknownObject { index: 2 })));

        table.clear();
        assert_eq!(table.len(), 0);
        assert_eq!(table.push("c".into()).unwrap(), 0);
    }

    #[test]
    fn test_capacity() {
        let mut table = ObjectTable::default();
        for _ in 0..CAPACITY {
            table.push(Stem::Borrowed("x")).unwrap();
        }
        let err = table.push(Stem::Borrowed("x")).unwrap_err();
        assert!(err.is_capacity());
    }
}
