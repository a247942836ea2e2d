//! Human-readable listing of a map's buckets.

use crate::strmap::StrMap;
use core::fmt;

/// `Display` adapter returned by [`StrMap::dump`].
///
/// ```text
/// total elements = 3
/// bucket 0:
///  banana->0x5581c0a4e01a 
/// bucket 3:
///  apple->0x5581c0a4e014 
/// ```
///
/// Only non-empty buckets are listed, in ascending order, each followed by
/// its chain (most recently inserted first). Values print as addresses via
/// their `fmt::Pointer` impl. Meant for debugging; the layout is not a stable
/// format.
pub struct Dump<'a, V, H> {
    map: &'a StrMap<V, H>,
}

impl<'a, V, H> Dump<'a, V, H> {
    pub(crate) fn new(map: &'a StrMap<V, H>) -> Self {
        Dump { map }
    }
}

impl<V: fmt::Pointer, H> fmt::Display for Dump<'_, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total elements = {}", self.map.len())?;
        for (index, chain) in self.map.occupied() {
            write!(f, "bucket {}:\n ", index)?;
            for (key, value) in chain {
                write!(f, "{}->", key)?;
                fmt::Pointer::fmt(value, f)?;
                f.write_str(" ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
