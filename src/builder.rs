//! Construction-time configuration for `StrMap`.

use crate::error::StrMapError;
use crate::hasher::{ChainHash, KeyHasher};
use crate::strmap::StrMap;

/// Bucket count used by a builder that is never given one.
pub const DEFAULT_BUCKETS: usize = 16;

/// Collects the bucket count and hash strategy for a new map.
///
/// ```
/// use strmap::{Builder, StdHasher, StrMap};
///
/// let m: StrMap<&str, StdHasher> = Builder::new()
///     .buckets(64)
///     .hasher(StdHasher::random())
///     .build();
/// assert_eq!(m.bucket_count(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct Builder<H = ChainHash> {
    buckets: usize,
    hasher: H,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            buckets: DEFAULT_BUCKETS,
            hasher: ChainHash::default(),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHasher> Builder<H> {
    /// Requested bucket count; clipped when the map is built.
    pub fn buckets(mut self, requested: usize) -> Self {
        self.buckets = requested;
        self
    }

    pub fn hasher<H2: KeyHasher>(self, hasher: H2) -> Builder<H2> {
        Builder {
            buckets: self.buckets,
            hasher,
        }
    }

    pub fn requested_buckets(&self) -> usize {
        self.buckets
    }

    pub fn build<V>(self) -> StrMap<V, H> {
        StrMap::with_hasher(self.buckets, self.hasher)
    }

    pub fn try_build<V>(self) -> Result<StrMap<V, H>, StrMapError> {
        StrMap::try_with_hasher(self.buckets, self.hasher)
    }
}
