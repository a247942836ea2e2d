//! Error types for fallible construction and insertion.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// What the map was trying to allocate when it ran out of memory.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AllocSite {
    /// The bucket array, with its (already clipped) slot count.
    Buckets { count: usize },
    /// The owned copy of a key, with its length in bytes.
    Key { len: usize },
}

impl fmt::Display for AllocSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocSite::Buckets { count } => write!(f, "bucket array of {} slots", count),
            AllocSite::Key { len } => write!(f, "key copy of {} bytes", len),
        }
    }
}

#[derive(Debug, Error)]
pub enum StrMapError {
    #[error("out of memory allocating {site}")]
    OutOfMemory {
        site: AllocSite,
        #[source]
        source: TryReserveError,
    },
}

impl StrMapError {
    pub(crate) fn out_of_memory(site: AllocSite, source: TryReserveError) -> Self {
        log::warn!("strmap allocation failed: {}", site);
        StrMapError::OutOfMemory { site, source }
    }

    /// The allocation that failed.
    pub fn site(&self) -> AllocSite {
        match self {
            StrMapError::OutOfMemory { site, .. } => *site,
        }
    }
}
