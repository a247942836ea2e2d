//! strmap: a string-keyed hash map over a fixed array of chained buckets.
//!
//! Design
//!
//! - The bucket count is chosen once, clipped to `MIN_BUCKETS..=MAX_BUCKETS`
//!   (2..=4096), and never changes. There is no resizing; chains simply grow.
//! - Each bucket heads a singly linked chain. New keys are linked at the head,
//!   so chains read most-recent-first. Overwriting a key replaces its value in
//!   place without moving the entry.
//! - Entries live in a `slotmap` arena and link to each other by arena key.
//!   The arena owns every entry and every key copy; dropping the map frees
//!   them all.
//! - Keys are copied on first insertion. Values are opaque: the map never
//!   inspects them, and `put`/`remove` hand displaced values back. Storing
//!   references keeps the referents under the caller's control.
//!
//! Hashing
//!
//! - `ChainHash` is the default strategy: seed 11939, then
//!   `acc = acc * 3 + byte` for every key byte, reduced modulo the bucket
//!   count. The free function `hash` exposes it directly.
//! - It is trivially collidable (`"ad"` and `"ba"` hash identically).
//!   `StdHasher` plugs in any `BuildHasher`; with `RandomState` it gives
//!   per-map random keys for untrusted input.
//!
//! Threading
//!
//! - Single-threaded and synchronous. `StrMap` is `Send` when its contents
//!   are but never `Sync`; wrap it in a `Mutex` to share it.
//! - Debug builds guard each operation against a hash strategy that calls
//!   back into the map mid-operation.
//!
//! Errors
//!
//! - Missing keys are `None`. Out-of-range bucket requests are clipped.
//! - `try_new`, `try_put`, and `Builder::try_build` surface allocation
//!   failure as `StrMapError::OutOfMemory`; the plain variants abort like
//!   the standard collections.

mod builder;
mod dump;
mod error;
mod hasher;
mod reentrancy;
mod strmap;
mod strmap_proptest;

pub use builder::{Builder, DEFAULT_BUCKETS};
pub use dump::Dump;
pub use error::{AllocSite, StrMapError};
pub use hasher::{hash, ChainHash, KeyHasher, StdHasher, CLASSIC_MULTIPLIER, CLASSIC_SEED};
pub use strmap::{clip_buckets, Chain, Iter, StrMap, MAX_BUCKETS, MIN_BUCKETS};
