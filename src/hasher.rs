//! Hash strategies mapping a key to a bucket.
//!
//! A strategy only produces a `u64`; the map reduces it modulo its own bucket
//! count. Two keys with equal hashes always share a bucket, which is the only
//! property the map relies on. Exact indices matter for `dump` ordering and
//! for interoperating with other implementations of the classic hash.

use core::hash::BuildHasher;
use std::collections::hash_map::RandomState;

/// Seed of the classic accumulator.
pub const CLASSIC_SEED: u64 = 11939;
/// Multiplier of the classic accumulator.
pub const CLASSIC_MULTIPLIER: u64 = 3;

/// Pluggable key hashing.
///
/// Implementations must be deterministic for the lifetime of a map: the same
/// key must hash to the same value on every call.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

/// Order-sensitive multiply-add accumulator over the key's bytes:
/// `acc = acc * multiplier + byte`, wrapping at 64 bits.
///
/// The default is the classic `11939` seed with multiplier `3`. It is fast and
/// stable across runs, and offers no resistance to crafted collisions: `"ad"`
/// and `"ba"` already hash identically.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChainHash {
    seed: u64,
    multiplier: u64,
}

impl ChainHash {
    pub const CLASSIC: ChainHash = ChainHash {
        seed: CLASSIC_SEED,
        multiplier: CLASSIC_MULTIPLIER,
    };

    pub const fn new(seed: u64, multiplier: u64) -> Self {
        Self { seed, multiplier }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }
}

impl Default for ChainHash {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl KeyHasher for ChainHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        key.bytes().fold(self.seed, |acc, b| {
            acc.wrapping_mul(self.multiplier).wrapping_add(u64::from(b))
        })
    }
}

/// Adapter running keys through a standard `BuildHasher`.
///
/// With the default `RandomState` each map gets its own random keys, so bucket
/// placement cannot be predicted from outside the process.
#[derive(Clone, Debug, Default)]
pub struct StdHasher<S = RandomState>(S);

impl<S> StdHasher<S> {
    pub fn new(build: S) -> Self {
        StdHasher(build)
    }

    pub fn build_hasher(&self) -> &S {
        &self.0
    }
}

impl StdHasher<RandomState> {
    pub fn random() -> Self {
        StdHasher(RandomState::new())
    }
}

impl<S: BuildHasher> KeyHasher for StdHasher<S> {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self.0.hash_one(key)
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        (**self).hash_key(key)
    }
}

/// Reduce a strategy's hash to a bucket index.
#[inline]
pub(crate) fn reduce(hash: u64, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    (hash % bucket_count as u64) as usize
}

/// Bucket index of `key` under the classic hash, in `0..bucket_count`.
///
/// # Panics
///
/// Panics if `bucket_count` is zero.
pub fn hash(key: &str, bucket_count: usize) -> usize {
    assert!(bucket_count > 0, "bucket count must be nonzero");
    reduce(ChainHash::CLASSIC.hash_key(key), bucket_count)
}
