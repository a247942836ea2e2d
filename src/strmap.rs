//! StrMap: fixed bucket array with separately chained entries.
//!
//! Entries live in a `SlotMap` arena; each bucket stores the arena key of its
//! chain head and each entry stores the arena key of its successor. The arena
//! owns every entry and every key copy, so teardown is plain `Drop`.

use crate::dump::Dump;
use crate::error::{AllocSite, StrMapError};
use crate::hasher::{reduce, ChainHash, KeyHasher};
use crate::reentrancy::DebugReentrancy;
use core::fmt;
use core::mem;
use slotmap::{new_key_type, SlotMap};

/// Smallest bucket array a map will allocate.
pub const MIN_BUCKETS: usize = 2;
/// Largest bucket array a map will allocate.
pub const MAX_BUCKETS: usize = 4096;

new_key_type! {
    struct EntryKey;
}

#[derive(Debug)]
struct Entry<V> {
    key: String,
    value: V,
    next: Option<EntryKey>,
}

type Slots<V> = SlotMap<EntryKey, Entry<V>>;

/// Constrain a requested bucket count to `MIN_BUCKETS..=MAX_BUCKETS`.
pub fn clip_buckets(requested: usize) -> usize {
    requested.clamp(MIN_BUCKETS, MAX_BUCKETS)
}

fn clip_logged(requested: usize) -> usize {
    let count = clip_buckets(requested);
    if count != requested {
        log::debug!(
            "strmap: requested {} buckets, clipped to {}",
            requested,
            count
        );
    }
    count
}

/// Link a new entry in front of the chain rooted at `head`.
fn push_front<V>(head: &mut Option<EntryKey>, slots: &mut Slots<V>, key: String, value: V) {
    let entry = Entry {
        key,
        value,
        next: *head,
    };
    *head = Some(slots.insert(entry));
}

/// String-keyed map over a fixed number of buckets.
///
/// The bucket count is chosen at creation (clipped to
/// `MIN_BUCKETS..=MAX_BUCKETS`) and never changes; chains grow without bound.
/// The map copies every key it stores. Values are opaque: the map moves them
/// in and hands them back but never looks inside, so storing references
/// (`&T`, `NonNull<T>`, `Rc<T>`) leaves the referents owned by the caller.
pub struct StrMap<V, H = ChainHash> {
    hasher: H,
    buckets: Box<[Option<EntryKey>]>,
    slots: Slots<V>,
    reentrancy: DebugReentrancy,
}

impl<V> StrMap<V> {
    /// Create a map with the classic hash and `requested` buckets, clipped.
    pub fn new(requested: usize) -> Self {
        Self::with_hasher(requested, ChainHash::default())
    }

    /// Like `new`, but reports a failed bucket allocation instead of aborting.
    pub fn try_new(requested: usize) -> Result<Self, StrMapError> {
        Self::try_with_hasher(requested, ChainHash::default())
    }
}

impl<V, H> StrMap<V, H>
where
    H: KeyHasher,
{
    pub fn with_hasher(requested: usize, hasher: H) -> Self {
        let count = clip_logged(requested);
        Self::from_buckets(vec![None; count].into_boxed_slice(), hasher)
    }

    pub fn try_with_hasher(requested: usize, hasher: H) -> Result<Self, StrMapError> {
        let count = clip_logged(requested);
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(count)
            .map_err(|e| StrMapError::out_of_memory(AllocSite::Buckets { count }, e))?;
        buckets.resize(count, None);
        Ok(Self::from_buckets(buckets.into_boxed_slice(), hasher))
    }

    fn from_buckets(buckets: Box<[Option<EntryKey>]>, hasher: H) -> Self {
        log::debug!("strmap: created with {} buckets", buckets.len());
        Self {
            hasher,
            buckets,
            slots: SlotMap::with_key(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn index_of(&self, key: &str) -> usize {
        reduce(self.hasher.hash_key(key), self.buckets.len())
    }

    fn find(&self, index: usize, key: &str) -> Option<EntryKey> {
        let mut cur = self.buckets[index];
        while let Some(k) = cur {
            let entry = &self.slots[k];
            if entry.key == key {
                return Some(k);
            }
            cur = entry.next;
        }
        None
    }

    /// Bucket that `key` hashes to under this map's strategy.
    pub fn bucket_of(&self, key: &str) -> usize {
        let _g = self.reentrancy.enter();
        self.index_of(key)
    }

    /// Bind `key` to `value`.
    ///
    /// If the key was already bound, its value is replaced in place and the
    /// previous one is returned; the stored key and the entry's chain position
    /// are left alone. Otherwise the key is copied into a new entry at the
    /// head of its chain and `None` is returned.
    pub fn put(&mut self, key: &str, value: V) -> Option<V> {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        if let Some(k) = self.find(index, key) {
            return Some(mem::replace(&mut self.slots[k].value, value));
        }
        log::trace!("strmap: new entry {:?} in bucket {}", key, index);
        push_front(
            &mut self.buckets[index],
            &mut self.slots,
            key.to_owned(),
            value,
        );
        None
    }

    /// Like `put`, but reports a failed key copy instead of aborting. On
    /// error the map is unchanged and `value` is dropped.
    pub fn try_put(&mut self, key: &str, value: V) -> Result<Option<V>, StrMapError> {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        if let Some(k) = self.find(index, key) {
            return Ok(Some(mem::replace(&mut self.slots[k].value, value)));
        }
        let mut owned = String::new();
        owned
            .try_reserve_exact(key.len())
            .map_err(|e| StrMapError::out_of_memory(AllocSite::Key { len: key.len() }, e))?;
        owned.push_str(key);
        log::trace!("strmap: new entry {:?} in bucket {}", key, index);
        push_front(&mut self.buckets[index], &mut self.slots, owned, value);
        Ok(None)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        self.find(index, key).map(|k| &self.slots[k].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        let k = self.find(index, key)?;
        Some(&mut self.slots[k].value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        self.find(index, key).is_some()
    }

    /// Unlink the entry for `key` and return its value. The entry and its key
    /// copy are freed; the value is handed back untouched.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        let mut prev: Option<EntryKey> = None;
        let mut cur = self.buckets[index];
        while let Some(k) = cur {
            let (hit, next) = {
                let entry = &self.slots[k];
                (entry.key == key, entry.next)
            };
            if hit {
                match prev {
                    Some(p) => self.slots[p].next = next,
                    None => self.buckets[index] = next,
                }
                log::trace!("strmap: unlinked {:?} from bucket {}", key, index);
                return self.slots.remove(k).map(|e| e.value);
            }
            prev = cur;
            cur = next;
        }
        None
    }
}

impl<V, H> StrMap<V, H> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Length of the bucket array, fixed at creation.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Entries of one bucket in chain order, most recently inserted first.
    /// Empty for an out-of-range index.
    pub fn chain(&self, bucket: usize) -> Chain<'_, V> {
        Chain {
            slots: &self.slots,
            cur: self.buckets.get(bucket).copied().flatten(),
        }
    }

    /// Non-empty buckets in ascending order, each with its chain.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (usize, Chain<'_, V>)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, head)| head.is_some())
            .map(move |(i, _)| (i, self.chain(i)))
    }

    /// Every entry, buckets ascending and chain order within a bucket.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: &self.slots,
            buckets: self.buckets.iter(),
            cur: None,
            remaining: self.slots.len(),
        }
    }

    /// Display adapter listing every non-empty bucket with its entries.
    pub fn dump(&self) -> Dump<'_, V, H>
    where
        V: fmt::Pointer,
    {
        Dump::new(self)
    }
}

impl<V: fmt::Debug, H> fmt::Debug for StrMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, H> IntoIterator for &'a StrMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a single bucket's chain.
pub struct Chain<'a, V> {
    slots: &'a Slots<V>,
    cur: Option<EntryKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let entry = &slots[self.cur?];
        self.cur = entry.next;
        Some((entry.key.as_str(), &entry.value))
    }
}

/// Iterator over every entry of a `StrMap`.
pub struct Iter<'a, V> {
    slots: &'a Slots<V>,
    buckets: core::slice::Iter<'a, Option<EntryKey>>,
    cur: Option<EntryKey>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let slots = self.slots;
                let entry = &slots[k];
                self.cur = entry.next;
                self.remaining -= 1;
                return Some((entry.key.as_str(), &entry.value));
            }
            self.cur = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
