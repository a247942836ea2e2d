// StrMap integration suite.
//
// Each test documents the behavior verified through the public API only.
// The core invariants exercised:
// - Clipping: bucket_count() == clamp(requested, 2, 4096), boundaries included.
// - Round trip: put then get yields the stored value.
// - Overwrite: second put returns the first value and leaves len unchanged.
// - Removal: remove returns the value, later gets miss, len drops by one.
// - Collisions: keys sharing a bucket stay individually reachable.
// - Ownership: values are handed back, never freed by the map.
use std::rc::Rc;
use strmap::{
    hash, AllocSite, Builder, ChainHash, StdHasher, StrMap, MAX_BUCKETS, MIN_BUCKETS,
};

// Test: the host-program scenario.
// Verifies: three fruits round-trip, size is 3, and the dump lists them.
#[test]
fn fruit_scenario() {
    let mut m = StrMap::new(8);
    assert_eq!(m.put("apple", "red"), None);
    assert_eq!(m.put("banana", "yellow"), None);
    assert_eq!(m.put("grape", "purple"), None);

    assert_eq!(m.get("apple"), Some(&"red"));
    assert_eq!(m.get("banana"), Some(&"yellow"));
    assert_eq!(m.get("grape"), Some(&"purple"));
    assert_eq!(m.len(), 3);
    assert_eq!(m.bucket_count(), 8);

    let dump = m.dump().to_string();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines[0], "total elements = 3");
    assert_eq!(lines[1], "bucket 0:");
    assert!(lines[2].starts_with(" banana->0x"));
    assert_eq!(lines[3], "bucket 3:");
    assert!(lines[4].starts_with(" apple->0x"));
    assert_eq!(lines[5], "bucket 4:");
    assert!(lines[6].starts_with(" grape->0x"));
    assert_eq!(lines.len(), 7);
}

// Test: clipping policy at and around both bounds.
#[test]
fn bucket_count_clipping() {
    assert_eq!(StrMap::<&str>::new(2).bucket_count(), MIN_BUCKETS);
    assert_eq!(StrMap::<&str>::new(1).bucket_count(), MIN_BUCKETS);
    assert_eq!(StrMap::<&str>::new(0).bucket_count(), MIN_BUCKETS);
    assert_eq!(StrMap::<&str>::new(5000).bucket_count(), MAX_BUCKETS);
    assert_eq!(StrMap::<&str>::new(4096).bucket_count(), MAX_BUCKETS);
    assert_eq!(StrMap::<&str>::new(4097).bucket_count(), MAX_BUCKETS);
    assert_eq!(StrMap::<&str>::new(100).bucket_count(), 100);
}

// Test: overwrite semantics.
// Verifies: the displaced value comes back and size is unchanged.
#[test]
fn overwrite_returns_previous() {
    let mut m = StrMap::new(16);
    assert_eq!(m.put("k", 1), None);
    assert_eq!(m.len(), 1);
    assert_eq!(m.put("k", 2), Some(1));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k"), Some(&2));
}

// Test: removal semantics, then a second removal of the same key.
#[test]
fn remove_returns_value_once() {
    let mut m = StrMap::new(16);
    m.put("a", 1);
    m.put("b", 2);
    assert_eq!(m.remove("a"), Some(1));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("a"), None);
    assert_eq!(m.remove("a"), None);
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("b"), Some(&2));
}

// Test: n distinct puts give size n.
#[test]
fn size_counts_distinct_keys() {
    let mut m = StrMap::new(7);
    for i in 0..500 {
        assert_eq!(m.put(&format!("key-{}", i), i), None);
    }
    assert_eq!(m.len(), 500);
    for i in 0..500 {
        assert_eq!(m.get(&format!("key-{}", i)), Some(&i));
    }
    let per_bucket: usize = (0..m.bucket_count()).map(|b| m.chain(b).count()).sum();
    assert_eq!(per_bucket, 500);
}

// Test: chain walk under a genuine collision of the classic hash.
// Assumes: "ad" and "ba" share a full 64-bit hash, so they collide at any size.
#[test]
fn colliding_keys_are_both_reachable() {
    for buckets in [2, 8, 4096] {
        assert_eq!(hash("ad", buckets), hash("ba", buckets));
        let mut m = StrMap::new(buckets);
        m.put("ad", "first");
        m.put("ba", "second");
        assert_eq!(m.get("ad"), Some(&"first"));
        assert_eq!(m.get("ba"), Some(&"second"));
        assert_eq!(m.remove("ad"), Some("first"));
        assert_eq!(m.get("ba"), Some(&"second"));
        assert_eq!(m.get("ad"), None);
    }
}

// Test: bucket_of agrees with the free hash function for the default strategy.
#[test]
fn bucket_of_matches_classic_hash() {
    let m: StrMap<u8> = StrMap::new(97);
    for key in ["", "a", "apple", "a much longer key with spaces"] {
        assert_eq!(m.bucket_of(key), hash(key, 97));
    }
}

// Test: ownership of values stays with the caller.
// Verifies: map teardown releases only its own clones of shared values.
#[test]
fn teardown_keeps_values() {
    let colors: Vec<Rc<str>> = ["red", "green", "blue"].iter().map(|s| Rc::from(*s)).collect();
    let mut m = StrMap::new(4);
    for (i, c) in colors.iter().enumerate() {
        m.put(&i.to_string(), Rc::clone(c));
    }
    assert!(colors.iter().all(|c| Rc::strong_count(c) == 2));
    let taken = m.remove("1").expect("present");
    assert!(Rc::ptr_eq(&taken, &colors[1]));
    drop(m);
    assert_eq!(Rc::strong_count(&colors[0]), 1);
    assert_eq!(Rc::strong_count(&colors[1]), 2);
    drop(taken);
    assert_eq!(Rc::strong_count(&colors[1]), 1);
}

// Test: alternate strategies keep the map contract.
#[test]
fn alternate_hashers() {
    let mut seeded: StrMap<i32> = StrMap::with_hasher(8, ChainHash::new(7, 31));
    let mut random: StrMap<i32, StdHasher> = Builder::new()
        .buckets(8)
        .hasher(StdHasher::random())
        .build();
    for (i, k) in ["x", "y", "z", "xy", "yx"].iter().enumerate() {
        seeded.put(k, i as i32);
        random.put(k, i as i32);
    }
    for (i, k) in ["x", "y", "z", "xy", "yx"].iter().enumerate() {
        assert_eq!(seeded.get(k), Some(&(i as i32)));
        assert_eq!(random.get(k), Some(&(i as i32)));
    }
    assert_eq!(seeded.len(), 5);
    assert_eq!(random.len(), 5);
}

// Test: fallible construction and insertion on the happy path, and the error
// site vocabulary.
#[test]
fn fallible_api() {
    let mut m: StrMap<u32> = Builder::new().buckets(1).try_build().expect("buckets");
    assert_eq!(m.bucket_count(), 2);
    assert_eq!(m.try_put("k", 1).expect("key copy"), None);
    assert_eq!(m.try_put("k", 2).expect("no copy needed"), Some(1));
    assert_eq!(AllocSite::Key { len: 3 }.to_string(), "key copy of 3 bytes");
}

// Test: sharing across threads behind a mutex.
#[test]
fn usable_behind_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let shared = Arc::new(Mutex::new(StrMap::<usize>::new(64)));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..100 {
                    let mut m = shared.lock().expect("lock");
                    m.put(&format!("{}-{}", t, i), i);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("thread");
    }
    assert_eq!(shared.lock().expect("lock").len(), 400);
}
