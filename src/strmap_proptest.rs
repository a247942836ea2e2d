#![cfg(test)]

// Property tests for StrMap kept inside the crate so they can check chain
// structure through crate-private accessors.

use crate::hasher::{ChainHash, KeyHasher};
use crate::strmap::StrMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    TryPut(usize, i32),
    Get(usize),
    Remove(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    let buckets = prop_oneof![Just(0usize), 1usize..=8, Just(4096usize), Just(9000usize)];
    let pool = proptest::collection::vec("[a-d]{0,4}", 1..=8);
    (buckets, pool).prop_flat_map(|(buckets, pool)| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryPut(i, v)),
            idx.clone().prop_map(OpI::Get),
            idx.clone().prop_map(OpI::Remove),
            prop_oneof![contains_pool, "[a-d]{0,4}"].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (buckets, pool.clone(), ops))
    })
}

// Structural invariants checked after every operation:
// - len equals the sum of chain lengths,
// - every key sits in the bucket its hash names, exactly once,
// - the set of stored pairs equals the model.
fn check_structure<H: KeyHasher>(
    sut: &StrMap<i32, H>,
    model: &HashMap<String, i32>,
) -> Result<(), TestCaseError> {
    let mut total = 0;
    let mut seen = BTreeSet::new();
    for (bucket, chain) in sut.occupied() {
        for (k, v) in chain {
            total += 1;
            prop_assert_eq!(sut.bucket_of(k), bucket);
            prop_assert!(seen.insert(k.to_string()), "key {:?} stored twice", k);
            prop_assert_eq!(model.get(k), Some(v));
        }
    }
    prop_assert_eq!(total, sut.len());
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    Ok(())
}

fn run_scenario<H: KeyHasher>(
    mut sut: StrMap<i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let buckets = sut.bucket_count();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                prop_assert_eq!(sut.put(k, v), model.insert(k.clone(), v));
            }
            OpI::TryPut(i, v) => {
                let k = &pool[i];
                let prev = sut.try_put(k, v).expect("allocation");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                let first = sut.get(k).copied();
                prop_assert_eq!(first, model.get(k).copied());
                // Repeated lookups without mutation agree.
                prop_assert_eq!(sut.get(k).copied(), first);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<String> = sut.iter().map(|(k, _)| k.to_string()).collect();
                let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        check_structure(&sut, &model)?;
        prop_assert_eq!(sut.bucket_count(), buckets);
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap using
// the classic hash over clipped bucket counts, including the boundaries.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        let sut: StrMap<i32> = StrMap::new(buckets);
        prop_assert_eq!(sut.bucket_count(), buckets.clamp(2, 4096));
        run_scenario(sut, &pool, ops)?;
    }
}

// Everything hashes to the same value, so every key shares one chain.
#[derive(Clone, Default)]
struct ConstHash;
impl KeyHasher for ConstHash {
    fn hash_key(&self, _key: &str) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions, stressing the chain
// walk and unlinking from every position.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((buckets, pool, ops) in arb_scenario()) {
        let sut: StrMap<i32, ConstHash> = StrMap::with_hasher(buckets, ConstHash);
        run_scenario(sut, &pool, ops)?;
    }
}

// Property: the classic hash always lands inside the bucket array and is a
// pure function of the key.
proptest! {
    #[test]
    fn prop_hash_in_range(key in ".{0,32}", requested in 0usize..10_000) {
        let buckets = crate::strmap::clip_buckets(requested);
        let a = crate::hasher::hash(&key, buckets);
        prop_assert!(a < buckets);
        prop_assert_eq!(a, crate::hasher::hash(&key, buckets));
        prop_assert_eq!(
            a as u64,
            ChainHash::CLASSIC.hash_key(&key) % buckets as u64
        );
    }
}
