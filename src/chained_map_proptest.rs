#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can check
// chain placement through the internal indexing function.

use crate::chained_map::ChainedMap;
use crate::index::{bucket_index, DEFAULT_CAPACITY};
use proptest::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    PutNull(i32),
    Get(usize),
    GetNull,
    Remove(usize),
    RemoveNull,
    Contains(String),
    Mutate(usize, i32),
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            1 => any::<i32>().prop_map(OpI::PutNull),
            2 => idx.clone().prop_map(OpI::Get),
            1 => Just(OpI::GetNull),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => Just(OpI::RemoveNull),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Drive one scenario against a std HashMap model. The model keys are
// `Option<Key>`, with `None` standing for the absent key.
fn run_state_machine<S>(
    mut sut: ChainedMap<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Option<Key>, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(Some(k), v));
            }
            OpI::PutNull(v) => {
                prop_assert_eq!(sut.put_null(v), model.insert(None, v));
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&Some(k.clone())));
            }
            OpI::GetNull => {
                prop_assert_eq!(sut.get_null(), model.get(&None::<Key>));
                prop_assert_eq!(sut.contains_null(), model.contains_key(&None::<Key>));
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                let before = sut.size();
                let removed = sut.remove(&k);
                let expected = model.remove(&Some(k.clone()));
                prop_assert_eq!(removed, expected);
                let shrink = usize::from(expected.is_some());
                prop_assert_eq!(sut.size(), before - shrink);
                prop_assert!(sut.get(&k).is_none());
            }
            OpI::RemoveNull => {
                prop_assert_eq!(sut.remove_null(), model.remove(&None::<Key>));
                prop_assert!(sut.get_null().is_none());
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.as_ref().is_some_and(|k| k.0 == s));
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.get_mut(&k), model.get_mut(&Some(k.clone()))) {
                    (Some(vr), Some(mv)) => {
                        *vr = vr.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence diverged from model"),
                }
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.size(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Every node is reachable from exactly one bucket
        let chained: usize = (0..sut.capacity()).map(|b| sut.chain_len(b)).sum();
        prop_assert_eq!(chained, sut.size());
        // 3) Every stored key is retrievable
        for (k, v) in &model {
            match k {
                Some(k) => prop_assert_eq!(sut.get(k), Some(v)),
                None => prop_assert_eq!(sut.get_null(), Some(v)),
            }
        }
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - put returns the replaced value and never changes size on overwrite.
// - get/contains_key parity with the model, borrowed lookups included.
// - remove shrinks size by exactly one for present keys, zero otherwise.
// - The absent key behaves like any other unique key.
// - Chain lengths sum to size after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedMap::new(), &pool, ops)?;
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher): every key shares bucket 0.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedMap::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}

// Property: after arbitrary puts, every key sits in the bucket computed by
// `bucket_index` from its hash.
proptest! {
    #[test]
    fn prop_placement_matches_bucket_index(keys in proptest::collection::vec(any::<i64>(), 0..200)) {
        let mut sut: ChainedMap<i64, i64> = ChainedMap::new();
        let mut per_bucket = [0usize; DEFAULT_CAPACITY];
        for &k in &keys {
            if sut.put(k, k).is_none() {
                per_bucket[sut.bucket_of(&k)] += 1;
            }
        }
        for (b, &n) in per_bucket.iter().enumerate() {
            prop_assert_eq!(sut.chain_len(b), n);
        }
        for &k in &keys {
            prop_assert_eq!(sut.get(&k), Some(&k));
        }
    }

    #[test]
    fn prop_bucket_index_in_range(hash in any::<u64>()) {
        let b = bucket_index(hash, DEFAULT_CAPACITY);
        prop_assert!(b < DEFAULT_CAPACITY);
        prop_assert_eq!(b as u64, (hash as i64).unsigned_abs() % DEFAULT_CAPACITY as u64);
    }
}
