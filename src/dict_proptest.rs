#![cfg(test)]

// Property tests for Dict kept inside the crate so the colliding key type
// and the resize policies can be exercised without widening the public API.

use crate::dict::{Dict, DictOptions, ResizePolicy};
use crate::key_type::KeyType;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Lookup(usize),
    Delete(usize),
    Iterate,
    CloneCheck,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            3 => idx.clone().prop_map(OpI::Lookup),
            2 => idx.clone().prop_map(OpI::Delete),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::CloneCheck),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_policy() -> impl Strategy<Value = (usize, ResizePolicy)> {
    (
        1usize..=20,
        prop_oneof![Just(ResizePolicy::OnProbe), Just(ResizePolicy::OnInsert)],
    )
}

// Key type whose hash only looks at the length, so short pools collide a lot.
struct LenHashed;
impl KeyType for LenHashed {
    type Borrowed<'a> = &'a str;
    type Owned = Box<str>;
    fn equals(a: &str, b: &str) -> bool {
        a == b
    }
    fn hash(key: &str) -> u32 {
        key.len() as u32
    }
    fn duplicate(key: &str) -> Box<str> {
        Box::from(key)
    }
    fn borrow(owned: &Box<str>) -> &str {
        owned
    }
}

// Model: per key, a stack of values; the top is what lookup must return.
type Model = HashMap<String, Vec<i32>>;

fn model_multiset(model: &Model) -> BTreeMap<(String, i32), usize> {
    let mut out = BTreeMap::new();
    for (k, vs) in model {
        for v in vs {
            *out.entry((k.clone(), *v)).or_insert(0) += 1;
        }
    }
    out
}

// Property: State-machine equivalence against a stack-per-key model.
// Invariants exercised across random operation sequences:
// - `len()` equals puts minus successful deletes.
// - `lookup` returns the most recent value put under an equal key.
// - `delete` reports whether a matching entry existed and uncovers the previous one.
// - Iteration yields exactly the live (key, value) multiset.
// - A clone answers every lookup the same way as its source.
// - Resizes (whenever they happen) never change lookup results.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), (buckets, resize) in arb_policy()) {
        let mut sut: Dict<i32> = Dict::with_options(DictOptions { initial_buckets: buckets, resize });
        let mut model: Model = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    sut.put(Some(k.as_str()), v);
                    model.entry(k.clone()).or_default().push(v);
                }
                OpI::Lookup(i) => {
                    let k = &pool[i];
                    let expected = model.get(k).and_then(|vs| vs.last()).copied();
                    prop_assert_eq!(sut.lookup(Some(k.as_str())).copied(), expected);
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let expected = model.get_mut(k).and_then(|vs| vs.pop());
                    prop_assert_eq!(sut.remove(Some(k.as_str())), expected);
                }
                OpI::Iterate => {
                    let mut seen = BTreeMap::new();
                    for (k, v) in sut.iter() {
                        let k = k.expect("no null keys were put").to_string();
                        *seen.entry((k, *v)).or_insert(0) += 1;
                    }
                    prop_assert_eq!(seen, model_multiset(&model));
                }
                OpI::CloneCheck => {
                    let mut c = sut.clone();
                    prop_assert_eq!(c.len(), sut.len());
                    prop_assert_eq!(c.bucket_count(), sut.bucket_count());
                    for k in &pool {
                        let a = sut.lookup(Some(k.as_str())).copied();
                        let b = c.lookup(Some(k.as_str())).copied();
                        prop_assert_eq!(a, b);
                    }
                }
            }

            // Post-conditions after each op
            let expected_len: usize = model.values().map(Vec::len).sum();
            prop_assert_eq!(sut.len(), expected_len);
            prop_assert_eq!(sut.is_empty(), expected_len == 0);
        }

        // Final sweep: every key resolves to its model top.
        for k in &pool {
            let expected = model.get(k).and_then(|vs| vs.last()).copied();
            prop_assert_eq!(sut.lookup(Some(k.as_str())).copied(), expected);
        }
    }
}

// Property: Same invariants as above, with a hash that collides on equal
// lengths. This stresses chain walking, mid-chain deletes and rehashing
// of long chains.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), (buckets, resize) in arb_policy()) {
        let mut sut: Dict<i32, LenHashed> = Dict::with_options(DictOptions { initial_buckets: buckets, resize });
        let mut model: Model = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    sut.put(k.as_str(), v);
                    model.entry(k.clone()).or_default().push(v);
                }
                OpI::Lookup(i) => {
                    let k = &pool[i];
                    let expected = model.get(k).and_then(|vs| vs.last()).copied();
                    prop_assert_eq!(sut.lookup(k.as_str()).copied(), expected);
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let expected = model.get_mut(k).and_then(|vs| vs.pop());
                    prop_assert_eq!(sut.delete(k.as_str()), expected.is_some());
                }
                OpI::Iterate => {
                    let mut seen = BTreeMap::new();
                    for (k, v) in sut.iter() {
                        *seen.entry((k.to_string(), *v)).or_insert(0) += 1;
                    }
                    prop_assert_eq!(seen, model_multiset(&model));
                }
                OpI::CloneCheck => {
                    let mut c = sut.clone();
                    for k in &pool {
                        let a = sut.lookup(k.as_str()).copied();
                        let b = c.lookup(k.as_str()).copied();
                        prop_assert_eq!(a, b);
                    }
                }
            }

            let expected_len: usize = model.values().map(Vec::len).sum();
            prop_assert_eq!(sut.len(), expected_len);
        }
    }
}
