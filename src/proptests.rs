use crate::Bucket;

use proptest::prelude::*;

/// Operations the owning hash table performs against one bucket. Keys are
/// drawn from a small domain so sequences collide the way a real slot does.
#[derive(Debug, Clone)]
enum Op {
    Push(u8, u32),
    Find(u8),
    Remove(u8),
    Get(usize),
    ResetProbes,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8, any::<u32>()).prop_map(|(k, v)| Op::Push(k, v)),
        (0u8..8).prop_map(Op::Find),
        (0u8..8).prop_map(Op::Remove),
        (0usize..40).prop_map(Op::Get),
        Just(Op::ResetProbes),
        Just(Op::Clear),
    ]
}

proptest! {
    /// Replays a random operation sequence against a front-insert `Vec`
    /// model and checks every observation, including probe accounting.
    #[test]
    fn matches_front_insert_model(ops in proptest::collection::vec(op_strategy(), 0..200)) {
        let mut bucket = Bucket::new();
        let mut model: Vec<(u8, u32)> = Vec::new();
        let mut probes = 0usize;

        for op in ops {
            match op {
                Op::Push(key, value) => {
                    bucket.push(key, value);
                    model.insert(0, (key, value));
                }
                Op::Find(key) => {
                    let pos = model.iter().position(|(k, _)| *k == key);
                    probes += pos.map_or(model.len(), |p| p + 1);
                    prop_assert_eq!(bucket.find(&key).copied(), pos.map(|p| model[p].1));
                    prop_assert_eq!(bucket.probes(), probes);
                }
                Op::Remove(key) => {
                    let pos = model.iter().position(|(k, _)| *k == key);
                    prop_assert_eq!(bucket.remove(&key), pos.map(|p| model.remove(p).1));
                }
                Op::Get(index) => {
                    prop_assert_eq!(bucket.get(index).copied(), model.get(index).map(|(_, v)| *v));
                }
                Op::ResetProbes => {
                    bucket.reset_probes();
                    probes = 0;
                }
                Op::Clear => {
                    bucket.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(bucket.len(), model.len());
            prop_assert_eq!(bucket.is_empty(), model.is_empty());
        }

        let values: Vec<u32> = model.iter().map(|(_, v)| *v).collect();
        if values.is_empty() {
            prop_assert_eq!(bucket.to_vec(), None);
        } else {
            prop_assert_eq!(bucket.to_vec(), Some(values));
        }
    }

    /// Pushing alone yields the reversed input, duplicates and all.
    #[test]
    fn push_only_is_reversed_input(pairs in proptest::collection::vec((0u8..8, any::<u32>()), 0..50)) {
        let bucket: Bucket<u8, u32> = pairs.iter().copied().collect();
        prop_assert_eq!(bucket.len(), pairs.len());

        let expected: Vec<u32> = pairs.iter().rev().map(|(_, v)| *v).collect();
        match bucket.to_vec() {
            None => prop_assert!(pairs.is_empty()),
            Some(values) => prop_assert_eq!(values, expected),
        }
    }

    /// `get` agrees with the head-to-tail order `iter` reports.
    #[test]
    fn get_agrees_with_iter(pairs in proptest::collection::vec((0u8..8, any::<u32>()), 0..50)) {
        let bucket: Bucket<u8, u32> = pairs.iter().copied().collect();
        for (index, (_, value)) in bucket.iter().enumerate() {
            prop_assert_eq!(bucket.get(index), Some(value));
        }
        prop_assert_eq!(bucket.get(pairs.len()), None);
    }
}
