// Container property tests.
//
// Property 1: heap drain order.
//  - Invariant: drain_sorted_descending yields a non-increasing sequence
//    holding the same multiset as was pushed.
//
// Property 2: ring buffer FIFO.
//  - Model: VecDeque<u8>.
//  - Operations: write(random chunk), read(random max).
//  - Invariant: every byte read equals the oldest unread byte written;
//    available() == model.len(); capacity never decreases.
//
// Property 3: array positions.
//  - Model: Vec<(String, i32)> in append order.
//  - Invariant: append then find returns the new position; update on an
//    existing key keeps len(); find resolves to the last position with the key.
//
// Property 4: list clone independence.
//  - Invariant: clone equals source; mutating the clone leaves the source unchanged.
use proptest::prelude::*;
use qcollections::{AppendList, Array, Heap, RingBuffer};
use std::collections::VecDeque;

proptest! {
    #[test]
    fn prop_heap_drains_sorted(values in proptest::collection::vec(any::<i16>(), 0..64)) {
        let mut h = Heap::with_natural_order(values.len());
        for &v in &values {
            h.push(v);
        }
        prop_assert_eq!(h.len(), values.len());
        let drained = h.drain_sorted_descending();
        prop_assert!(drained.windows(2).all(|w| w[0] >= w[1]));

        let mut expected = values.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(drained, expected);
        prop_assert!(h.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_heap_interleaved_pops_return_max(ops in proptest::collection::vec(proptest::option::of(any::<u8>()), 1..100)) {
        let mut h = Heap::with_natural_order(ops.len());
        let mut model: Vec<u8> = Vec::new();
        for op in ops {
            match op {
                Some(v) => {
                    h.push(v);
                    model.push(v);
                }
                None => {
                    let expected = model.iter().copied().max();
                    if let Some(m) = expected {
                        let i = model.iter().position(|&x| x == m).unwrap();
                        model.swap_remove(i);
                    }
                    prop_assert_eq!(h.pop_max(), expected);
                }
            }
            prop_assert_eq!(h.peek().copied(), model.iter().copied().max());
        }
    }
}

#[derive(Clone, Debug)]
enum RingOp {
    Write(Vec<u8>),
    Read(usize),
}

fn arb_ring_op() -> impl Strategy<Value = RingOp> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..700).prop_map(RingOp::Write),
        (0usize..900).prop_map(RingOp::Read),
    ]
}

proptest! {
    #[test]
    fn prop_ring_buffer_is_fifo(initial in 0usize..64, ops in proptest::collection::vec(arb_ring_op(), 1..60)) {
        let mut r = RingBuffer::with_capacity(initial);
        let mut model: VecDeque<u8> = VecDeque::new();
        let mut last_cap = r.capacity();

        for op in ops {
            match op {
                RingOp::Write(bytes) => {
                    r.write(&bytes);
                    model.extend(bytes);
                }
                RingOp::Read(max) => {
                    let mut out = vec![0u8; max];
                    let n = r.read(&mut out);
                    prop_assert_eq!(n, max.min(model.len()));
                    let expected: Vec<u8> = model.drain(..n).collect();
                    prop_assert_eq!(&out[..n], &expected[..]);
                }
            }
            prop_assert_eq!(r.available(), model.len());
            prop_assert!(r.available() <= r.capacity());
            prop_assert!(r.capacity() >= last_cap);
            last_cap = r.capacity();
        }

        // Drain everything that is left.
        let mut rest = vec![0u8; model.len()];
        prop_assert_eq!(r.read(&mut rest), model.len());
        prop_assert_eq!(rest, model.into_iter().collect::<Vec<_>>());
    }
}

#[derive(Clone, Debug)]
enum ArrayOp {
    Append(usize, i32),
    Update(usize, i32),
    AppendIfAbsent(usize, i32),
}

proptest! {
    #[test]
    fn prop_array_positions(ops in proptest::collection::vec(
        prop_oneof![
            (0usize..6, any::<i32>()).prop_map(|(k, v)| ArrayOp::Append(k, v)),
            (0usize..6, any::<i32>()).prop_map(|(k, v)| ArrayOp::Update(k, v)),
            (0usize..6, any::<i32>()).prop_map(|(k, v)| ArrayOp::AppendIfAbsent(k, v)),
        ],
        1..80,
    )) {
        let mut a: Array<i32> = Array::new();
        let mut model: Vec<(String, i32)> = Vec::new();
        let last_pos = |model: &[(String, i32)], k: &str| model.iter().rposition(|(mk, _)| mk == k);

        for op in ops {
            match op {
                ArrayOp::Append(k, v) => {
                    let k = format!("k{}", k);
                    let pos = a.append(Some(k.as_str()), v);
                    prop_assert_eq!(pos, model.len());
                    model.push((k.clone(), v));
                    prop_assert_eq!(a.find(Some(k.as_str())), Some(pos));
                }
                ArrayOp::Update(k, v) => {
                    let k = format!("k{}", k);
                    let before = a.len();
                    let pos = a.update(Some(k.as_str()), v);
                    match last_pos(&model, &k) {
                        Some(p) => {
                            prop_assert_eq!(pos, p);
                            prop_assert_eq!(a.len(), before);
                            model[p].1 = v;
                        }
                        None => {
                            prop_assert_eq!(pos, before);
                            model.push((k, v));
                        }
                    }
                }
                ArrayOp::AppendIfAbsent(k, v) => {
                    let k = format!("k{}", k);
                    let pos = a.append_if_absent(Some(k.as_str()), v);
                    match last_pos(&model, &k) {
                        Some(p) => prop_assert_eq!(pos, p),
                        None => {
                            prop_assert_eq!(pos, model.len());
                            model.push((k, v));
                        }
                    }
                }
            }
            prop_assert_eq!(a.len(), model.len());
        }

        for (i, (k, v)) in model.iter().enumerate() {
            prop_assert_eq!(a.key_at(i), Some(k.as_str()));
            prop_assert_eq!(a.value_at(i), v);
            prop_assert!(a.find_exact(Some(k.as_str()), v).is_some());
        }
    }
}

proptest! {
    #[test]
    fn prop_list_clone_is_independent(
        values in proptest::collection::vec(any::<u32>(), 0..50),
        extra in proptest::collection::vec(any::<u32>(), 1..10),
    ) {
        let mut src = AppendList::new();
        for (i, &v) in values.iter().enumerate() {
            if i % 3 == 0 { src.prepend(v) } else { src.append(v) }
        }
        prop_assert_eq!(src.len(), values.len());

        let snapshot: Vec<u32> = src.iter().copied().collect();
        let mut c = src.clone();
        prop_assert_eq!(c.iter().copied().collect::<Vec<_>>(), snapshot.clone());

        for &e in &extra {
            c.append(e);
            c.prepend(e);
        }
        prop_assert_eq!(c.len(), values.len() + 2 * extra.len());
        prop_assert_eq!(src.iter().copied().collect::<Vec<_>>(), snapshot);
    }
}
