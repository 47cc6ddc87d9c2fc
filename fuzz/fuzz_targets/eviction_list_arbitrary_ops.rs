#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use shardkit::ds::{EvictionList, SlotId};

// Fuzz arbitrary operation sequences on EvictionList
//
// Mirrors every operation on a VecDeque (front = most recent) and checks
// both agree on length and on the values at each end.
fuzz_target!(|data: &[u8]| {
    let mut list: EvictionList<u8> = EvictionList::new();
    let mut model: VecDeque<(SlotId, u8)> = VecDeque::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let value = pair[1];

        match op {
            0 => {
                let id = list.push_front(value);
                model.push_front((id, value));
            }
            1 => {
                if !model.is_empty() {
                    let pos = value as usize % model.len();
                    let (id, v) = model.remove(pos).unwrap();
                    assert!(list.move_to_front(id));
                    model.push_front((id, v));
                }
            }
            2 => {
                if !model.is_empty() {
                    let pos = value as usize % model.len();
                    let (id, v) = model.remove(pos).unwrap();
                    assert_eq!(list.remove(id), Some(v));
                    assert!(!list.contains(id));
                }
            }
            3 => {
                let expected = model.pop_back().map(|(_, v)| v);
                assert_eq!(list.pop_back(), expected);
            }
            _ => {
                if value % 16 == 0 {
                    list.clear();
                    model.clear();
                }
            }
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.front(), model.front().map(|(_, v)| v));
        assert_eq!(list.back(), model.back().map(|(_, v)| v));
    }
});
