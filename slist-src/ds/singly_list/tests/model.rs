use node_alloc::CountingAlloc;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use singly_list::{List, ListError};

#[test]
fn random_ops() {
    let mut rng = ChaCha20Rng::from_seed([
        0x1D, 0x3E, 0x8A, 0x52, 0xC4, 0x07, 0xF9, 0x6B, 0x90, 0x2F, 0xD1, 0x44,
        0x7C, 0xB8, 0x15, 0xE3, 0x68, 0xA0, 0x3B, 0xCE, 0x51, 0x9D, 0x26, 0xF4,
        0x0A, 0x87, 0xBD, 0x62, 0x19, 0xE5, 0x73, 0xC0,
    ]);
    let counter = CountingAlloc::new();
    let mut list = List::new_in(&counter);
    let mut model: Vec<u32> = vec![];
    let mut inserted = 0_usize;
    let mut removed = 0_usize;

    for _ in 0..20000 {
        let val = rng.gen_range(0..16);
        match rng.gen_range(0..6) {
            0 => {
                list.insert_front(val).unwrap();
                model.insert(0, val);
                inserted += 1;
            }
            1 => {
                list.insert_end(val).unwrap();
                model.push(val);
                inserted += 1;
            }
            2 => {
                let index = rng.gen_range(0..=model.len() + 1);
                if index <= model.len() {
                    list.insert_at(index, val).unwrap();
                    model.insert(index, val);
                    inserted += 1;
                } else {
                    assert_eq!(
                        list.insert_at(index, val),
                        Err(ListError::IndexOutOfBounds {
                            index,
                            len: model.len()
                        })
                    );
                }
            }
            3 | 4 => {
                let index = rng.gen_range(0..=model.len());
                if index < model.len() {
                    assert_eq!(list.remove_at(index), Ok(model.remove(index)));
                    removed += 1;
                } else {
                    assert!(list.remove_at(index).is_err());
                }
            }
            _ => {
                let expected = model.iter().position(|&x| x == val);
                assert_eq!(list.find(val), expected);
            }
        }
        assert_eq!(list.len(), inserted - removed);
        assert_eq!(list.len(), model.len());
        assert_eq!(list.front(), model.first().copied());
        assert_eq!(list.back(), model.last().copied());
        assert_eq!(counter.live(), model.len());
        assert_eq!(list.allocator().live_bytes(), counter.live_bytes());
    }
    assert!(list.iter().eq(model.iter().copied()));
}

#[test]
fn random_cursors() {
    let mut rng = ChaCha20Rng::from_seed([
        0x42, 0x99, 0x0E, 0xD7, 0x5A, 0x13, 0xBF, 0x80, 0x6C, 0x24, 0xF1, 0x3D,
        0xA8, 0x57, 0xC2, 0x0B, 0x96, 0x4F, 0xE0, 0x7B, 0x31, 0xDC, 0x18, 0x65,
        0xAF, 0x02, 0x8E, 0x49, 0xB3, 0x7E, 0x26, 0xD5,
    ]);
    for _ in 0..200 {
        let len = rng.gen_range(1..40);
        let model: Vec<u32> = (0..len).map(|_| rng.gen()).collect();
        let list: List = model.iter().copied().collect();
        let start = rng.gen_range(0..len);
        let mut cur = list.cursor(start).unwrap();
        let mut seen = vec![cur.value()];
        while cur.advance(&list).unwrap() {
            seen.push(cur.value());
        }
        assert_eq!(seen, model[start..]);
        assert_eq!(cur.index(), len - 1);
    }
}

proptest! {
    #[test]
    fn insert_then_find(
        init in prop::collection::vec(0..8_u32, 0..32),
        k in 0..40_usize,
        v in 0..8_u32,
    ) {
        let mut list: List = init.iter().copied().collect();
        let res = list.insert_at(k, v);
        if k <= init.len() {
            prop_assert!(res.is_ok());
            prop_assert_eq!(list.len(), init.len() + 1);
            let found = list.find(v);
            prop_assert!(found.is_some_and(|i| i <= k));
            prop_assert_eq!(list.get(k), Some(v));
        } else {
            prop_assert!(res.is_err());
            prop_assert!(list.iter().eq(init.iter().copied()));
        }
    }

    #[test]
    fn find_is_first_match(
        init in prop::collection::vec(0..8_u32, 0..32),
        v in 0..8_u32,
    ) {
        let list: List = init.iter().copied().collect();
        prop_assert_eq!(list.find(v), init.iter().position(|&x| x == v));
    }
}
