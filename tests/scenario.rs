//! End-to-end usage through the public API.

use std::cmp::Ordering;

use rand::rngs::mock::StepRng;

use ladder::{Config, Error, MAX_LEVELS, OrdSkipList, SkipList};

#[test]
fn insert_find_erase_prefix() {
    let mut list = OrdSkipList::ordered(4).unwrap();
    for value in [5, 3, 8, 3] {
        list.add(value);
    }

    assert_eq!(list.size(), 4);
    assert!(list.find(&3));
    assert_eq!(list.get_all(), vec![3, 3, 5, 8]);

    assert_eq!(list.erase(&3), 2);
    assert_eq!(list.size(), 2);
    assert!(!list.find(&3));

    assert_eq!(list.erase_less_than_or_equal_to(&6), vec![5]);
    assert_eq!(list.get_all(), vec![8]);
    assert_eq!(list.size(), 1);
}

#[test]
fn invalid_level_counts() {
    assert_eq!(
        OrdSkipList::<i32>::ordered(0).err(),
        Some(Error::InvalidConfiguration { levels: 0, max: MAX_LEVELS })
    );
    assert!(SkipList::<i32, _>::from_config(&Config::new(MAX_LEVELS + 1), i32::cmp).is_err());
    assert!(SkipList::<i32, _>::from_config(&Config::new(MAX_LEVELS), i32::cmp).is_ok());
}

#[test]
fn structural_dump() {
    // 0, 1, 2, 3, ... : promotions alternate lose / win.
    let cmp: fn(&u32, &u32) -> Ordering = Ord::cmp;
    let mut list = SkipList::with_rng(3, cmp, StepRng::new(0, 1)).unwrap();
    list.add(20);
    list.add(10);
    list.add(30);

    // 20 draws 0 and stays on level 0. 10 draws 1 then 2, so reaches level 1.
    // 30 draws 3 then 4 and also reaches level 1.
    assert_eq!(
        list.to_string(),
        "\nHEAD -> TAIL\nHEAD -> 10 -> 30 -> TAIL\nHEAD -> 10 -> 20 -> 30 -> TAIL\n"
    );
    assert_eq!(list.level_len(0), Some(3));
    assert_eq!(list.level_len(1), Some(2));
    assert_eq!(list.level_len(2), Some(0));
}

#[test]
fn string_keys() {
    let mut list = SkipList::new(6, |a: &String, b: &String| a.len().cmp(&b.len()).then(a.cmp(b))).unwrap();
    for word in ["pear", "fig", "banana", "kiwi", "apple"] {
        list.add(word.to_string());
    }
    assert_eq!(list.get_all(), vec!["fig", "kiwi", "pear", "apple", "banana"]);
    assert!(list.find(&"kiwi".to_string()));

    let short = list.erase_less_than_or_equal_to(&"zzzz".to_string());
    assert_eq!(short, vec!["fig", "kiwi", "pear"]);
    assert_eq!(list.get_all(), vec!["apple", "banana"]);
}
