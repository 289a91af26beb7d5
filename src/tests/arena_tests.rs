use crate::search::{Arena, ArenaError};

#[test]
fn add_and_get_test() {
    let mut arena = Arena::new(100);
    let first = arena.add(String::from("first")).unwrap();
    let second = arena.add(String::from("second")).unwrap();

    assert_eq!(arena.get(first), "first");
    assert_eq!(arena.get(second), "second");
    assert_eq!(arena.slots_used(), 2);
}

#[test]
fn get_mut_test() {
    let mut arena = Arena::new(10);
    let index = arena.add(vec![1, 2]).unwrap();
    arena.get_mut(index).push(3);
    assert_eq!(arena.get(index), &vec![1, 2, 3]);
}

#[test]
fn indices_compare_by_slot_test() {
    let mut arena = Arena::new(10);
    let first = arena.add(0u8).unwrap();
    let second = arena.add(0u8).unwrap();
    let copy = first;

    assert_eq!(first, copy);
    assert_ne!(first, second);
}

#[test]
fn full_arena_test() {
    let mut arena = Arena::new(3);
    for i in 0..3 {
        arena.add(i).unwrap();
    }
    assert_eq!(arena.add(3), Err(ArenaError::Full(3)));
    assert_eq!(arena.slots_used(), 3);
}
