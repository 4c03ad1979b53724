use dynarray::DynamicArray;

#[test]
fn test_erase_then_insert_restores_sequence() {
    let mut array = DynamicArray::new();
    array.push(1).unwrap();
    array.push(2).unwrap();
    array.push(3).unwrap();
    assert_eq!(array.len(), 3);

    let position = array.erase(1).unwrap();
    assert_eq!(array, [1, 3]);
    assert_eq!(array.len(), 2);
    assert_eq!(array[position], 3);

    array.insert(position, 2).unwrap();
    assert_eq!(array, [1, 2, 3]);
}

#[test]
fn test_literal_construction() {
    let array = DynamicArray::from([5, 6, 7]);

    assert_eq!(array.len(), 3);
    assert_eq!(array.capacity(), 3);
    assert!(array.at(3).is_err());
    assert_eq!(array.at(2), Ok(&7));
}

#[test]
fn test_from_slice_exact_capacity() {
    let array = DynamicArray::from_slice(&["a", "b"]).unwrap();

    assert_eq!(array.len(), 2);
    assert_eq!(array.capacity(), 2);
    assert_eq!(array, ["a", "b"]);
}

#[test]
fn test_with_capacity() {
    let array = DynamicArray::<u16>::with_capacity(10).unwrap();

    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), 10);
}

#[test]
fn test_reserve_and_shrink_on_empty() {
    let mut array = DynamicArray::<i32>::new();

    array.reserve(0).unwrap();
    assert_eq!(array.capacity(), 0);

    array.shrink_to_fit().unwrap();
    assert_eq!(array.capacity(), 0);
}

#[test]
fn test_shrink_empty_releases_block() {
    let mut array = DynamicArray::<i32>::with_capacity(16).unwrap();

    array.shrink_to_fit().unwrap();
    assert_eq!(array.capacity(), 0);
}

#[test]
fn test_reserve_never_shrinks() {
    let mut array = DynamicArray::<i32>::with_capacity(8).unwrap();

    array.reserve(4).unwrap();
    assert_eq!(array.capacity(), 8);

    array.reserve(20).unwrap();
    assert_eq!(array.capacity(), 20);
}

#[test]
fn test_reserve_then_push_does_not_reallocate() {
    let mut array = DynamicArray::new();
    array.reserve(64).unwrap();
    let ptr = array.as_ptr();

    for i in 0..64 {
        array.push(i).unwrap();
        assert_eq!(array.as_ptr(), ptr);
    }
    assert_eq!(array.capacity(), 64);

    array.push(64).unwrap();
    assert!(array.capacity() > 64);
}

#[test]
fn test_shrink_to_fit_keeps_elements() {
    let mut array = DynamicArray::new();
    for i in 0..10 {
        array.push(i.to_string()).unwrap();
    }
    assert!(array.capacity() > 10);

    array.shrink_to_fit().unwrap();

    assert_eq!(array.capacity(), 10);
    assert_eq!(array[9], "9");
    assert_eq!(array[0], "0");
}

#[test]
fn test_insert_at_every_position() {
    for position in 0..=4 {
        let mut array = DynamicArray::from([0, 1, 2, 3]);
        let inserted = array.insert(position, 99).unwrap();

        assert_eq!(inserted, position);
        assert_eq!(array.len(), 5);
        assert_eq!(array[position], 99);

        array.erase(position).unwrap();
        assert_eq!(array, [0, 1, 2, 3]);
    }
}

#[test]
fn test_insert_at_end_is_push() {
    let mut array = DynamicArray::from([1, 2]);
    let end = array.end();

    array.insert(end, 3).unwrap();
    assert_eq!(array, [1, 2, 3]);
}

#[test]
fn test_emplace_constructs_in_position() {
    let mut array = DynamicArray::from([String::from("a"), String::from("c")]);

    let position = array.emplace(1, || "b".repeat(1)).unwrap();

    assert_eq!(position, 1);
    assert_eq!(array, ["a", "b", "c"].map(String::from));
}

#[test]
fn test_erase_last_returns_end() {
    let mut array = DynamicArray::from([1, 2, 3]);

    let position = array.erase(2).unwrap();
    assert_eq!(position, array.end());
    assert_eq!(array, [1, 2]);
}

#[test]
fn test_remove_returns_element() {
    let mut array = DynamicArray::from([String::from("x"), String::from("y")]);

    assert_eq!(array.remove(0).unwrap(), "x");
    assert_eq!(array, [String::from("y")]);
}

#[test]
fn test_erase_range() {
    let mut array = DynamicArray::from([0, 1, 2, 3, 4, 5]);
    let capacity = array.capacity();

    let position = array.erase_range(1..4).unwrap();

    assert_eq!(position, 1);
    assert_eq!(array, [0, 4, 5]);
    assert_eq!(array.capacity(), capacity);

    assert_eq!(array.erase_range(1..1).unwrap(), 1);
    assert_eq!(array, [0, 4, 5]);

    array.erase_range(..).unwrap();
    assert!(array.is_empty());
}

#[test]
fn test_erase_range_inclusive() {
    let mut array = DynamicArray::from(['a', 'b', 'c', 'd']);

    array.erase_range(1..=2).unwrap();
    assert_eq!(array, ['a', 'd']);
}

#[test]
fn test_resize_grow_and_shrink() {
    let mut array = DynamicArray::from([1, 2]);

    array.resize(5).unwrap();
    assert_eq!(array, [1, 2, 0, 0, 0]);
    assert!(array.capacity() >= 5);

    array.resize(1).unwrap();
    assert_eq!(array, [1]);

    array.resize_value(3, &7).unwrap();
    assert_eq!(array, [1, 7, 7]);

    let mut next = 10;
    array
        .resize_with(5, || {
            next += 1;
            next
        })
        .unwrap();
    assert_eq!(array, [1, 7, 7, 11, 12]);
}

#[test]
fn test_truncate() {
    let mut array = DynamicArray::from([1, 2, 3, 4]);

    array.truncate(10);
    assert_eq!(array.len(), 4);

    array.truncate(2);
    assert_eq!(array, [1, 2]);
    assert_eq!(array.capacity(), 4);
}

#[test]
fn test_assign_fills() {
    let mut array = DynamicArray::from([1, 2, 3, 4, 5]);

    array.assign(2, &9).unwrap();
    assert_eq!(array, [9, 9]);
    assert_eq!(array.capacity(), 5);

    array.assign(8, &1).unwrap();
    assert_eq!(array, [1; 8]);
    assert!(array.capacity() >= 8);
}

#[test]
fn test_assign_sequences() {
    let mut array = DynamicArray::from([1, 2, 3]);

    array.assign_from_slice(&[7, 8]).unwrap();
    assert_eq!(array, [7, 8]);

    array.assign_iter((0..4).map(|i| i * 10)).unwrap();
    assert_eq!(array, [0, 10, 20, 30]);

    array.assign_iter(core::iter::empty()).unwrap();
    assert!(array.is_empty());
}

#[test]
fn test_extend_from_slice() {
    let mut array = DynamicArray::from([1]);
    array.extend_from_slice(&[2, 3, 4]).unwrap();

    assert_eq!(array, [1, 2, 3, 4]);
}

#[test]
fn test_clone_is_independent() {
    let original = DynamicArray::from([String::from("a"), String::from("b")]);
    let mut copy = original.clone();

    assert_eq!(copy, original);
    assert_eq!(copy.capacity(), original.capacity());
    assert_ne!(copy.as_ptr(), original.as_ptr());

    copy[0].push('!');
    copy.push(String::from("c")).unwrap();

    assert_eq!(original, ["a", "b"].map(String::from));
    assert_eq!(copy, ["a!", "b", "c"].map(String::from));
}

#[test]
fn test_clone_keeps_source_capacity() {
    let mut original = DynamicArray::<u8>::with_capacity(32).unwrap();
    original.push(1).unwrap();

    let copy = original.try_clone().unwrap();
    assert_eq!(copy.capacity(), 32);
    assert_eq!(copy, [1]);
}

#[test]
fn test_clone_from_replaces_contents() {
    let source = DynamicArray::from([4, 5, 6]);
    let mut target = DynamicArray::from([1]);

    target.clone_from(&source);
    assert_eq!(target, source);

    let mut other = DynamicArray::new();
    other.try_clone_from(&source).unwrap();
    assert_eq!(other, [4, 5, 6]);
}

#[test]
fn test_move_transfers_buffer() {
    let mut source = DynamicArray::from([1, 2, 3]);
    let ptr = source.as_ptr();

    let moved = source.take();

    assert_eq!(moved, [1, 2, 3]);
    assert_eq!(moved.as_ptr(), ptr);
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);

    let relocated = moved;
    assert_eq!(relocated.as_ptr(), ptr);
}

#[test]
fn test_move_assignment_releases_old() {
    let mut target = DynamicArray::from([String::from("old")]);
    let source = DynamicArray::from([String::from("new")]);
    assert_eq!(target[0], "old");

    target = source;
    assert_eq!(target, [String::from("new")]);
}

#[test]
fn test_swap_arrays() {
    let mut a = DynamicArray::from([1, 2]);
    let mut b = DynamicArray::from([3]);

    let ptr_a = a.as_ptr();
    a.swap_with(&mut b);

    assert_eq!(a, [3]);
    assert_eq!(b, [1, 2]);
    assert_eq!(b.as_ptr(), ptr_a);

    core::mem::swap(&mut a, &mut b);
    assert_eq!(a, [1, 2]);
}

#[test]
fn test_equality_and_ordering() {
    let a = DynamicArray::from([1, 2]);
    let b = DynamicArray::from([1, 2]);
    let longer = DynamicArray::from([1, 2, 3]);
    let bigger = DynamicArray::from([1, 3]);

    assert!(a == b);
    assert!(a < longer);
    assert!(a <= longer);
    assert!(longer > a);
    assert!(longer >= a);
    assert!(a <= b);
    assert!(a >= b);
    assert!(longer < bigger);
    assert!(a != longer);
    assert_eq!(a.cmp(&bigger), core::cmp::Ordering::Less);
}

#[test]
fn test_equality_with_other_sequences() {
    let array = DynamicArray::from([1, 2, 3]);

    assert_eq!(array, [1, 2, 3]);
    assert_eq!(array, &[1, 2, 3]);
    assert_eq!(array, vec![1, 2, 3]);
    assert_eq!(array, &[1, 2, 3][..]);
    assert!(array < [1, 2, 4]);
}

#[test]
fn test_hash_matches_slice() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(DynamicArray::from([1, 2]));

    assert!(set.contains(&DynamicArray::from([1, 2])));
    assert!(set.contains(&[1, 2][..]));
    assert!(!set.contains(&DynamicArray::from([2, 1])));
}

#[test]
fn test_positions_bound_live_region() {
    let array = DynamicArray::from([4, 5, 6]);

    assert_eq!(array.begin(), 0);
    assert_eq!(array.end(), 3);
    assert_eq!(array.positions(), 0..3);
    assert_eq!(array.data(), &[4, 5, 6]);
}

#[test]
fn test_slice_api_through_deref() {
    let mut array = DynamicArray::from([3, 1, 2]);

    array.sort_unstable();
    assert_eq!(array.first(), Some(&1));
    assert!(array.contains(&3));
    assert_eq!(array.iter().sum::<i32>(), 6);
}

#[test]
fn test_max_size() {
    assert_eq!(DynamicArray::<u8>::max_size(), isize::MAX as usize);
    assert_eq!(DynamicArray::<()>::max_size(), usize::MAX);
}

#[test]
fn test_debug_format() {
    let array = DynamicArray::from([1, 2]);
    assert_eq!(format!("{array:?}"), "[1, 2]");
}

#[test]
fn test_vec_conversions() {
    let array = DynamicArray::from(vec![1, 2, 3]);
    let back: Vec<i32> = array.into();

    assert_eq!(back, vec![1, 2, 3]);

    let borrowed = DynamicArray::from(&back[..2]);
    assert_eq!(borrowed, [1, 2]);
}

#[cfg(feature = "std")]
#[test]
fn test_io_write() {
    use std::io::Write;

    let mut array = DynamicArray::<u8>::new();
    write!(array, "{}-{}", 1, 2).unwrap();

    assert_eq!(array, b"1-2");
}
