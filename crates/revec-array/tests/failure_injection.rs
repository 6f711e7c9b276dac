//! Integration test: failure injection on every growth and copy path.
//!
//! Drives panicking `Clone`/`Default`, failing constructors and refused
//! allocations through the public API, and checks that the array is
//! either fully updated or left exactly as it was, with every element
//! dropped exactly once.

use revec_array::{AllocError, DynArray, EmplaceError, GrowthConfig};
use revec_test_utils::{
    expect_panic, CloneBudget, FaultyClone, FaultyDefault, LiveCounter, Tracked,
};

fn tracked(counter: &LiveCounter, values: &[i32]) -> DynArray<Tracked> {
    values.iter().map(|&v| counter.track(v)).collect()
}

fn values(arr: &DynArray<Tracked>) -> Vec<i32> {
    arr.iter().map(|t| t.value).collect()
}

// ── Sized construction and resize ───────────────────────────────────

#[test]
fn with_len_unwinds_partial_construction() {
    FaultyDefault::arm(3);
    let msg = expect_panic(|| DynArray::<FaultyDefault>::with_len(5));
    FaultyDefault::disarm();
    assert_eq!(msg, "default budget exhausted");
    assert_eq!(FaultyDefault::live(), 0);
}

#[test]
fn resize_growth_keeps_original_elements() {
    let mut arr = DynArray::<FaultyDefault>::with_len(2);
    arr[0].0 = 1;
    arr[1].0 = 2;

    FaultyDefault::arm(1);
    expect_panic(|| arr.resize(6));
    FaultyDefault::disarm();

    assert_eq!(arr.len(), 2);
    assert_eq!(arr.iter().map(|d| d.0).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(FaultyDefault::live(), 2);
}

// ── Emplacement ─────────────────────────────────────────────────────

#[test]
fn failed_constructor_on_full_array_keeps_capacity() {
    let counter = LiveCounter::new();
    let mut arr = tracked(&counter, &[1, 2, 3]);
    assert_eq!(arr.capacity(), 3);

    let result = arr.try_emplace(1, || Err::<Tracked, _>("refused"));
    assert!(matches!(result, Err(EmplaceError::Construct("refused"))));

    assert_eq!(values(&arr), [1, 2, 3]);
    assert_eq!(arr.capacity(), 3);
    assert_eq!(counter.live(), 3);
}

#[test]
fn panicking_constructor_on_full_array_keeps_contents() {
    let counter = LiveCounter::new();
    let mut arr = tracked(&counter, &[1, 2]);
    expect_panic(|| {
        arr.emplace(0, || -> Tracked { panic!("constructor blew up") });
    });
    assert_eq!(values(&arr), [1, 2]);
    assert_eq!(arr.capacity(), 2);
    assert_eq!(counter.live(), 2);
}

#[test]
fn panicking_constructor_with_room_keeps_contents() {
    let counter = LiveCounter::new();
    let mut arr = tracked(&counter, &[1, 2]);
    arr.reserve(8);
    expect_panic(|| {
        arr.emplace(1, || -> Tracked { panic!("constructor blew up") });
    });
    assert_eq!(values(&arr), [1, 2]);
    assert_eq!(counter.live(), 2);
}

#[test]
fn successful_emplace_returns_new_element() {
    let counter = LiveCounter::new();
    let mut arr = tracked(&counter, &[1, 3]);
    let slot = arr.try_emplace(1, || Ok::<_, ()>(counter.track(2))).unwrap();
    slot.value *= 10;
    assert_eq!(values(&arr), [1, 20, 3]);
    drop(arr);
    assert_eq!(counter.live(), 0);
}

// ── Allocation failure ──────────────────────────────────────────────

#[test]
fn overflowing_reserve_leaves_array_untouched() {
    let counter = LiveCounter::new();
    let mut arr = tracked(&counter, &[1, 2, 3]);
    let err = arr.try_reserve(usize::MAX / 2).unwrap_err();
    assert!(matches!(err, AllocError::CapacityOverflow { .. }));
    assert_eq!(values(&arr), [1, 2, 3]);
    assert_eq!(arr.capacity(), 3);
}

/// One mebibyte per slot, so modest slot counts ask the allocator for
/// more memory than any address space offers.
type Mebibyte = [u8; 1 << 20];

#[test]
#[cfg_attr(miri, ignore)]
fn allocator_refusal_on_reserve_is_reported() {
    let mut arr = DynArray::<Mebibyte>::new();
    let err = arr.try_reserve(1 << 26).unwrap_err();
    assert_eq!(
        err,
        AllocError::OutOfMemory {
            bytes: 1 << 46,
            align: 1,
        }
    );
    assert_eq!(arr.capacity(), 0);
    assert!(arr.is_empty());
}

#[test]
#[cfg_attr(miri, ignore)]
fn allocator_refusal_on_full_emplace_keeps_contents() {
    let counter = LiveCounter::new();
    let mut arr = tracked(&counter, &[1, 2, 3]);
    arr.set_growth(GrowthConfig::new(1 << 42, 1));
    assert_eq!(arr.len(), arr.capacity());

    let mut constructed = false;
    let result = arr.try_emplace(1, || {
        constructed = true;
        Ok::<_, &str>(counter.track(9))
    });
    let err = result.unwrap_err();
    assert!(matches!(err.alloc_error(), Some(AllocError::OutOfMemory { .. })));
    assert!(matches!(err, EmplaceError::Alloc(AllocError::OutOfMemory { .. })));

    assert!(!constructed);
    assert_eq!(values(&arr), [1, 2, 3]);
    assert_eq!(arr.capacity(), 3);
    assert_eq!(counter.live(), 3);
}

#[test]
#[cfg_attr(miri, ignore)]
fn allocator_refusal_on_first_append_is_reported() {
    let mut arr = DynArray::<u64>::with_growth(GrowthConfig::new(2, 1 << 44));
    let result = arr.try_emplace_back(|| Ok::<_, &str>(1));
    assert!(matches!(
        result,
        Err(EmplaceError::Alloc(AllocError::OutOfMemory { .. }))
    ));
    assert_eq!(arr.capacity(), 0);
    assert!(arr.is_empty());
}

#[test]
fn try_with_len_reports_overflow() {
    let result = DynArray::<u64>::try_with_len(usize::MAX / 4);
    assert!(matches!(result, Err(AllocError::CapacityOverflow { .. })));
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn infallible_reserve_panics_on_overflow() {
    let mut arr = DynArray::<u64>::new();
    arr.reserve(usize::MAX);
}

// ── Copying ─────────────────────────────────────────────────────────

#[test]
fn clone_failure_mid_copy_releases_partial_copy() {
    let counter = LiveCounter::new();
    let budget = CloneBudget::unlimited();
    let arr: DynArray<_> = (0..6)
        .map(|v| FaultyClone::new(v, &counter, &budget))
        .collect();

    budget.set(3);
    let msg = expect_panic(|| arr.clone());
    assert_eq!(msg, "clone budget exhausted");
    assert_eq!(counter.live(), 6);

    budget.set(6);
    let copy = arr.clone();
    assert_eq!(copy, arr);
    assert_eq!(counter.live(), 12);
}

#[test]
fn clone_from_failure_on_swap_path_is_strong() {
    let counter = LiveCounter::new();
    let budget = CloneBudget::unlimited();
    let mut dst: DynArray<_> = (0..2)
        .map(|v| FaultyClone::new(v, &counter, &budget))
        .collect();
    let src: DynArray<_> = (10..15)
        .map(|v| FaultyClone::new(v, &counter, &budget))
        .collect();

    budget.set(4);
    expect_panic(|| dst.clone_from(&src));
    assert_eq!(dst.iter().map(FaultyClone::value).collect::<Vec<_>>(), [0, 1]);
    assert_eq!(dst.capacity(), 2);
    assert_eq!(counter.live(), 7);
}

// ── Lifetimes ───────────────────────────────────────────────────────

#[test]
fn no_leaks_or_double_drops_across_operations() {
    let counter = LiveCounter::new();
    {
        let mut arr = DynArray::new();
        for v in 0..20 {
            arr.push_back(counter.track(v));
        }
        for i in (0..20).step_by(3) {
            arr.insert(i, counter.track(-(i as i32)));
        }
        while arr.len() > 10 {
            arr.erase(arr.len() / 2);
        }
        let copy = arr.clone();
        arr.clone_from(&tracked(&counter, &[1, 2, 3]));
        arr.extend(copy);
        arr.resize_with(30, || counter.track(0));
        arr.truncate(5);
        let drained: Vec<_> = arr.into_iter().collect();
        assert_eq!(counter.live(), drained.len());
    }
    assert_eq!(counter.live(), 0);
}
