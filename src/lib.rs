#![no_std]
#![deny(unsafe_code)]

//! `DynamicArray`: a growable, contiguous array with explicit buffer management.
//!
//! `DynamicArray<T>` exclusively owns a single heap block of `capacity` slots
//! and tracks how many of them (`len`) hold live values. Every capacity change
//! goes through one reallocation routine, which moves the live elements into
//! a block of exactly the requested size and then releases the old one.
//!
//! This crate is `no_std` compatible and only needs `alloc`.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `push()`, `emplace_back()`: O(1) amortized; the capacity doubles when full
//! - `pop()`, `at()`, indexing: O(1)
//! - `insert()`, `emplace()`, `erase()`, `remove()`: O(n) for the shifted tail
//! - `reserve()`, `shrink_to_fit()`: O(n) when they reallocate, O(1) otherwise
//! - `clear()`, `truncate()`: O(n) for the dropped elements
//!
//! ## Memory
//! - One contiguous block per array, exactly `capacity` slots
//! - No allocation until the first element (or an explicit capacity)
//! - Zero-sized element types never allocate
//!
//! # Failure Handling
//!
//! Operations that may need storage return `Result<_, DynArrayError>`. When
//! they fail, the array is exactly as it was before the call:
//!
//! ```
//! # use dynarray::{DynamicArray, DynArrayError};
//! let mut array = DynamicArray::from([1u64, 2, 3]);
//!
//! let error = array.reserve(usize::MAX).unwrap_err();
//! assert!(error.is_allocation_error());
//! assert_eq!(array, [1, 2, 3]);
//! assert_eq!(array.capacity(), 3);
//!
//! assert_eq!(
//!     array.at(3),
//!     Err(DynArrayError::IndexOutOfBounds { index: 3, length: 3 })
//! );
//! assert_eq!(array.at(2), Ok(&3));
//! ```
//!
//! Indexing with `array[i]`, `front()` and `back()` are the fast path: calling
//! them out of range is a caller error and panics.
//!
//! # Positional Editing
//!
//! Positions are indices into the live region, `begin()..end()`:
//!
//! ```
//! # use dynarray::DynamicArray;
//! let mut array = DynamicArray::new();
//! array.push(1).unwrap();
//! array.push(2).unwrap();
//! array.push(3).unwrap();
//!
//! let next = array.erase(1).unwrap();
//! assert_eq!(array, [1, 3]);
//! assert_eq!(array[next], 3);
//!
//! array.insert(next, 2).unwrap();
//! assert_eq!(array, [1, 2, 3]);
//!
//! array.erase_range(..2).unwrap();
//! assert_eq!(array, [3]);
//! ```
//!
//! # Ownership
//!
//! Cloning makes an independent deep copy; moving transfers the block in O(1).
//! `take()` moves the contents out and leaves an empty, unallocated array:
//!
//! ```
//! # use dynarray::DynamicArray;
//! let mut source = DynamicArray::from([5, 6, 7]);
//! let copy = source.clone();
//! let moved = source.take();
//!
//! assert_eq!(copy, moved);
//! assert!(source.is_empty());
//! assert_eq!(source.capacity(), 0);
//! ```
//!
//! # Features
//!
//! - `std`: implements `std::io::Write` for `DynamicArray<u8>` and enables
//!   `thiserror/std`.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod array;
mod error;
mod iter;
mod raw;
mod traits;

pub use array::DynamicArray;
pub use error::DynArrayError;
pub use iter::IntoIter;
