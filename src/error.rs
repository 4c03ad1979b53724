use thiserror::Error;

/// Error types for `DynamicArray` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DynArrayError {
    /// The allocator could not provide a block for the requested slots
    #[error("Allocation failed: could not obtain storage for {requested} elements")]
    AllocationFailed {
        /// Number of slots requested
        requested: usize,
    },
    /// The requested capacity does not fit in a valid memory layout
    #[error("Capacity overflow: {requested} elements exceed the addressable size")]
    CapacityOverflow {
        /// Number of slots requested
        requested: usize,
    },
    /// Index is beyond the current array length
    #[error("Index out of bounds: index {index} is beyond array length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the array
        length: usize,
    },
    /// Operation needs at least one element
    #[error("Operation on empty array")]
    EmptyArray,
    /// Range is reversed or extends past the end of the array
    #[error("Invalid range: {start}..{end} for array length {length}")]
    InvalidRange {
        /// First position of the range
        start: usize,
        /// One past the last position of the range
        end: usize,
        /// Current length of the array
        length: usize,
    },
}

impl DynArrayError {
    /// Returns `true` if the error came from a capacity-increasing operation
    /// that could not obtain storage.
    #[must_use]
    pub fn is_allocation_error(&self) -> bool {
        matches!(
            self,
            DynArrayError::AllocationFailed { .. } | DynArrayError::CapacityOverflow { .. }
        )
    }
}
