//! Error handling.

use core::fmt;

/// An enumeration of error types raised by fixed-capacity collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageError {
    /// The fixed capacity of the storage was reached.
    CapacityLimit,
    /// A checked element access was outside of the live elements.
    OutOfRange,
    /// The requested operation is not supported for this storage.
    Unsupported,
}

impl StorageError {
    /// Generic description of this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CapacityLimit => "Exceeded storage capacity limit",
            Self::OutOfRange => "Element index out of range",
            Self::Unsupported => "Unsupported",
        }
    }

    /// Generate a panic with this error as the reason.
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self.as_str())
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// An error raised by collection update operations when appropriate
/// storage was not available. Includes an associated value that
/// could not be stored.
#[derive(Clone)]
pub struct UpdateError<T> {
    pub(crate) error: StorageError,
    pub(crate) value: T,
}

impl<T> UpdateError<T> {
    pub(crate) fn new(error: StorageError, value: T) -> Self {
        Self { error, value }
    }

    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        "Update error"
    }

    /// Get a reference to the contained `StorageError`
    pub fn error(&self) -> &StorageError {
        &self.error
    }

    /// Unwrap the inner value of this error
    pub fn into_value(self) -> T {
        self.value
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}: {}", self.as_str(), self.error.as_str());
    }
}

impl<T> From<UpdateError<T>> for StorageError {
    #[inline]
    fn from(err: UpdateError<T>) -> Self {
        err.error
    }
}

impl<T> fmt::Debug for UpdateError<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for UpdateError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.as_str(), self.error))
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for UpdateError<T> {}

#[cold]
#[inline(never)]
pub(crate) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[cfg(test)]
mod tests {
    use super::{StorageError, UpdateError};

    #[test]
    #[should_panic(expected = "Exceeded storage capacity limit")]
    fn capacity_error_panic() {
        StorageError::CapacityLimit.panic();
    }

    #[test]
    #[should_panic(expected = "Update error: Element index out of range")]
    fn update_error_panic() {
        UpdateError::new(StorageError::OutOfRange, 5u32).panic();
    }

    #[test]
    fn update_error_returns_value() {
        let err = UpdateError::new(StorageError::CapacityLimit, "value");
        assert_eq!(err.error(), &StorageError::CapacityLimit);
        assert_eq!(format!("{}", err), "Update error: Exceeded storage capacity limit");
        assert_eq!(format!("{:?}", err), "UpdateError { error: CapacityLimit, .. }");
        assert_eq!(err.into_value(), "value");
    }
}
