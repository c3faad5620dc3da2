//! Inline construction of pointer-typed values
//!
//! Handy when a struct has optional boxed fields and the value is at hand
//! as a literal:
//!
//! ```
//! struct Patch {
//!     name: Option<Box<String>>,
//!     retries: Option<Box<u32>>,
//! }
//!
//! let patch = Patch {
//!     name: ctxkit_ptr::some("primary".to_string()),
//!     retries: None,
//! };
//!
//! assert_eq!(patch.name.as_deref().map(String::as_str), Some("primary"));
//! assert!(patch.retries.is_none());
//! ```

/// Move `value` into a fresh heap allocation and return the owning pointer
///
/// Each call yields its own allocation, so the pointee is independent of
/// any other copy of the value.
pub fn of<T>(value: T) -> Box<T> {
    Box::new(value)
}

/// [`of`] wrapped in `Some`, for optional pointer fields
pub fn some<T>(value: T) -> Option<Box<T>> {
    Some(of(value))
}
