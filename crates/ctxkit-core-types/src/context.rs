//! Operation context for implicit propagation through call chains
//!
//! A [`Context`] is an immutable chain of typed bindings. Deriving a child
//! with [`Context::with_value`] never touches the parent: readers of the child
//! see the new binding, readers of the parent keep seeing what they saw.
//!
//! Bindings are keyed by marker types implementing [`ContextKey`]. A module
//! that keeps its marker private owns the binding: nobody else can name the
//! key, so nobody else can read or overwrite it.
//!
//! # Example
//!
//! ```
//! use ctxkit_core_types::{Context, ContextKey};
//!
//! struct TenantKey;
//!
//! impl ContextKey for TenantKey {
//!     type Value = String;
//! }
//!
//! let root = Context::background();
//! let ctx = root.with_value::<TenantKey>("acme".to_string());
//!
//! assert_eq!(ctx.value::<TenantKey>().map(String::as_str), Some("acme"));
//! assert!(root.value::<TenantKey>().is_none());
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Marker type naming one slot in a [`Context`]
pub trait ContextKey: 'static {
    /// Type of the value stored under this key
    type Value: Send + Sync + 'static;
}

struct Binding {
    key: TypeId,
    value: Box<dyn Any + Send + Sync>,
    parent: Option<Arc<Binding>>,
}

// Unlink iteratively so dropping a long chain does not recurse once per binding
impl Drop for Binding {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Arc::try_unwrap(parent) {
                Ok(mut binding) => next = binding.parent.take(),
                // Still shared with another context
                Err(_) => break,
            }
        }
    }
}

/// Immutable, chainable key/value carrier
///
/// Cloning is cheap: clones share the same chain.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Binding>>,
}

impl Context {
    /// The empty root context
    pub fn background() -> Self {
        Self { head: None }
    }

    /// Derive a child context with `value` bound under `K`
    ///
    /// An existing binding for `K` is shadowed for the child and its
    /// descendants only.
    #[must_use]
    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        Self {
            head: Some(Arc::new(Binding {
                key: TypeId::of::<K>(),
                value: Box::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the nearest binding for `K`
    ///
    /// Returns `None` when `K` was never bound, or when the nearest binding
    /// does not hold a `K::Value`.
    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        let key = TypeId::of::<K>();
        let mut cursor = self.head.as_deref();
        while let Some(binding) = cursor {
            if binding.key == key {
                return binding.value.downcast_ref::<K::Value>();
            }
            cursor = binding.parent.as_deref();
        }
        None
    }

    /// Whether a binding for `K` is visible from this context
    pub fn contains<K: ContextKey>(&self) -> bool {
        self.value::<K>().is_some()
    }

    /// Number of bindings in the chain, shadowed ones included
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.head.as_deref();
        while let Some(binding) = cursor {
            depth += 1;
            cursor = binding.parent.as_deref();
        }
        depth
    }

    /// Whether this is an empty root context
    pub fn is_background(&self) -> bool {
        self.head.is_none()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}
