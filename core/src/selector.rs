//! Memoized selectors
//!
//! A selector derives read-only data from state. Recomputing a derivation on
//! every read is wasteful when the inputs have not changed, so [`Memoized`]
//! caches the last inputs and output and only recomputes when an input's
//! identity changes.
//!
//! Identity is defined by [`SelectorInput`]: for `Arc<T>` it is pointer
//! equality, for tuples it is component-wise. The cache keeps a clone of the
//! inputs it was computed from, so a cached allocation stays alive and can
//! never be confused with a new allocation at the same address.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use todo_flux_core::Memoized;
//!
//! let total = Memoized::new(|values: &Arc<Vec<u32>>| Arc::new(values.iter().sum::<u32>()));
//!
//! let values = Arc::new(vec![1, 2, 3]);
//! let first = total.select(Arc::clone(&values));
//! let second = total.select(Arc::clone(&values));
//!
//! assert_eq!(*first, 6);
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use std::sync::{Arc, Mutex, PoisonError};

/// Inputs a selector can be keyed on.
///
/// `same_as` must be cheap; it is evaluated on every selection.
pub trait SelectorInput: Clone {
    /// Whether `self` and `other` identify the same input
    fn same_as(&self, other: &Self) -> bool;
}

impl<T: ?Sized> SelectorInput for Arc<T> {
    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<A: SelectorInput, B: SelectorInput> SelectorInput for (A, B) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0) && self.1.same_as(&other.1)
    }
}

impl<A: SelectorInput, B: SelectorInput, C: SelectorInput> SelectorInput for (A, B, C) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0) && self.1.same_as(&other.1) && self.2.same_as(&other.2)
    }
}

type Compute<I, O> = Box<dyn Fn(&I) -> O + Send + Sync>;

/// A single-entry memo cache around a pure derivation.
///
/// The output type is usually an `Arc` so that repeated selections hand out
/// the same reference.
pub struct Memoized<I, O> {
    compute: Compute<I, O>,
    last: Mutex<Option<(I, O)>>,
}

impl<I, O> Memoized<I, O>
where
    I: SelectorInput,
    O: Clone,
{
    /// Wrap a derivation in a memo cache
    #[must_use]
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        Self {
            compute: Box::new(compute),
            last: Mutex::new(None),
        }
    }

    /// Select the derived value for `input`
    ///
    /// Returns the cached output when `input` is the same as the last input,
    /// otherwise recomputes and replaces the cache entry.
    pub fn select(&self, input: I) -> O {
        // The cache holds only plain data; a poisoned lock is still consistent.
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((cached_input, cached_output)) = last.as_ref() {
            if cached_input.same_as(&input) {
                return cached_output.clone();
            }
        }

        let output = (self.compute)(&input);
        *last = Some((input, output.clone()));
        output
    }

    /// Drop the cached entry
    pub fn clear(&self) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a cached entry exists
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl<I, O> std::fmt::Debug for Memoized<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoized").finish_non_exhaustive()
    }
}
