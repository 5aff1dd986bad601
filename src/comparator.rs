//! A wrapper around a three-way ordering function.
//!
//! Everything that orders or matches values in this crate goes through a [`Comparator`]: the
//! [`Tree`][crate::Tree] uses one over its values and the node storage uses one over
//! [`NodeId`][crate::NodeId]s to decide whether two handles are the same node.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Comparator;
//!
//! let mut comparator = Comparator::<i32>::default();
//! assert!(comparator.less_than(&1, &2));
//!
//! // Reversing changes the comparator itself, not a copy of it.
//! comparator.reverse();
//! assert!(comparator.greater_than(&1, &2));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Derives the usual comparisons from a single three-way ordering function.
///
/// The function must describe a total order (transitive and antisymmetric). That isn't checked;
/// a bad function just gives a badly ordered tree.
pub struct Comparator<T> {
    compare: Rc<dyn Fn(&T, &T) -> Ordering>,
}

/// Cloning shares the wrapped function. Reversing the clone afterwards doesn't affect the
/// original.
impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Rc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").finish_non_exhaustive()
    }
}

impl<T> Default for Comparator<T>
where
    T: PartialOrd + 'static,
{
    /// Equality first, then the natural `<` of `T`.
    fn default() -> Self {
        Self::new(default_compare::<T>)
    }
}

fn default_compare<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

impl<T: 'static> Comparator<T> {
    /// Wraps the given ordering function.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Comparator;
    ///
    /// // Order strings by length only.
    /// let by_len = Comparator::new(|a: &String, b: &String| a.len().cmp(&b.len()));
    /// assert!(by_len.equal(&"ab".to_string(), &"cd".to_string()));
    /// ```
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            compare: Rc::new(compare),
        }
    }

    /// Swaps the arguments of the wrapped function in place. Every later call through this
    /// comparator sees the inverted order; reversing twice gives back the original order.
    pub fn reverse(&mut self) {
        let original = Rc::clone(&self.compare);
        self.compare = Rc::new(move |a: &T, b: &T| original(b, a));
    }
}

impl<T> Comparator<T> {
    /// The raw three-way result of the wrapped function.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    /// `a` and `b` compare equal.
    pub fn equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// `a` orders before `b`.
    pub fn less_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// `a` orders after `b`.
    pub fn greater_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// Either [`less_than`][Self::less_than] or [`equal`][Self::equal].
    pub fn less_than_or_equal(&self, a: &T, b: &T) -> bool {
        self.less_than(a, b) || self.equal(a, b)
    }

    /// Either [`greater_than`][Self::greater_than] or [`equal`][Self::equal].
    pub fn greater_than_or_equal(&self, a: &T, b: &T) -> bool {
        self.greater_than(a, b) || self.equal(a, b)
    }
}
