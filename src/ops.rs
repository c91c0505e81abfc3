//! Operations common to packed integer arrays.

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// A vector that contains elements of a fixed type.
///
/// # Example
///
/// ```
/// use packed_varint::ops::Element;
/// use packed_varint::bits;
///
/// struct Example(Vec<u8>);
///
/// impl Example {
///     fn new() -> Example {
///         Example(Vec::new())
///     }
/// }
///
/// impl Element for Example {
///     type Item = u8;
///
///     fn len(&self) -> usize {
///         self.0.len()
///     }
///
///     fn width(&self) -> usize {
///         8
///     }
/// }
///
/// let v = Example::new();
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.width(), bits::bit_len(u8::MAX as u64));
/// ```
pub trait Element {
    /// The type of the elements in the vector.
    type Item;

    /// Returns the number of elements in the vector.
    fn len(&self) -> usize;

    /// Returns the width of of an element in bits.
    fn width(&self) -> usize;

    /// Returns `true` if the vector has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//-----------------------------------------------------------------------------

/// A vector that can be sorted in place using a comparator and a swap operation.
///
/// The provided [`Sortable::sort`] is an in-place heapsort that does not allocate.
///
/// # Example
///
/// ```
/// use packed_varint::ops::{Element, Sortable};
///
/// struct Example(Vec<u8>);
///
/// impl Element for Example {
///     type Item = u8;
///
///     fn len(&self) -> usize {
///         self.0.len()
///     }
///
///     fn width(&self) -> usize {
///         8
///     }
/// }
///
/// impl Sortable for Example {
///     fn less(&self, i: usize, j: usize) -> bool {
///         self.0[i] < self.0[j]
///     }
///
///     fn swap(&mut self, i: usize, j: usize) {
///         self.0.swap(i, j);
///     }
/// }
///
/// let mut v = Example(vec![3, 1, 4, 1, 5, 9, 2, 6]);
/// v.sort();
/// assert_eq!(v.0, vec![1, 1, 2, 3, 4, 5, 6, 9]);
/// ```
pub trait Sortable: Element {
    /// Returns `true` if element `i` is smaller than element `j`.
    ///
    /// # Panics
    ///
    /// May panic if `i` or `j` is not a valid index in the vector.
    fn less(&self, i: usize, j: usize) -> bool;

    /// Swaps elements `i` and `j`.
    ///
    /// # Panics
    ///
    /// May panic if `i` or `j` is not a valid index in the vector.
    fn swap(&mut self, i: usize, j: usize);

    /// Sorts the vector in increasing order.
    ///
    /// The sort is not stable.
    fn sort(&mut self) {
        let len = self.len();
        for root in (0..len / 2).rev() {
            sift_down(self, root, len);
        }
        for end in (1..len).rev() {
            self.swap(0, end);
            sift_down(self, 0, end);
        }
    }

    /// Returns `true` if the vector is sorted in increasing order.
    fn is_sorted(&self) -> bool {
        (1..self.len()).all(|i| !self.less(i, i - 1))
    }
}

// Restores the max-heap property for the subtree at `root` within the first `end` elements.
fn sift_down<T: Sortable + ?Sized>(v: &mut T, mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            return;
        }
        if child + 1 < end && v.less(child, child + 1) {
            child += 1;
        }
        if !v.less(root, child) {
            return;
        }
        v.swap(root, child);
        root = child;
    }
}

//-----------------------------------------------------------------------------
