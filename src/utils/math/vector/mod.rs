pub mod math;

use num::Float;

use crate::utils::sort::radix_sort_u32_soa;

/// ZeroSpVec is a sparse vector where zero entries are implicit.
/// It holds parallel `inds` and `vals`;
/// `inds` are strictly ascending column indices and
/// `vals` the matching non-zero weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroSpVec<N> {
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> Default for ZeroSpVec<N> {
    fn default() -> Self {
        Self { inds: Vec::new(), vals: Vec::new() }
    }
}

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    /// The all-zero vector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { inds: Vec::with_capacity(cap), vals: Vec::with_capacity(cap) }
    }

    /// Build from unordered (index, value) entries
    ///
    /// Entries are sorted by index; zero values are dropped.
    /// Indices must be unique.
    pub fn from_entries(mut inds: Vec<u32>, mut vals: Vec<N>) -> Self {
        radix_sort_u32_soa(&mut inds, &mut vals);
        debug_assert!(inds.windows(2).all(|w| w[0] < w[1]), "duplicate sparse index");
        let mut vec = Self::with_capacity(inds.len());
        for (i, v) in inds.into_iter().zip(vals) {
            if !v.is_zero() {
                vec.inds.push(i);
                vec.vals.push(v);
            }
        }
        vec
    }

    /// Number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at a column, zero when absent
    pub fn get(&self, index: u32) -> N {
        self.inds
            .binary_search(&index)
            .map(|pos| self.vals[pos])
            .unwrap_or_else(|_| N::zero())
    }

    /// (index, value) pairs in ascending index order
    pub fn raw_iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_sorted_and_zeros_dropped() {
        let v = ZeroSpVec::from_entries(vec![5, 1, 3], vec![0.5f64, 0.0, 2.0]);
        assert_eq!(v.raw_iter().collect::<Vec<_>>(), vec![(3, 2.0), (5, 0.5)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(5), 0.5);
        assert_eq!(v.get(1), 0.0);
        assert_eq!(v.get(99), 0.0);
    }

    #[test]
    fn empty_is_zero() {
        let v: ZeroSpVec<f32> = ZeroSpVec::new();
        assert!(v.is_zero());
        assert_eq!(v.raw_iter().count(), 0);
    }
}
