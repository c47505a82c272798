use std::cmp::Ordering;

use num::Float;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    /// Dot product by merging the two index lists
    ///
    /// # Arguments
    /// * `other` - other vector
    ///
    /// # Returns
    /// * `N` - dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> N {
        let mut result = N::zero();
        let (mut i, mut j) = (0, 0);
        while i < self.inds.len() && j < other.inds.len() {
            match self.inds[i].cmp(&other.inds[j]) {
                Ordering::Equal => {
                    result = result + self.vals[i] * other.vals[j];
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Per-index products where both vectors are non-zero
    ///
    /// # Returns
    /// * `Vec<(u32, N)>` - (index, product) in ascending index order
    pub fn hadamard_entries(&self, other: &Self) -> Vec<(u32, N)> {
        let mut result = Vec::with_capacity(self.nnz().min(other.nnz()));
        let (mut i, mut j) = (0, 0);
        while i < self.inds.len() && j < other.inds.len() {
            match self.inds[i].cmp(&other.inds[j]) {
                Ordering::Equal => {
                    result.push((self.inds[i], self.vals[i] * other.vals[j]));
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq(&self) -> N {
        self.vals.iter().fold(N::zero(), |acc, &v| acc + v * v)
    }

    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Scale to unit L2 length; the zero vector stays zero
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > N::zero() {
            for v in self.vals.iter_mut() {
                *v = *v / norm;
            }
        }
    }
}
