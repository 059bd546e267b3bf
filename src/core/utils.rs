//! Matrix helpers for the density-matrix simulator.
//!
//! - Trace and outer product of complex arrays.
//! - Expansion of local (optionally controlled) operators to the full register.
//! - Bit gather/scatter between basis indices and qubit positions.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::collections::HashSet;

/// Computes the trace of a matrix (sum of diagonal elements).
pub fn trace(matrix: &Array2<Complex64>) -> Complex64 {
    matrix.diag().sum()
}

/// Computes the outer product $|a\rangle\langle b|$.
pub fn outer_product(a: &Array1<Complex64>, b: &Array1<Complex64>) -> Array2<Complex64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j].conj())
}

/// Builds the $2^N \times 2^N$ operator that applies `matrix` to `targets`
/// whenever all `controls` are set, leaving other qubits untouched.
///
/// Qubit `q` is bit `q` of a basis index.
pub fn expand_operator(
    num_total_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
    controls: &[usize],
) -> Array2<Complex64> {
    let dim = 1 << num_total_qubits;
    let mut full_matrix = Array2::<Complex64>::zeros((dim, dim));

    let control_mask = controls.iter().fold(0usize, |mask, &c| mask | (1 << c));
    let target_mask = targets.iter().fold(0usize, |mask, &t| mask | (1 << t));
    let passive_mask = !target_mask;

    for col_idx in 0..dim {
        // Control condition not met: identity on this column.
        if (col_idx & control_mask) != control_mask {
            full_matrix[[col_idx, col_idx]] = Complex64::new(1.0, 0.0);
            continue;
        }

        let small_col = extract_bits(col_idx, targets);
        for small_row in 0..matrix.nrows() {
            let val = matrix[[small_row, small_col]];
            if val.norm_sqr() < f64::EPSILON {
                continue;
            }
            let row_idx = (col_idx & passive_mask) | deposit_bits(small_row, targets);
            full_matrix[[row_idx, col_idx]] = val;
        }
    }
    full_matrix
}

/// Gathers the bits of `value` found at `indices` into a compact integer.
fn extract_bits(value: usize, indices: &[usize]) -> usize {
    indices
        .iter()
        .enumerate()
        .filter(|&(_, &pos)| (value >> pos) & 1 == 1)
        .fold(0, |acc, (i, _)| acc | (1 << i))
}

/// Scatters bit `i` of `compact_value` to bit position `indices[i]`.
fn deposit_bits(compact_value: usize, indices: &[usize]) -> usize {
    indices
        .iter()
        .enumerate()
        .filter(|&(i, _)| (compact_value >> i) & 1 == 1)
        .fold(0, |acc, (_, &pos)| acc | (1 << pos))
}

/// Find duplicate in a slice of usize
pub fn find_duplicate(indices: &[usize]) -> Option<usize> {
    let mut seen = HashSet::new();
    indices.iter().find(|&&idx| !seen.insert(idx)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn bits_round_trip_through_positions() {
        let indices = [2, 0];
        // value 0b101: bit 2 -> compact bit 0, bit 0 -> compact bit 1
        assert_eq!(extract_bits(0b101, &indices), 0b11);
        assert_eq!(deposit_bits(0b01, &indices), 0b100);
    }

    #[test]
    fn finds_first_duplicate() {
        assert_eq!(find_duplicate(&[0, 1, 0]), Some(0));
        assert_eq!(find_duplicate(&[0, 1]), None);
    }

    #[test]
    fn outer_product_of_basis_vector_is_projector() {
        let one = array![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];
        let p = outer_product(&one, &one);
        assert_eq!(trace(&p), Complex64::new(1.0, 0.0));
        assert_eq!(p[[1, 1]], Complex64::new(1.0, 0.0));
    }
}
