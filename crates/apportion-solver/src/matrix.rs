//! Dense helpers for small row-major systems.
//!
//! The systems here are at most 4x4 (one row per budget category), so plain
//! Gaussian elimination with partial pivoting is exact enough and keeps the
//! arithmetic inspectable in the audit trace.

/// Pivots with absolute value below this are treated as zero during
/// elimination.
const NEAR_ZERO: f64 = 1e-12;

/// Determinant via Gaussian elimination with partial pivoting.
///
/// Row swaps flip the sign; the determinant is the product of the pivots.
/// Returns 0.0 as soon as a pivot column is entirely (near-)zero.
pub fn determinant(a: &[Vec<f64>]) -> f64 {
    let n = a.len();
    if n == 0 {
        return 1.0;
    }
    let mut m = a.to_vec();
    let mut det = 1.0;

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = m[col][col].abs();
        for row in (col + 1)..n {
            let v = m[row][col].abs();
            if v > max_val {
                max_val = v;
                max_row = row;
            }
        }
        if max_val < NEAR_ZERO {
            return 0.0;
        }
        if max_row != col {
            m.swap(col, max_row);
            det = -det;
        }

        let pivot = m[col][col];
        det *= pivot;
        for row in (col + 1)..n {
            let factor = m[row][col] / pivot;
            m[row][col] = 0.0;
            for k in (col + 1)..n {
                let subtrahend = factor * m[col][k];
                m[row][k] -= subtrahend;
            }
        }
    }

    det
}

/// Inverse via Gauss-Jordan elimination on the augmented matrix `[A | I]`,
/// with partial pivoting.
///
/// Returns `None` when a pivot vanishes (singular input). Callers gate on
/// the determinant first, so `None` here indicates an inconsistency between
/// the two computations rather than an expected rejection.
pub fn invert(a: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let stride = 2 * n;
    let mut aug: Vec<Vec<f64>> = a
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut extended = Vec::with_capacity(stride);
            extended.extend_from_slice(row);
            extended.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
            extended
        })
        .collect();

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = aug[col][col].abs();
        for row in (col + 1)..n {
            let v = aug[row][col].abs();
            if v > max_val {
                max_val = v;
                max_row = row;
            }
        }
        if max_val < NEAR_ZERO {
            return None;
        }
        if max_row != col {
            aug.swap(col, max_row);
        }

        let pivot = aug[col][col];
        for entry in aug[col].iter_mut() {
            *entry /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in 0..stride {
                let subtrahend = factor * aug[col][k];
                aug[row][k] -= subtrahend;
            }
        }
    }

    Some(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}

/// Matrix-vector product for a row-major matrix.
pub fn mat_vec(a: &[Vec<f64>], x: &[f64]) -> Vec<f64> {
    a.iter()
        .map(|row| row.iter().zip(x).map(|(c, v)| c * v).sum())
        .collect()
}

/// Formats a row-major matrix on one line for step traces.
pub fn format_matrix(a: &[Vec<f64>]) -> String {
    let rows: Vec<String> = a.iter().map(|row| format_vector(row)).collect();
    format!("[{}]", rows.join(", "))
}

/// Formats a vector on one line for step traces.
pub fn format_vector(v: &[f64]) -> String {
    let entries: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("[{}]", entries.join(", "))
}
