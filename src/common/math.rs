//! Numeric helpers shared by the indicator and forecast engines.
//!
//! Everything here returns `None` instead of panicking when the input cannot
//! support the requested computation.

/// Relative pivot size below which a linear system is treated as singular.
const SINGULAR_TOLERANCE: f64 = 1e-12;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Apply first differences `order` times.
pub fn difference(values: &[f64], order: usize) -> Vec<f64> {
    let mut current = values.to_vec();
    for _ in 0..order {
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }
    current
}

/// Biased sample autocovariance of an already demeaned series at `lag`.
///
/// Dividing by `n` (not `n - lag`) keeps the autocovariance sequence positive
/// semi-definite, which the Levinson-Durbin recursion relies on.
pub fn autocovariance(centered: &[f64], lag: usize) -> Option<f64> {
    let n = centered.len();
    if n == 0 || lag >= n {
        return None;
    }
    let sum: f64 = (lag..n).map(|t| centered[t] * centered[t - lag]).sum();
    Some(sum / n as f64)
}

/// Solve the Yule-Walker equations for AR coefficients.
///
/// `autocov[0..=order]` are autocovariances at lags `0..=order`. Returns the
/// coefficients `phi_1..phi_order` and the final innovation variance.
pub fn levinson_durbin(autocov: &[f64], order: usize) -> Option<(Vec<f64>, f64)> {
    if autocov.len() < order + 1 || autocov[0] <= 0.0 {
        return None;
    }

    let mut phi = vec![0.0; order];
    let mut error = autocov[0];

    for k in 0..order {
        let mut acc = autocov[k + 1];
        for j in 0..k {
            acc -= phi[j] * autocov[k - j];
        }
        let reflection = acc / error;
        if !reflection.is_finite() || reflection.abs() >= 1.0 {
            return None;
        }

        let previous = phi.clone();
        phi[k] = reflection;
        for j in 0..k {
            phi[j] = previous[j] - reflection * previous[k - 1 - j];
        }

        error *= 1.0 - reflection * reflection;
        if error.is_nan() || error <= 0.0 {
            return None;
        }
    }

    Some((phi, error))
}

/// Gaussian elimination with partial pivoting.
pub fn solve_linear_system(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Option<Vec<f64>> {
    let n = rhs.len();
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return None;
    }

    let scale = matrix
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }

    for col in 0..n {
        let pivot_row = (col..n).max_by(|&a, &b| {
            matrix[a][col]
                .abs()
                .partial_cmp(&matrix[b][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if matrix[pivot_row][col].abs() < SINGULAR_TOLERANCE * scale {
            return None;
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }

    if solution.iter().all(|v| v.is_finite()) {
        Some(solution)
    } else {
        None
    }
}

/// Ordinary least squares through the normal equations.
pub fn least_squares(design: &[Vec<f64>], targets: &[f64]) -> Option<Vec<f64>> {
    let columns = design.first()?.len();
    if columns == 0 || design.len() != targets.len() || design.len() < columns {
        return None;
    }

    let mut xtx = vec![vec![0.0; columns]; columns];
    let mut xty = vec![0.0; columns];
    for (row, &y) in design.iter().zip(targets) {
        for i in 0..columns {
            xty[i] += row[i] * y;
            for j in 0..columns {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }

    solve_linear_system(xtx, xty)
}
