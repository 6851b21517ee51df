//! Closed-form ridge regression
//!
//! Minimizes `||y - X b||^2 + lambda ||b||^2` by solving the regularized normal
//! equations `(X^T X + lambda I) b = X^T y` with a Cholesky factorization.
//! For `lambda > 0` the system matrix is positive definite, so the fit is
//! well-posed even with fewer rows than columns or collinear columns.
//!
//! ## When to Use
//!
//! - Small, noisy samples
//! - Bases with more columns than observations
//! - Any case where a deterministic, non-iterative fit is required

use predict_spi::{DesignMatrix, Feature, FittedModel, PredictError, Regressor, Result};
use tracing::debug;

/// Regularization strength used when none is configured
pub const DEFAULT_LAMBDA: f64 = 1e-4;

/// Ridge regressor with a fixed regularization strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeRegression {
    lambda: f64,
}

impl RidgeRegression {
    /// Create a new ridge regressor
    ///
    /// # Arguments
    ///
    /// * `lambda` - L2 penalty, must be finite and strictly positive
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(PredictError::InvalidParameter {
                name: "lambda".to_string(),
                reason: "must be finite and positive".to_string(),
            });
        }

        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
        }
    }
}

impl Regressor for RidgeRegression {
    type Model = RidgeModel;

    fn fit(&self, x: &DesignMatrix, y: &[f64]) -> Result<RidgeModel> {
        if x.rows() == 0 {
            return Err(PredictError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if x.rows() != y.len() {
            return Err(PredictError::LengthMismatch {
                inputs: x.rows(),
                targets: y.len(),
            });
        }

        let (gram, rhs) = normal_equations(x, y, self.lambda);
        let coefficients = cholesky_solve(gram, rhs, x.cols())?;
        if coefficients.iter().any(|b| !b.is_finite()) {
            return Err(PredictError::Numerical(
                "ridge solve produced non-finite coefficients".to_string(),
            ));
        }

        debug!(
            rows = x.rows(),
            cols = x.cols(),
            lambda = self.lambda,
            "fitted ridge model"
        );

        Ok(RidgeModel {
            coefficients,
            lambda: self.lambda,
            features: x.features().to_vec(),
        })
    }
}

/// Fitted ridge coefficients
///
/// Lives for a single request; prediction is the default
/// [`FittedModel::predict`] dot product.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeModel {
    coefficients: Vec<f64>,
    lambda: f64,
    features: Vec<Feature>,
}

impl RidgeModel {
    /// Penalty the model was fitted with
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Column layout the model was fitted on
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl FittedModel for RidgeModel {
    fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// Build `X^T X + lambda I` (k x k, row-major) and `X^T y`
fn normal_equations(x: &DesignMatrix, y: &[f64], lambda: f64) -> (Vec<f64>, Vec<f64>) {
    let k = x.cols();
    let mut gram = vec![0.0; k * k];
    let mut rhs = vec![0.0; k];

    for (row, &target) in x.iter_rows().zip(y) {
        for i in 0..k {
            rhs[i] += row[i] * target;
            for j in 0..=i {
                gram[i * k + j] += row[i] * row[j];
            }
        }
    }

    for i in 0..k {
        for j in 0..i {
            gram[j * k + i] = gram[i * k + j];
        }
        gram[i * k + i] += lambda;
    }

    (gram, rhs)
}

/// Solve `A b = rhs` for symmetric positive definite `A` (k x k, row-major).
///
/// The lower triangle of `a` is overwritten with the Cholesky factor `L`.
fn cholesky_solve(mut a: Vec<f64>, mut b: Vec<f64>, k: usize) -> Result<Vec<f64>> {
    // A = L L^T
    for j in 0..k {
        let mut diag = a[j * k + j];
        for p in 0..j {
            diag -= a[j * k + p] * a[j * k + p];
        }
        if diag <= 0.0 || !diag.is_finite() {
            return Err(PredictError::Numerical(format!(
                "normal equations not positive definite at column {}",
                j
            )));
        }
        let l_jj = diag.sqrt();
        a[j * k + j] = l_jj;

        for i in (j + 1)..k {
            let mut sum = a[i * k + j];
            for p in 0..j {
                sum -= a[i * k + p] * a[j * k + p];
            }
            a[i * k + j] = sum / l_jj;
        }
    }

    // Forward substitution: L z = b
    for i in 0..k {
        let mut sum = b[i];
        for p in 0..i {
            sum -= a[i * k + p] * b[p];
        }
        b[i] = sum / a[i * k + i];
    }

    // Back substitution: L^T x = z
    for i in (0..k).rev() {
        let mut sum = b[i];
        for p in (i + 1)..k {
            sum -= a[p * k + i] * b[p];
        }
        b[i] = sum / a[i * k + i];
    }

    Ok(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_matrix(xs: &[f64]) -> DesignMatrix {
        let mut m = DesignMatrix::new(vec![Feature::Bias, Feature::Power(1)]);
        for &x in xs {
            m.push_row(&[1.0, x]).unwrap();
        }
        m
    }

    // ==========================================================================
    // Construction Tests
    // ==========================================================================

    #[test]
    fn test_new_rejects_non_positive_lambda() {
        assert!(RidgeRegression::new(0.0).is_err());
        assert!(RidgeRegression::new(-1.0).is_err());
        assert!(RidgeRegression::new(f64::NAN).is_err());
        assert_eq!(RidgeRegression::new(0.5).unwrap().lambda(), 0.5);
    }

    #[test]
    fn test_default_lambda() {
        assert_eq!(RidgeRegression::default().lambda(), DEFAULT_LAMBDA);
    }

    // ==========================================================================
    // Fit Tests
    // ==========================================================================

    #[test]
    fn test_fit_recovers_line() {
        let xs: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let model = RidgeRegression::new(1e-8)
            .unwrap()
            .fit(&linear_matrix(&xs), &ys)
            .unwrap();

        let beta = model.coefficients();
        assert!((beta[0] - 1.0).abs() < 1e-5, "intercept {}", beta[0]);
        assert!((beta[1] - 2.0).abs() < 1e-6, "slope {}", beta[1]);
    }

    #[test]
    fn test_fit_matches_hand_solution() {
        // X = [[1, 0], [1, 1]], y = [1, 3], lambda = 1
        // X^T X + I = [[3, 1], [1, 2]], X^T y = [4, 3]
        // b = [[2, -1], [-1, 3]] / 5 * [4, 3] = [1, 1]
        let model = RidgeRegression::new(1.0)
            .unwrap()
            .fit(&linear_matrix(&[0.0, 1.0]), &[1.0, 3.0])
            .unwrap();
        let beta = model.coefficients();
        assert!((beta[0] - 1.0).abs() < 1e-12);
        assert!((beta[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_more_columns_than_rows() {
        let mut m = DesignMatrix::new(vec![
            Feature::Bias,
            Feature::Power(1),
            Feature::Power(2),
            Feature::Power(3),
        ]);
        m.push_row(&[1.0, 2.0, 4.0, 8.0]).unwrap();
        let model = RidgeRegression::default().fit(&m, &[5.0]).unwrap();
        assert_eq!(model.coefficients().len(), 4);
        assert!(model.coefficients().iter().all(|b| b.is_finite()));
    }

    #[test]
    fn test_fit_collinear_columns() {
        let mut m = DesignMatrix::new(vec![Feature::Power(1), Feature::Power(1)]);
        for x in [1.0, 2.0, 3.0] {
            m.push_row(&[x, x]).unwrap();
        }
        let model = RidgeRegression::new(1e-3).unwrap().fit(&m, &[2.0, 4.0, 6.0]).unwrap();
        let beta = model.coefficients();
        // penalty splits the weight evenly between identical columns
        assert!((beta[0] - beta[1]).abs() < 1e-9);
        assert!((beta[0] + beta[1] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_fit_zero_rows_is_insufficient_data() {
        let err = RidgeRegression::default()
            .fit(&linear_matrix(&[]), &[])
            .unwrap_err();
        assert_eq!(
            err,
            PredictError::InsufficientData {
                required: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_fit_target_length_mismatch() {
        let err = RidgeRegression::default()
            .fit(&linear_matrix(&[1.0, 2.0]), &[1.0])
            .unwrap_err();
        assert_eq!(
            err,
            PredictError::LengthMismatch {
                inputs: 2,
                targets: 1
            }
        );
    }

    #[test]
    fn test_fit_non_finite_input_is_numerical_error() {
        let err = RidgeRegression::default()
            .fit(&linear_matrix(&[1.0, f64::NAN]), &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, PredictError::Numerical(_)));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let xs = [0.5, 1.5, 2.0, 4.0];
        let ys = [1.0, 0.0, 2.0, 3.0];
        let ridge = RidgeRegression::new(0.1).unwrap();
        let a = ridge.fit(&linear_matrix(&xs), &ys).unwrap();
        let b = ridge.fit(&linear_matrix(&xs), &ys).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_model_records_layout_and_lambda() {
        let model = RidgeRegression::new(0.25)
            .unwrap()
            .fit(&linear_matrix(&[1.0, 2.0]), &[1.0, 2.0])
            .unwrap();
        assert_eq!(model.lambda(), 0.25);
        assert_eq!(model.features(), &[Feature::Bias, Feature::Power(1)]);
    }

    // ==========================================================================
    // Predict Tests
    // ==========================================================================

    #[test]
    fn test_predict_reproduces_training_targets() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [3.0, 5.0, 7.0, 9.0, 11.0];
        let x = linear_matrix(&xs);
        let model = RidgeRegression::new(1e-9).unwrap().fit(&x, &ys).unwrap();
        let fitted = model.predict(&x).unwrap();
        for (f, y) in fitted.values().iter().zip(ys.iter()) {
            assert!((f - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_predict_empty_matrix() {
        let model = RidgeRegression::default()
            .fit(&linear_matrix(&[1.0, 2.0]), &[1.0, 2.0])
            .unwrap();
        assert!(model.predict(&linear_matrix(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_predict_column_mismatch() {
        let model = RidgeRegression::default()
            .fit(&linear_matrix(&[1.0, 2.0]), &[1.0, 2.0])
            .unwrap();
        let mut wide = DesignMatrix::new(vec![Feature::Bias, Feature::Power(1), Feature::Power(2)]);
        wide.push_row(&[1.0, 2.0, 4.0]).unwrap();
        let err = model.predict(&wide).unwrap_err();
        assert_eq!(
            err,
            PredictError::SchemaMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_shrinkage_grows_with_lambda() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];
        let small = RidgeRegression::new(1e-6).unwrap().fit(&linear_matrix(&xs), &ys).unwrap();
        let large = RidgeRegression::new(100.0).unwrap().fit(&linear_matrix(&xs), &ys).unwrap();
        let norm = |m: &RidgeModel| m.coefficients().iter().map(|b| b * b).sum::<f64>();
        assert!(norm(&large) < norm(&small));
    }
}
