//! Per-request prediction pipeline
//!
//! hint text -> [`HintSpec`] -> fit-time design matrix -> ridge fit ->
//! predict-time design matrix (same spec) -> predictions.
//!
//! The pipeline holds only read-only configuration. Every call builds and
//! drops its own matrices and model, so one instance can serve concurrent
//! requests without locking.

use crate::basis::PolySinusoidBasis;
use crate::hint::KeywordInterpreter;
use crate::ridge::RidgeRegression;
use predict_spi::{
    BasisBuilder, Feature, FittedModel, HintInterpreter, HintSpec, ObservedData, PredictError,
    PredictionResult, Regressor, Result,
};
use tracing::debug;

/// Hint-guided predictor
pub struct PredictionPipeline {
    interpreter: Box<dyn HintInterpreter>,
    basis: Box<dyn BasisBuilder>,
    regression: RidgeRegression,
}

impl PredictionPipeline {
    pub fn new(
        interpreter: Box<dyn HintInterpreter>,
        basis: Box<dyn BasisBuilder>,
        regression: RidgeRegression,
    ) -> Self {
        Self {
            interpreter,
            basis,
            regression,
        }
    }

    pub fn regression(&self) -> &RidgeRegression {
        &self.regression
    }

    /// Resolve hint text to a spec (never fails)
    pub fn interpret(&self, hint: Option<&str>) -> HintSpec {
        self.interpreter.interpret(hint)
    }

    /// Column layout the spec would produce
    pub fn layout(&self, spec: &HintSpec) -> Result<Vec<Feature>> {
        self.basis.features(spec)
    }

    /// Interpret `hint`, fit on `observed`, and predict at `inputs`
    pub fn predict(
        &self,
        observed: &ObservedData,
        hint: Option<&str>,
        inputs: &[f64],
    ) -> Result<PredictionResult> {
        let spec = self.interpret(hint);
        self.predict_with_spec(observed, &spec, inputs)
    }

    /// Fit on `observed` and predict at `inputs` using an already resolved spec
    pub fn predict_with_spec(
        &self,
        observed: &ObservedData,
        spec: &HintSpec,
        inputs: &[f64],
    ) -> Result<PredictionResult> {
        let fit_matrix = self.basis.build(spec, observed.x())?;
        let model = self.regression.fit(&fit_matrix, observed.y())?;

        let predict_matrix = self.basis.build(spec, inputs)?;
        let result = model.predict(&predict_matrix)?;
        if let Some(index) = result.values().iter().position(|v| !v.is_finite()) {
            return Err(PredictError::Numerical(format!(
                "prediction at input {} is not finite",
                index
            )));
        }

        debug!(
            observed = observed.len(),
            predicted = result.len(),
            columns = fit_matrix.cols(),
            "prediction complete"
        );
        Ok(result)
    }
}

impl Default for PredictionPipeline {
    fn default() -> Self {
        Self::new(
            Box::new(KeywordInterpreter::default()),
            Box::new(PolySinusoidBasis::default()),
            RidgeRegression::default(),
        )
    }
}

impl std::fmt::Debug for PredictionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionPipeline")
            .field("lambda", &self.regression.lambda())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisLimits;
    use std::f64::consts::PI;

    #[test]
    fn test_linear_extrapolation() {
        let y: Vec<f64> = (1..=10).map(|x| 2.0 * x as f64 + 1.0).collect();
        let observed = ObservedData::positional(y);
        let result = PredictionPipeline::default()
            .predict(&observed, Some("linear"), &[11.0, 12.0])
            .unwrap();

        assert!((result.values()[0] - 23.0).abs() < 1e-2);
        assert!((result.values()[1] - 25.0).abs() < 1e-2);
    }

    #[test]
    fn test_periodic_interpolation() {
        let x: Vec<f64> = (0..8).map(|i| i as f64 * PI / 4.0).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let observed = ObservedData::new(x, y).unwrap();

        let probe = [PI / 8.0, 3.0 * PI / 8.0, 1.3 * PI];
        let result = PredictionPipeline::default()
            .predict(&observed, Some("periodic"), &probe)
            .unwrap();

        for (p, v) in probe.iter().zip(result.values()) {
            assert!((v - p.sin()).abs() < 1e-2, "at {}: {} vs {}", p, v, p.sin());
        }
    }

    #[test]
    fn test_empty_prediction_inputs() {
        let observed = ObservedData::positional(vec![1.0, 2.0, 3.0]);
        let result = PredictionPipeline::default()
            .predict(&observed, Some("quadratic"), &[])
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_observations_is_insufficient_data() {
        let observed = ObservedData::positional(vec![]);
        let err = PredictionPipeline::default()
            .predict(&observed, None, &[1.0])
            .unwrap_err();
        assert!(matches!(err, PredictError::InsufficientData { .. }));
    }

    #[test]
    fn test_degree_over_ceiling_is_degenerate() {
        let pipeline = PredictionPipeline::new(
            Box::new(KeywordInterpreter::default()),
            Box::new(
                PolySinusoidBasis::new(
                    1.0,
                    BasisLimits {
                        max_polynomial_degree: 3,
                        max_frequencies: 3,
                    },
                )
                .unwrap(),
            ),
            RidgeRegression::default(),
        );
        let observed = ObservedData::positional(vec![1.0, 2.0]);
        let err = pipeline
            .predict(&observed, Some("degree 9"), &[3.0])
            .unwrap_err();
        assert!(matches!(err, PredictError::DegenerateBasis { .. }));
    }

    #[test]
    fn test_overflowing_prediction_is_numerical_error() {
        let observed = ObservedData::positional(vec![1.0, 8.0, 27.0]);
        let err = PredictionPipeline::default()
            .predict(&observed, Some("cubic"), &[2.0, 1e200])
            .unwrap_err();
        match err {
            PredictError::Numerical(msg) => assert!(msg.contains("input 1"), "{}", msg),
            other => panic!("Expected Numerical, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_basis_hint_still_predicts() {
        let observed = ObservedData::positional(vec![2.0, 4.0, 6.0]);
        let result = PredictionPipeline::default()
            .predict(&observed, Some("no intercept, degree 0"), &[4.0])
            .unwrap();
        assert!((result.values()[0] - 8.0).abs() < 1e-2);
    }

    #[test]
    fn test_single_observation_with_cubic_hint() {
        let observed = ObservedData::positional(vec![4.0]);
        let result = PredictionPipeline::default()
            .predict(&observed, Some("cubic"), &[1.0, 2.0])
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_layout_matches_interpreted_spec() {
        let pipeline = PredictionPipeline::default();
        let spec = pipeline.interpret(Some("quadratic"));
        let layout = pipeline.layout(&spec).unwrap();
        assert_eq!(
            layout,
            vec![Feature::Bias, Feature::Power(1), Feature::Power(2)]
        );
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PredictionPipeline>();
    }
}
