use crate::core::assembler::{self, AssembledRecord};
use crate::core::currency::format_rupees;
use crate::core::encoder::LocalityEncoder;
use crate::core::model::RegressionModel;
use crate::core::pipeline::PreprocessingPipeline;
use crate::core::types::{FeatureRow, Prediction, RawInput};
use crate::error::{ArtifactError, InferenceError, PredictError};
use crate::persistence::{load_bundle, ArtifactBundle, ArtifactPaths};

// The prediction engine: encoder, pipeline and model loaded once and only
// ever read afterwards. Share it by reference.
#[derive(Debug, Clone)]
pub struct RentEngine {
    encoder: LocalityEncoder,
    pipeline: PreprocessingPipeline,
    model: RegressionModel,
}

impl RentEngine {
    /// Wires loaded artifacts together after checking each part on its own,
    /// that the pipeline was fitted on the assembled record's columns, and
    /// that it feeds the model the number of features it was fitted on.
    pub fn from_bundle(bundle: ArtifactBundle) -> Result<Self, ArtifactError> {
        let ArtifactBundle {
            encoder,
            pipeline,
            model,
        } = bundle;
        pipeline.validate()?;
        model.validate()?;

        let fitted = pipeline.schema().iter().map(|c| (c.name.as_str(), c.kind));
        if !assembler::matches_schema(fitted) {
            return Err(ArtifactError::invalid(
                "pipeline",
                format!(
                    "fitted schema {:?} does not match the assembled record {:?}",
                    pipeline.schema(),
                    assembler::SCHEMA
                ),
            ));
        }

        if pipeline.output_width() != model.n_features() {
            return Err(ArtifactError::invalid(
                "model",
                format!(
                    "pipeline produces {} features but the model expects {}",
                    pipeline.output_width(),
                    model.n_features()
                ),
            ));
        }

        Ok(Self {
            encoder,
            pipeline,
            model,
        })
    }

    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let engine = Self::from_bundle(load_bundle(paths)?)?;
        tracing::info!(
            localities = engine.encoder.len(),
            features = engine.model.n_features(),
            "rent engine ready"
        );
        Ok(engine)
    }

    pub fn encoder(&self) -> &LocalityEncoder {
        &self.encoder
    }

    /// Full request path: validate, encode, assemble, transform, predict.
    pub fn predict(&self, input: &RawInput) -> Result<Prediction, PredictError> {
        input.validate()?;
        let code = self.encoder.encode(&input.locality_name)?;
        let record = assembler::assemble(input, code);
        Ok(self.predict_record(&record)?)
    }

    pub fn predict_record(&self, record: &AssembledRecord) -> Result<Prediction, InferenceError> {
        self.predict_row(&record.to_row())
    }

    /// Runs the pipeline and model on an untyped row.
    pub fn predict_row(&self, row: &FeatureRow) -> Result<Prediction, InferenceError> {
        let features = self.pipeline.transform(row)?;
        let estimate = self.model.predict(&features)?;

        // Rent cannot be negative; extrapolating models sometimes disagree.
        let monthly_rent = if estimate < 0.0 {
            tracing::warn!(estimate, "negative rent estimate clamped to zero");
            0.0
        } else {
            estimate
        };

        Ok(Prediction {
            monthly_rent,
            display: format_rupees(monthly_rent),
        })
    }
}
