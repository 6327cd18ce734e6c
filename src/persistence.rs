// File: src/persistence.rs
use crate::core::encoder::LocalityEncoder;
use crate::core::model::RegressionModel;
use crate::core::pipeline::PreprocessingPipeline;
use crate::error::ArtifactError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const DEFAULT_MODEL_FILE: &str = "house_price_model.bin";
pub const DEFAULT_PIPELINE_FILE: &str = "full_pipeline.bin";
pub const DEFAULT_LOCALITY_FILE: &str = "local_encoder.bin";

/// Where the three artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub pipeline: PathBuf,
    pub localities: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(DEFAULT_MODEL_FILE),
            pipeline: dir.join(DEFAULT_PIPELINE_FILE),
            localities: dir.join(DEFAULT_LOCALITY_FILE),
        }
    }
}

/// The loaded, validated artifacts, before they are wired into an engine.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub encoder: LocalityEncoder,
    pub pipeline: PreprocessingPipeline,
    pub model: RegressionModel,
}

impl ArtifactBundle {
    /// Validates freshly deserialized parts.
    pub fn from_parts(
        locality_codes: HashMap<String, f64>,
        pipeline: PreprocessingPipeline,
        model: RegressionModel,
    ) -> Result<Self, ArtifactError> {
        pipeline.validate()?;
        model.validate()?;
        Ok(Self {
            encoder: LocalityEncoder::from_map(locality_codes)?,
            pipeline,
            model,
        })
    }
}

/// Single-document export written by the training side.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonExport {
    pub locality_codes: HashMap<String, f64>,
    pub pipeline: PreprocessingPipeline,
    pub model: RegressionModel,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ArtifactError + '_ {
    move |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes one bincode artifact atomically: temp file in the target
/// directory, then rename over the destination.
pub fn save_artifact<T: Serialize>(value: &T, path: &Path) -> Result<(), ArtifactError> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(io_error(path))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(io_error(path))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, value).map_err(|source| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_error(path))?;
    }

    temp_file.persist(path).map_err(|e| ArtifactError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    tracing::debug!(path = %path.display(), "artifact written");
    Ok(())
}

pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(io_error(path))?;
    let reader = BufReader::new(file);
    let value = bincode::deserialize_from(reader).map_err(|source| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "artifact loaded");
    Ok(value)
}

pub fn load_bundle(paths: &ArtifactPaths) -> Result<ArtifactBundle, ArtifactError> {
    let model: RegressionModel = load_artifact(&paths.model)?;
    let pipeline: PreprocessingPipeline = load_artifact(&paths.pipeline)?;
    let locality_codes: HashMap<String, f64> = load_artifact(&paths.localities)?;
    tracing::info!(
        model = %paths.model.display(),
        pipeline = %paths.pipeline.display(),
        localities = %paths.localities.display(),
        "artifacts loaded"
    );
    ArtifactBundle::from_parts(locality_codes, pipeline, model)
}

pub fn save_bundle(bundle: &ArtifactBundle, paths: &ArtifactPaths) -> Result<(), ArtifactError> {
    save_artifact(&bundle.model, &paths.model)?;
    save_artifact(&bundle.pipeline, &paths.pipeline)?;
    save_artifact(bundle.encoder.codes(), &paths.localities)
}

/// Parses and validates a JSON export.
pub fn import_json_bundle(path: &Path) -> Result<ArtifactBundle, ArtifactError> {
    let file = File::open(path).map_err(io_error(path))?;
    let export: JsonExport =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    ArtifactBundle::from_parts(export.locality_codes, export.pipeline, export.model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::{ColumnStep, ColumnTransform};
    use crate::core::types::{ColumnKind, ColumnSpec};

    fn bundle() -> ArtifactBundle {
        let pipeline = PreprocessingPipeline::new(
            vec![ColumnSpec::new("size_sq_ft", ColumnKind::Numeric)],
            vec![ColumnStep {
                column: "size_sq_ft".into(),
                transform: ColumnTransform::Standardize {
                    mean: 900.0,
                    scale: 300.0,
                },
            }],
        )
        .unwrap();
        let model = RegressionModel::Linear {
            coefficients: vec![4_000.0],
            intercept: 15_000.0,
        };
        let codes = HashMap::from([("dwarka".to_string(), 12.5), ("saket".to_string(), 31.0)]);
        ArtifactBundle::from_parts(codes, pipeline, model).unwrap()
    }

    #[test]
    fn bundle_survives_a_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        let original = bundle();

        save_bundle(&original, &paths).unwrap();
        let loaded = load_bundle(&paths).unwrap();

        assert_eq!(loaded.model, original.model);
        assert_eq!(loaded.pipeline, original.pipeline);
        assert_eq!(loaded.encoder.codes(), original.encoder.codes());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        let err = load_bundle(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(err.to_string().contains(DEFAULT_MODEL_FILE), "{err}");
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, [0xff, 0xff, 0xff]).unwrap();
        assert!(matches!(
            load_artifact::<RegressionModel>(&path),
            Err(ArtifactError::Corrupt { .. })
        ));
    }

    #[test]
    fn save_overwrites_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("codes.bin");
        save_artifact(&HashMap::from([("a".to_string(), 1.0)]), &path).unwrap();
        save_artifact(&HashMap::from([("b".to_string(), 2.0)]), &path).unwrap();
        let codes: HashMap<String, f64> = load_artifact(&path).unwrap();
        assert_eq!(codes, HashMap::from([("b".to_string(), 2.0)]));
    }
}
