//! JSON artifact I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

use super::classifier::{ClassifierArtifact, FertilizerClassifier};
use super::transform::FeatureTransform;
use super::PredictorError;

/// A loaded model/transform pair. Read-only once built.
pub struct LoadedArtifacts {
    pub transform: FeatureTransform,
    pub classifier: Box<dyn FertilizerClassifier>,
}

impl std::fmt::Debug for LoadedArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedArtifacts")
            .field("transform_dim", &self.transform.output_dim())
            .field("classes", &self.classifier.classes())
            .finish()
    }
}

/// Read and parse one JSON artifact. A missing file maps to `missing`.
pub fn read_artifact<T: DeserializeOwned>(
    path: &Path,
    missing: fn(PathBuf) -> PredictorError,
) -> Result<T, PredictorError> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => missing(path.to_path_buf()),
        _ => PredictorError::ArtifactIo {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    serde_json::from_slice(&data).map_err(|e| PredictorError::ArtifactParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the classifier, then the transform.
pub fn load_artifacts(
    model_path: &Path,
    transform_path: &Path,
) -> Result<LoadedArtifacts, PredictorError> {
    let classifier = read_artifact::<ClassifierArtifact>(model_path, PredictorError::ModelMissing)?
        .into_classifier()?;
    let transform = read_artifact::<FeatureTransform>(transform_path, PredictorError::TransformMissing)?;
    Ok(LoadedArtifacts {
        transform,
        classifier,
    })
}

/// Save an artifact atomically (write temp file, then rename).
pub fn save_artifact<T: Serialize>(value: &T, path: &Path) -> io::Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp_path = path.with_extension("json.tmp");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&tmp_path, &json)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}
