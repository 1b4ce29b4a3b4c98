//! Projection archive on disk.
//!
//! Layout: `<root>/<projection_id>/manifest.json` and `result.json`.

use std::fs;
use std::path::{Path, PathBuf};

use roi_engine::RoiResult;

use crate::types::ProjectionManifest;
use crate::{ResultsError, ResultsResult};

#[derive(Debug, Clone)]
pub struct ProjectionStore {
    root_dir: PathBuf,
}

impl ProjectionStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// IDs are hex digests; anything else could escape the root directory.
    fn projection_dir(&self, projection_id: &str) -> ResultsResult<PathBuf> {
        let valid = !projection_id.is_empty()
            && projection_id.len() <= 128
            && projection_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ResultsError::InvalidId(projection_id.to_string()));
        }
        Ok(self.root_dir.join(projection_id))
    }

    pub fn has_projection(&self, projection_id: &str) -> bool {
        self.projection_dir(projection_id)
            .map(|dir| dir.join("manifest.json").exists())
            .unwrap_or(false)
    }

    pub fn save(&self, manifest: &ProjectionManifest, result: &RoiResult) -> ResultsResult<()> {
        let dir = self.projection_dir(&manifest.projection_id)?;
        fs::create_dir_all(&dir)?;

        fs::write(
            dir.join("manifest.json"),
            serde_json::to_string_pretty(manifest)?,
        )?;
        fs::write(dir.join("result.json"), serde_json::to_string(result)?)?;

        Ok(())
    }

    pub fn load_manifest(&self, projection_id: &str) -> ResultsResult<ProjectionManifest> {
        let path = self.projection_dir(projection_id)?.join("manifest.json");
        if !path.exists() {
            return Err(ResultsError::ProjectionNotFound {
                projection_id: projection_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_result(&self, projection_id: &str) -> ResultsResult<RoiResult> {
        let path = self.projection_dir(projection_id)?.join("result.json");
        if !path.exists() {
            return Err(ResultsError::ProjectionNotFound {
                projection_id: projection_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let result: RoiResult = serde_json::from_str(&content)?;
        if !result.is_aligned() {
            return Err(ResultsError::Corrupt {
                projection_id: projection_id.to_string(),
                reason: "series lengths differ from the year count",
            });
        }
        Ok(result)
    }

    /// All archived manifests, newest first.
    pub fn list(&self) -> ResultsResult<Vec<ProjectionManifest>> {
        let mut manifests = Vec::new();

        if !self.root_dir.exists() {
            return Ok(manifests);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let projection_id = entry.file_name().to_string_lossy().to_string();
            if let Ok(manifest) = self.load_manifest(&projection_id) {
                manifests.push(manifest);
            }
        }

        manifests.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.projection_id.cmp(&b.projection_id))
        });
        Ok(manifests)
    }

    pub fn delete(&self, projection_id: &str) -> ResultsResult<()> {
        let dir = self.projection_dir(projection_id)?;
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }
}
