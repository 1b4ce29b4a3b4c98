//! Response and archive data types.

use chrono::Utc;
use roi_engine::{ApplicationEstimate, RoiResult};
use serde::{Deserialize, Serialize};

pub type ProjectionId = String;

/// Response body of the projection routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResponse {
    #[serde(rename = "roiData")]
    pub roi_data: RoiResult,
}

impl From<RoiResult> for RoiResponse {
    fn from(roi_data: RoiResult) -> Self {
        Self { roi_data }
    }
}

/// Response body of the application estimate route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    #[serde(rename = "roiData")]
    pub roi_data: ApplicationEstimate,
}

impl From<ApplicationEstimate> for ApplicationResponse {
    fn from(roi_data: ApplicationEstimate) -> Self {
        Self { roi_data }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    Automatic,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionManifest {
    pub projection_id: ProjectionId,
    pub kind: ProjectionKind,
    pub created_at: String,
    pub parameters_version: String,
    pub in_house_model: String,
    /// Normalized input the projection was computed from.
    pub input: serde_json::Value,
}

impl ProjectionManifest {
    /// Manifest stamped with the current UTC time.
    pub fn new(
        projection_id: ProjectionId,
        kind: ProjectionKind,
        parameters_version: &str,
        in_house_model: &str,
        input: serde_json::Value,
    ) -> Self {
        Self {
            projection_id,
            kind,
            created_at: Utc::now().to_rfc3339(),
            parameters_version: parameters_version.to_string(),
            in_house_model: in_house_model.to_string(),
            input,
        }
    }
}
