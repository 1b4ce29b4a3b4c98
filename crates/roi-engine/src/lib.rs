//! roi-engine: deterministic multi-year ROI projections.
//!
//! Every entry point is a pure function of its inputs: no I/O, no shared
//! state, nothing cached between calls. Two growth models (automatic and
//! manual) feed the same per-year cost and revenue formulas, evaluated for
//! two deployment models (in-house build and issuing-as-a-service).

pub mod application;
pub mod error;
pub mod growth;
pub mod in_house;
pub mod params;
pub mod projection;

pub use application::{ApplicationEstimate, TimelinePoint, estimate_application};
pub use error::{EngineError, EngineResult};
pub use growth::automatic_card_curve;
pub use in_house::{BuildCost, InHouseCostModel, InHouseModel, NoInHouseCost};
pub use params::{CostParameters, PARAMETERS_VERSION};
pub use projection::{
    ModelSeries, ProjectionModel, RoiResult, YearFigures, compute_automatic_projection,
    compute_manual_projection, compute_projection,
};
