//! roi-core: shared foundation for the issuing ROI workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{RoiError, RoiResult};
pub use numeric::*;
