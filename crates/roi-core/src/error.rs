use thiserror::Error;

pub type RoiResult<T> = Result<T, RoiError>;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
