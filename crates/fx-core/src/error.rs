use thiserror::Error;

pub type FxResult<T> = Result<T, FxError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
