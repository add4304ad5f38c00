use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unsupported operation: {what}")]
    UnsupportedOperation { what: &'static str },
}
