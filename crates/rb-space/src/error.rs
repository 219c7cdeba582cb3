use rb_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpaceError {
    #[error("space configuration rejected: {0}")]
    Config(#[from] ConfigError),
}

pub type SpaceResult<T> = Result<T, SpaceError>;
