use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown numeric column: `{0}`")]
    UnknownColumn(String),

    #[error("scales cannot be built over an empty record set")]
    EmptyRecordSet,
}
