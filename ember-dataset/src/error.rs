
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Index out of bounds for wrapped dataset size: {0} >= {1} when {2}")]
    IndexOutOfRangeWhenSelectDataset(usize, usize, &'static str),

    #[error("Slice start {start} is past its end {end}")]
    SliceStartAfterEnd { start: usize, end: usize },

    #[error("Use 0 to split dataset")]
    NumSplitZeroWhenSelectDataset,

    #[error("Split ratio {0} is outside [0, 1]")]
    InvalidSplitRatio(f64),

    #[error("Batch size must be greater than 0")]
    ZeroBatchSize,
}

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;
