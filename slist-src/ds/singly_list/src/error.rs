use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ListError {
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("node allocation failed")]
    AllocFailed,
    #[error("cursor outlived a structural change of its list")]
    StaleCursor,
    #[error("cursor belongs to another list")]
    ForeignCursor,
}
