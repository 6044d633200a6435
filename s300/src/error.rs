use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("s300: Connection error : {}", message)]
    Connection { message: String },
    #[error("s300: Read error : {}", message)]
    Read { message: String },
    #[error(
        "s300: Device reported {} ranges, but the window needs at least {}",
        actual,
        required
    )]
    RangeCountMismatch { required: usize, actual: usize },
    #[error("s300: Failed to publish scan : {}", message)]
    Publish { message: String },
    #[error("s300: Failed to broadcast transform : {}", message)]
    Broadcast { message: String },
    #[error("s300: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}
