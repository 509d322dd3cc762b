use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlainError>;

#[derive(Debug, Error)]
pub enum PlainError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("couldn't load the Xlib shared library: {0}")]
    XlibLoad(#[from] x11_dl::error::OpenError),
    #[error("couldn't open a connection to the X server")]
    XOpenDisplay,
    #[error("couldn't allocate the font set \"{0}\"")]
    FontAllocation(String),
}
