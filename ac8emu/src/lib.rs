pub mod model;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image is {0} bytes; memory holds {1}")]
    ImageTooLarge(usize, usize),
}
