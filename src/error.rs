// Error types shared by the pipeline, the board and the file pickers.
// Selection errors never reach the user; processing errors end the job
// with a generic status line and are handed back to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while asking the user for a file.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("file prompt failed: {0}")]
    Prompt(#[from] io::Error),

    #[error("not a .txt/.md file: {}", .0.display())]
    UnsupportedFile(PathBuf),
}

/// Failure reported by a card sink.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("card rejected: {0}")]
    Rejected(String),
}

/// Failure while reading, splitting or uploading a file.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to add card '{card}': {source}")]
    Upload {
        card: String,
        #[source]
        source: BoardError,
    },
}
