// The teacher reaches for `.expect()`/`panic!` for its own malformed-input
// cases. That is fine for an addressing-mode bug, but spec.md §7 classifies
// a missing argument, a bad image file, and an invalid opcode as distinct,
// user-facing error kinds with their own exit-code behavior, so they get a
// real error type instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open image")]
    Open(#[from] io::Error),
    #[error("image truncated before origin could be read")]
    Truncated,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no image file given")]
    Usage,
    #[error("invalid opcode")]
    InvalidOpcode,
}

// Per-file diagnostic; not fatal to the run.
#[derive(Debug)]
pub struct ImageLoadFailure {
    pub path: PathBuf,
    pub source: LoadError,
}

impl std::fmt::Display for ImageLoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load image: {}!", self.path.display())
    }
}
