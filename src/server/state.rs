//! Shared application state handed to every handler.

use crate::application::ports::Transcoder;
use crate::application::SubmitConversionUseCase;
use crate::infrastructure::{FsLibrary, FsScratchSpace, SystemClock};

/// Submit pipeline as wired for the server
pub type ServerSubmitUseCase =
    SubmitConversionUseCase<Box<dyn Transcoder>, FsLibrary, FsScratchSpace, SystemClock>;

/// Process-wide state, wrapped in `Arc` by the router
pub struct AppState {
    pub submit: ServerSubmitUseCase,
    /// Request body ceiling for uploads
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(submit: ServerSubmitUseCase, max_upload_bytes: usize) -> Self {
        Self {
            submit,
            max_upload_bytes,
        }
    }
}
