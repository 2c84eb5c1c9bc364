//! Storage infrastructure module

mod fs_library;
mod scratch;

pub use fs_library::FsLibrary;
pub use scratch::FsScratchSpace;
