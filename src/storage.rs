pub mod directory;
mod document;

pub use directory::{Directory, DirectoryLoadError};
pub use document::{LoadError, SaveError};
