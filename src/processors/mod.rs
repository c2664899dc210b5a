// pixresize/src/processors/mod.rs
mod backup;
mod batch;
mod compressor;
mod loader;
mod resizer;

pub use backup::{BackupManager, BackupReport};
pub use batch::BatchResizer;
pub use compressor::Compressor;
pub use loader::Loader;
pub use resizer::Resizer;
