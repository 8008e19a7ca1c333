//! Storage abstraction layer.
//!
//! An index persists its commits through the [`Storage`] trait. Two backends
//! are provided: [`MemoryStorage`] (volatile, process lifetime) and
//! [`FileStorage`] (a directory on disk, durable across restarts).

pub mod file;
pub mod memory;
pub mod structured;
pub mod traits;

pub use file::*;
pub use memory::*;
pub use structured::*;
pub use traits::*;
