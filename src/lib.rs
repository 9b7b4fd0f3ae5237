#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod backend;
pub mod error;
pub mod ffi;
pub mod functions;
pub mod outbuf;
pub mod registry;
pub mod runtime;
pub mod table;

/// A module typically glob-imported containing the typically required
/// types.
pub mod prelude {
    pub use crate::args::{ArgWriter, FieldCursor};
    pub use crate::backend::Graphics;
    pub use crate::error::{Error, Result};
    pub use crate::outbuf::OutBuf;
    pub use crate::registry::Registry;
    pub use crate::runtime::Runtime;
    pub use crate::table::ResourceTable;
}

/// `ext-ray-rs` version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
