#[macro_use]
mod macros;

pub mod driver;
pub use driver::{Cursor, Executor};

mod error;
pub use error::{DecodeContext, Error};

pub mod stmt;

/// A Result type alias that uses joinorm's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
