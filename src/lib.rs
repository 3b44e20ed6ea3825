pub use crate::prelude::Result;

pub mod commands;
pub mod helpers;
pub mod math;
pub mod opts;
pub mod prelude;
pub mod scorer;
pub mod snapshot;
