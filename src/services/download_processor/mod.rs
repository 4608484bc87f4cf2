mod processor;
mod traits;
mod types;

pub(crate) use processor::*;
pub(crate) use traits::*;
pub(crate) use types::*;
