mod extraction;

pub(crate) use extraction::*;
