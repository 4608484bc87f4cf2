pub(crate) mod download_processor;
pub(crate) mod filename;

mod cover_art;
pub(crate) use cover_art::*;

mod thumbnail_proxy;
pub(crate) use thumbnail_proxy::*;
