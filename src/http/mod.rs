mod download;
mod pages;
mod thumbnail;

pub(crate) use download::download_track;
pub(crate) use pages::{favicon, index};
pub(crate) use thumbnail::proxy_thumbnail;
