mod fetch;
mod source;

pub use fetch::{HttpSkinFetcher, LoadError, SkinFetcher, file_uri_to_path};
pub use source::{
    CacheBuster, ELYBY_SKIN_URL_BASE, SkinSource, SourceResolver, elyby_skin_url,
    normalize_source,
};
