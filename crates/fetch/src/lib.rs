//! Image retrieval for reconciled products.
//!
//! A product image is fetched once and kept forever: the cache key is the
//! internal code, not the URL, so a re-run never re-downloads an asset that
//! is already on disk.
//!
//! No retries. No async runtime. No image decoding.

mod store;

pub use store::{FetchOutcome, ImageStore, FETCH_TIMEOUT_SECS, IMAGES_DIR_NAME};
