//! Product API client and loaders for the storefront.
//!
//! The product API is a black box that returns a product list or a single
//! product, or fails. This crate wraps it behind [`ProductSource`], checks
//! payloads at the boundary, and drives the fetch/retry cycle that fills the
//! products state.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::{Currency, Store};
//! use storefront_data::{ApiConfig, HttpProductSource, LoadState, ProductLoader};
//!
//! let source = HttpProductSource::new(ApiConfig::default())?;
//! let mut loader = ProductLoader::new(source);
//! let mut store = Store::new(Currency::USD);
//!
//! if let LoadState::Failure(message) = loader.load(&mut store).await {
//!     eprintln!("{message}");
//!     loader.refetch(&mut store).await; // waits 1s first
//! }
//! ```

mod detail;
mod error;
mod loader;
mod response;
mod retry;
mod source;

pub use detail::{detail_error_message, parse_product_id, DetailState, ProductDetailLoader};
pub use error::{FetchError, NETWORK_ERROR_MESSAGE};
pub use loader::{LoadState, ProductLoader};
pub use response::Response;
pub use retry::RetryPolicy;
pub use source::{ApiConfig, HttpProductSource, ProductSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiConfig, DetailState, FetchError, HttpProductSource, LoadState, ProductDetailLoader,
        ProductLoader, ProductSource, RetryPolicy,
    };
}
