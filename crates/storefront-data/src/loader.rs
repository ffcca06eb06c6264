//! Retry-aware product list loader.

use storefront_commerce::catalog::Product;
use storefront_commerce::search::ProductsAction;
use storefront_commerce::Store;
use tracing::{info, warn};

use crate::{ProductSource, RetryPolicy};

/// Where the loader is in its fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    /// Holds the message shown to the user.
    Failure(String),
}

/// Fetches the product list into a [`Store`] and retries on demand.
///
/// Fetching takes `&mut self`, so a second fetch cannot start until the
/// first has resolved and a stale response can never land after a newer one.
pub struct ProductLoader<S> {
    source: S,
    policy: RetryPolicy,
    state: LoadState,
    products: Vec<Product>,
    retry_count: u32,
}

impl<S: ProductSource> ProductLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: RetryPolicy::default(),
            state: LoadState::Idle,
            products: Vec::new(),
            retry_count: 0,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Products from the last successful fetch.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Failed retries since the last success.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Initial fetch when the listing is first shown.
    pub async fn load(&mut self, store: &mut Store) -> &LoadState {
        self.fetch(store, false).await
    }

    /// Retry after the backoff delay for the current retry count.
    pub async fn refetch(&mut self, store: &mut Store) -> &LoadState {
        match self.policy.delay_for(self.retry_count) {
            Some(delay) => {
                info!(
                    retry = self.retry_count + 1,
                    delay_ms = delay.as_millis() as u64,
                    "retrying product fetch"
                );
                tokio::time::sleep(delay).await;
            }
            None => info!(retry = self.retry_count + 1, "retrying product fetch now"),
        }
        self.fetch(store, true).await
    }

    async fn fetch(&mut self, store: &mut Store, is_retry: bool) -> &LoadState {
        store.dispatch(ProductsAction::SetError(None));
        store.dispatch(ProductsAction::SetLoading(true));
        self.state = LoadState::Loading;

        match self.source.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "products loaded");
                self.products = products.clone();
                self.retry_count = 0;
                self.state = LoadState::Success;
                store.dispatch(ProductsAction::SetProducts(products));
            }
            Err(e) => {
                let message = e.user_message();
                warn!(error = %e, is_retry, retry_count = self.retry_count, "product fetch failed");
                if is_retry {
                    self.retry_count += 1;
                }
                self.state = LoadState::Failure(message.clone());
                store.dispatch(ProductsAction::SetError(Some(message)));
            }
        }

        store.dispatch(ProductsAction::SetLoading(false));
        &self.state
    }
}
