use std::sync::Arc;

use service::{ProductRepository, ProductService};

/// Shared handler state: one product service over one record store.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService<dyn ProductRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: Arc::new(ProductService::new(repo)) }
    }
}
