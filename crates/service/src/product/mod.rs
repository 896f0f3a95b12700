//! Product module: repository abstraction, record store backends and the
//! service enforcing validation and existence rules.

pub mod repository;
pub mod repo;
pub mod service;

pub use repository::ProductRepository;
pub use service::ProductService;
