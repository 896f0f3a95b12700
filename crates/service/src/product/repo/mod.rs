pub mod seaorm;
pub mod file;
pub mod memory;

pub use file::JsonFileProductRepository;
pub use memory::InMemoryProductRepository;
pub use seaorm::SeaOrmProductRepository;
