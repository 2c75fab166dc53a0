//! PostgreSQL adapters
//!
//! Implementations of repository traits and the transactor using SeaORM and PostgreSQL.

pub mod dish_repo;
pub mod order_repo;
pub mod promotion_repo;
pub mod schema;
pub mod transactor;


pub use dish_repo::PostgresDishRepository;
pub use order_repo::PostgresOrderRepository;
pub use promotion_repo::PostgresPromotionRepository;
pub use schema::ensure_schema;
pub use transactor::PostgresTransactor;
