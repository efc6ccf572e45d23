pub mod error;
pub mod memory;
pub mod models;
pub mod schema;
pub mod store;

use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{Document, Id, PgStore, RecordStore};

// https://github.com/tokio-rs/axum/tree/main/examples/diesel-async-postgres

pub fn get_database_connection(
    database_url: &str,
) -> Result<Pool<AsyncPgConnection>, StoreError> {
    let config = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(database_url);
    Ok(Pool::builder(config).build()?)
}

pub fn get_database_connection_from_env() -> Result<Pool<AsyncPgConnection>, StoreError> {
    let database_url = std::env::var("DATABASE_URL")?;
    get_database_connection(&database_url)
}
