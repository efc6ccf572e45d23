use std::env::VarError;

use diesel_async::pooled_connection::deadpool;
use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database url not set in env variable DATABASE_URL")]
    DatabaseEnvUrl(#[from] VarError),
    #[error("Failed to create database pool {0}")]
    PoolBuild(#[from] deadpool::BuildError),
    #[error("Database pool failed {0}")]
    Pool(#[from] deadpool::PoolError),
    #[error("Database query failed {0}")]
    Database(#[from] diesel::result::Error),
    #[error("No {collection} document with id {id}")]
    Missing { collection: &'static str, id: String },
    #[error("Stored {collection} document {id} failed to decode: {source}")]
    Corrupt {
        collection: &'static str,
        id: String,
        source: serde_json::Error,
    },
    #[error("Document failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Document or patch payload is not a JSON object")]
    NotAnObject,
    #[error("Store lock poisoned")]
    Poisoned,
}
