use hostel_management_database::models::EntityKind;
use hostel_management_database::StoreError;
use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{0} not found")]
    NotFound(EntityKind),
    #[error("room capacity must be at least 1")]
    InvalidCapacity,
    #[error("cannot delete {entity}: {count} {referenced_by}(s) still reference it")]
    StillReferenced {
        entity: EntityKind,
        referenced_by: EntityKind,
        count: usize,
    },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
