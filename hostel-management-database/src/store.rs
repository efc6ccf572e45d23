//! The record-store abstraction the rest of the workspace is written against.
//!
//! A store holds JSON documents partitioned into named collections and offers
//! exactly four primitives: get by id, insert, patch (shallow field merge),
//! delete, plus an equality filter-scan over one collection. Every primitive
//! is atomic on its own; nothing here spans two primitives transactionally,
//! so callers that read then write are operating read-then-decide.

use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Jsonb;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StoreError;
use crate::models::DocumentRow;
use crate::schema::documents;

/// A value that lives in a named collection of the store.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
}

/// Typed handle to a stored document. Serializes as the bare id string, so an
/// `Id<Room>` held inside a `Student` document is stored as an ordinary JSON
/// string field.
pub struct Id<D> {
    raw: String,
    _collection: PhantomData<fn() -> D>,
}

impl<D> Id<D> {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            _collection: PhantomData,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

// Manual impls so `D` itself is not required to be Clone/Eq/etc.
impl<D> Clone for Id<D> {
    fn clone(&self) -> Self {
        Self::new(self.raw.clone())
    }
}

impl<D> PartialEq for Id<D> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<D> Eq for Id<D> {}

impl<D> Hash for Id<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<D> Debug for Id<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<D> Display for Id<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.raw, f)
    }
}

impl<D> Serialize for Id<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, D> Deserialize<'de> for Id<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// The four store primitives plus the equality scan.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Fetch one document, `None` if the id is stale or was never issued.
    async fn get<D: Document>(&self, id: &Id<D>) -> Result<Option<D>, StoreError>;

    /// Insert a new document under a store-generated id.
    async fn insert<D: Document>(&self, document: &D) -> Result<Id<D>, StoreError>;

    /// Shallow-merge the top-level fields of `fields` (a JSON object) into an
    /// existing document. One atomic write; `Missing` if the id is gone.
    async fn patch<D: Document>(
        &self,
        id: &Id<D>,
        fields: serde_json::Value,
    ) -> Result<(), StoreError>;

    /// Remove a document. `Missing` if the id is gone.
    async fn delete<D: Document>(&self, id: &Id<D>) -> Result<(), StoreError>;

    /// Scan a whole collection and keep the documents whose top-level `field`
    /// equals `value`. Deliberately a scan, not an index lookup: occupancy is
    /// recomputed from current rows on every call.
    async fn scan<D: Document>(
        &self,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<(Id<D>, D)>, StoreError>;

    /// Every document in a collection, unfiltered.
    async fn list<D: Document>(&self) -> Result<Vec<(Id<D>, D)>, StoreError>;
}

pub(crate) fn new_document_id() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

pub(crate) fn decode<D: Document>(id: &str, data: serde_json::Value) -> Result<D, StoreError> {
    serde_json::from_value(data).map_err(|source| StoreError::Corrupt {
        collection: D::COLLECTION,
        id: id.to_owned(),
        source,
    })
}

pub(crate) fn encode<D: Document>(document: &D) -> Result<serde_json::Value, StoreError> {
    let data = serde_json::to_value(document)?;
    if data.is_object() {
        Ok(data)
    } else {
        Err(StoreError::NotAnObject)
    }
}

/// Postgres-backed store: one `documents` table keyed by `(collection, id)`
/// with a `jsonb` payload. Each primitive is a single SQL statement, which is
/// exactly the per-operation atomicity the rest of the workspace assumes.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: Pool<AsyncPgConnection>) -> Self {
        Self { pool }
    }
}

impl RecordStore for PgStore {
    async fn get<D: Document>(&self, id: &Id<D>) -> Result<Option<D>, StoreError> {
        let mut connection = self.pool.get().await?;
        let row: Option<DocumentRow> = documents::table
            .find((D::COLLECTION, id.as_str()))
            .select(DocumentRow::as_select())
            .first(&mut connection)
            .await
            .optional()?;
        row.map(|row| decode::<D>(&row.id, row.data)).transpose()
    }

    async fn insert<D: Document>(&self, document: &D) -> Result<Id<D>, StoreError> {
        let data = encode(document)?;
        let id = new_document_id();
        let mut connection = self.pool.get().await?;
        diesel::insert_into(documents::table)
            .values(DocumentRow {
                collection: D::COLLECTION.to_owned(),
                id: id.clone(),
                data,
            })
            .execute(&mut connection)
            .await?;
        Ok(Id::new(id))
    }

    async fn patch<D: Document>(
        &self,
        id: &Id<D>,
        fields: serde_json::Value,
    ) -> Result<(), StoreError> {
        if !fields.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let mut connection = self.pool.get().await?;
        let updated = diesel::update(documents::table.find((D::COLLECTION, id.as_str())))
            .set(documents::data.eq(sql::<Jsonb>("data || ").bind::<Jsonb, _>(fields)))
            .execute(&mut connection)
            .await?;
        if updated == 0 {
            return Err(StoreError::Missing {
                collection: D::COLLECTION,
                id: id.as_str().to_owned(),
            });
        }
        Ok(())
    }

    async fn delete<D: Document>(&self, id: &Id<D>) -> Result<(), StoreError> {
        let mut connection = self.pool.get().await?;
        let deleted = diesel::delete(documents::table.find((D::COLLECTION, id.as_str())))
            .execute(&mut connection)
            .await?;
        if deleted == 0 {
            return Err(StoreError::Missing {
                collection: D::COLLECTION,
                id: id.as_str().to_owned(),
            });
        }
        Ok(())
    }

    async fn scan<D: Document>(
        &self,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<(Id<D>, D)>, StoreError> {
        let mut connection = self.pool.get().await?;
        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::collection.eq(D::COLLECTION))
            .select(DocumentRow::as_select())
            .load(&mut connection)
            .await?;
        let mut matches = Vec::new();
        for row in rows {
            if row.data.get(field) == Some(value) {
                let document = decode::<D>(&row.id, row.data)?;
                matches.push((Id::new(row.id), document));
            }
        }
        Ok(matches)
    }

    async fn list<D: Document>(&self) -> Result<Vec<(Id<D>, D)>, StoreError> {
        let mut connection = self.pool.get().await?;
        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::collection.eq(D::COLLECTION))
            .select(DocumentRow::as_select())
            .load(&mut connection)
            .await?;
        rows.into_iter()
            .map(|row| decode::<D>(&row.id, row.data).map(|document| (Id::new(row.id), document)))
            .collect()
    }
}
