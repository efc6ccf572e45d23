//! In-memory store with the same semantics as the Postgres store. Backs every
//! test in the workspace and doubles as an embedded store for tooling.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::store::{decode, encode, new_document_id, Document, Id, RecordStore};

type Documents = BTreeMap<(&'static str, String), serde_json::Value>;

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Documents>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Documents>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl RecordStore for MemoryStore {
    async fn get<D: Document>(&self, id: &Id<D>) -> Result<Option<D>, StoreError> {
        let data = {
            let documents = self.lock()?;
            documents.get(&(D::COLLECTION, id.as_str().to_owned())).cloned()
        };
        data.map(|data| decode::<D>(id.as_str(), data)).transpose()
    }

    async fn insert<D: Document>(&self, document: &D) -> Result<Id<D>, StoreError> {
        let data = encode(document)?;
        let id = new_document_id();
        self.lock()?.insert((D::COLLECTION, id.clone()), data);
        Ok(Id::new(id))
    }

    async fn patch<D: Document>(
        &self,
        id: &Id<D>,
        fields: serde_json::Value,
    ) -> Result<(), StoreError> {
        let serde_json::Value::Object(fields) = fields else {
            return Err(StoreError::NotAnObject);
        };
        let mut documents = self.lock()?;
        let Some(data) = documents.get_mut(&(D::COLLECTION, id.as_str().to_owned())) else {
            return Err(StoreError::Missing {
                collection: D::COLLECTION,
                id: id.as_str().to_owned(),
            });
        };
        if let serde_json::Value::Object(existing) = data {
            for (key, value) in fields {
                existing.insert(key, value);
            }
            Ok(())
        } else {
            Err(StoreError::NotAnObject)
        }
    }

    async fn delete<D: Document>(&self, id: &Id<D>) -> Result<(), StoreError> {
        let removed = self
            .lock()?
            .remove(&(D::COLLECTION, id.as_str().to_owned()));
        if removed.is_none() {
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
        let snapshot: Vec<(String, serde_json::Value)> = {
            let documents = self.lock()?;
            documents
                .iter()
                .filter(|((collection, _), _)| *collection == D::COLLECTION)
                .filter(|(_, data)| data.get(field) == Some(value))
                .map(|((_, id), data)| (id.clone(), data.clone()))
                .collect()
        };
        snapshot
            .into_iter()
            .map(|(id, data)| decode::<D>(&id, data).map(|document| (Id::new(id), document)))
            .collect()
    }

    async fn list<D: Document>(&self) -> Result<Vec<(Id<D>, D)>, StoreError> {
        let snapshot: Vec<(String, serde_json::Value)> = {
            let documents = self.lock()?;
            documents
                .iter()
                .filter(|((collection, _), _)| *collection == D::COLLECTION)
                .map(|((_, id), data)| (id.clone(), data.clone()))
                .collect()
        };
        snapshot
            .into_iter()
            .map(|(id, data)| decode::<D>(&id, data).map(|document| (Id::new(id), document)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::MemoryStore;
    use crate::models::{Block, Hostel, Room};
    use crate::store::{Id, RecordStore};
    use crate::StoreError;

    #[tokio::test]
    async fn get_returns_what_insert_stored() {
        let store = MemoryStore::new();
        let id = store
            .insert(&Hostel {
                hostel_name: "North Wing".to_owned(),
                hostel_type: "boys".to_owned(),
            })
            .await
            .unwrap();
        let hostel = store.get(&id).await.unwrap().unwrap();
        assert_eq!(hostel.hostel_name, "North Wing");
        assert_eq!(hostel.hostel_type, "boys");
    }

    #[tokio::test]
    async fn get_of_unknown_id_is_none() {
        let store = MemoryStore::new();
        let missing: Option<Hostel> = store.get(&Id::new("nope")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn patch_merges_only_named_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert(&Hostel {
                hostel_name: "North Wing".to_owned(),
                hostel_type: "boys".to_owned(),
            })
            .await
            .unwrap();
        store
            .patch(&id, json!({ "hostel_name": "South Wing" }))
            .await
            .unwrap();
        let hostel = store.get(&id).await.unwrap().unwrap();
        assert_eq!(hostel.hostel_name, "South Wing");
        assert_eq!(hostel.hostel_type, "boys");
    }

    #[tokio::test]
    async fn patch_of_missing_document_errors() {
        let store = MemoryStore::new();
        let result = store
            .patch::<Hostel>(&Id::new("gone"), json!({ "hostel_name": "x" }))
            .await;
        assert!(matches!(result, Err(StoreError::Missing { .. })));
    }

    #[tokio::test]
    async fn patch_rejects_non_object_payload() {
        let store = MemoryStore::new();
        let id = store
            .insert(&Hostel {
                hostel_name: "North Wing".to_owned(),
                hostel_type: "boys".to_owned(),
            })
            .await
            .unwrap();
        let result = store.patch(&id, json!("not an object")).await;
        assert!(matches!(result, Err(StoreError::NotAnObject)));
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_errors() {
        let store = MemoryStore::new();
        let id = store
            .insert(&Hostel {
                hostel_name: "North Wing".to_owned(),
                hostel_type: "girls".to_owned(),
            })
            .await
            .unwrap();
        store.delete(&id).await.unwrap();
        assert!(store.get::<Hostel>(&id).await.unwrap().is_none());
        assert!(matches!(
            store.delete::<Hostel>(&id).await,
            Err(StoreError::Missing { .. })
        ));
    }

    #[tokio::test]
    async fn scan_filters_by_field_equality_within_one_collection() {
        let store = MemoryStore::new();
        let hostel = store
            .insert(&Hostel {
                hostel_name: "North Wing".to_owned(),
                hostel_type: "boys".to_owned(),
            })
            .await
            .unwrap();
        let block_a = store
            .insert(&Block {
                block_name: "A".to_owned(),
                hostel_id: hostel.clone(),
            })
            .await
            .unwrap();
        let block_b = store
            .insert(&Block {
                block_name: "B".to_owned(),
                hostel_id: hostel.clone(),
            })
            .await
            .unwrap();
        for (block, room_no) in [(&block_a, "101"), (&block_a, "102"), (&block_b, "201")] {
            store
                .insert(&Room {
                    room_no: room_no.to_owned(),
                    capacity: 2,
                    block_id: block.clone(),
                })
                .await
                .unwrap();
        }

        let rooms = store
            .scan::<Room>("block_id", &json!(block_a))
            .await
            .unwrap();
        assert_eq!(rooms.len(), 2);
        assert!(rooms.iter().all(|(_, room)| room.block_id == block_a));

        // Same field name in another collection does not leak across.
        let blocks = store
            .scan::<Block>("hostel_id", &json!(hostel))
            .await
            .unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[tokio::test]
    async fn list_returns_the_whole_collection() {
        let store = MemoryStore::new();
        let north = store
            .insert(&Hostel {
                hostel_name: "North Wing".to_owned(),
                hostel_type: "boys".to_owned(),
            })
            .await
            .unwrap();
        let south = store
            .insert(&Hostel {
                hostel_name: "South Wing".to_owned(),
                hostel_type: "girls".to_owned(),
            })
            .await
            .unwrap();
        store
            .insert(&Block {
                block_name: "A".to_owned(),
                hostel_id: north.clone(),
            })
            .await
            .unwrap();

        let hostels = store.list::<Hostel>().await.unwrap();
        assert_eq!(hostels.len(), 2);
        assert!(hostels.iter().any(|(id, _)| *id == north));
        assert!(hostels.iter().any(|(id, _)| *id == south));
    }
}
