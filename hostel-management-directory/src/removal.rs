//! Deletion with explicit referential-integrity checks. The store has no
//! cascade rules, so every delete first scans for children and refuses while
//! any remain. Check and delete are separate store calls; a child created in
//! between survives as a dangling reference, the same read-then-decide window
//! the assignment path has.

use hostel_management_database::models::{Block, EntityKind, Hostel, Room, Student};
use hostel_management_database::{Id, RecordStore, StoreError};
use serde_json::json;
use tracing::info;

use crate::error::DirectoryError;
use crate::staff::Staff;

pub async fn delete_hostel<S: RecordStore>(
    store: &S,
    id: &Id<Hostel>,
) -> Result<(), DirectoryError> {
    let blocks = store.scan::<Block>("hostel_id", &json!(id)).await?;
    if !blocks.is_empty() {
        return Err(DirectoryError::StillReferenced {
            entity: EntityKind::Hostel,
            referenced_by: EntityKind::Block,
            count: blocks.len(),
        });
    }
    let staff = store.scan::<Staff>("hostel_id", &json!(id)).await?;
    if !staff.is_empty() {
        return Err(DirectoryError::StillReferenced {
            entity: EntityKind::Hostel,
            referenced_by: EntityKind::Staff,
            count: staff.len(),
        });
    }
    delete_or_not_found(store, id, EntityKind::Hostel).await?;
    info!(hostel = %id, "hostel deleted");
    Ok(())
}

pub async fn delete_block<S: RecordStore>(store: &S, id: &Id<Block>) -> Result<(), DirectoryError> {
    let rooms = store.scan::<Room>("block_id", &json!(id)).await?;
    if !rooms.is_empty() {
        return Err(DirectoryError::StillReferenced {
            entity: EntityKind::Block,
            referenced_by: EntityKind::Room,
            count: rooms.len(),
        });
    }
    delete_or_not_found(store, id, EntityKind::Block).await?;
    info!(block = %id, "block deleted");
    Ok(())
}

pub async fn delete_room<S: RecordStore>(store: &S, id: &Id<Room>) -> Result<(), DirectoryError> {
    let students = store.scan::<Student>("room_id", &json!(id)).await?;
    if !students.is_empty() {
        return Err(DirectoryError::StillReferenced {
            entity: EntityKind::Room,
            referenced_by: EntityKind::Student,
            count: students.len(),
        });
    }
    delete_or_not_found(store, id, EntityKind::Room).await?;
    info!(room = %id, "room deleted");
    Ok(())
}

async fn delete_or_not_found<S: RecordStore, D: hostel_management_database::Document>(
    store: &S,
    id: &Id<D>,
    kind: EntityKind,
) -> Result<(), DirectoryError> {
    match store.delete(id).await {
        Ok(()) => Ok(()),
        Err(StoreError::Missing { .. }) => Err(DirectoryError::NotFound(kind)),
        Err(other) => Err(DirectoryError::Store(other)),
    }
}

#[cfg(test)]
mod tests {
    use hostel_management_database::models::{EntityKind, GenderPolicy};
    use hostel_management_database::{Id, MemoryStore};

    use super::{delete_block, delete_hostel, delete_room};
    use crate::error::DirectoryError;
    use crate::onboarding::{create_block, create_hostel, create_room};

    #[tokio::test]
    async fn hostel_with_blocks_refuses_deletion() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, "North Wing", GenderPolicy::Boys)
            .await
            .unwrap();
        let block = create_block(&store, "A", &hostel).await.unwrap();

        let refused = delete_hostel(&store, &hostel).await;
        assert!(matches!(
            refused,
            Err(DirectoryError::StillReferenced {
                entity: EntityKind::Hostel,
                referenced_by: EntityKind::Block,
                count: 1,
            })
        ));

        delete_block(&store, &block).await.unwrap();
        delete_hostel(&store, &hostel).await.unwrap();
    }

    #[tokio::test]
    async fn block_with_rooms_refuses_deletion() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, "North Wing", GenderPolicy::Boys)
            .await
            .unwrap();
        let block = create_block(&store, "A", &hostel).await.unwrap();
        let room = create_room(&store, "101", 2, &block).await.unwrap();

        assert!(matches!(
            delete_block(&store, &block).await,
            Err(DirectoryError::StillReferenced { .. })
        ));

        delete_room(&store, &room).await.unwrap();
        delete_block(&store, &block).await.unwrap();
    }

    #[tokio::test]
    async fn occupied_room_refuses_deletion() {
        use hostel_management_database::models::{Gender, Student};
        use hostel_management_database::RecordStore;

        let store = MemoryStore::new();
        let hostel = create_hostel(&store, "North Wing", GenderPolicy::Boys)
            .await
            .unwrap();
        let block = create_block(&store, "A", &hostel).await.unwrap();
        let room = create_room(&store, "101", 2, &block).await.unwrap();
        store
            .insert(&Student {
                fname: "Ravi".to_owned(),
                lname: "Menon".to_owned(),
                date_of_birth: "2004-01-15".to_owned(),
                gender: Gender::Male,
                dept_name: "CSE".to_owned(),
                year_of_study: "2".to_owned(),
                phone: 9_000_000_001,
                email: "ravi@example.edu".to_owned(),
                address: "Hosur".to_owned(),
                room_id: room.clone(),
                credential_id: Id::new("cred"),
            })
            .await
            .unwrap();

        assert!(matches!(
            delete_room(&store, &room).await,
            Err(DirectoryError::StillReferenced {
                entity: EntityKind::Room,
                referenced_by: EntityKind::Student,
                count: 1,
            })
        ));
    }

    #[tokio::test]
    async fn deleting_a_missing_room_reports_not_found() {
        let store = MemoryStore::new();
        let result = delete_room(&store, &Id::new("gone")).await;
        assert!(matches!(
            result,
            Err(DirectoryError::NotFound(EntityKind::Room))
        ));
    }
}
