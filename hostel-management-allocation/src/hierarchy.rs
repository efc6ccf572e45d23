//! Room → Block → Hostel resolution. No caching: every call re-reads current
//! state so the decision that follows is made against the freshest data the
//! store can give (read-then-decide, not transactional).

use hostel_management_database::models::{Block, EntityKind, Hostel, Room};
use hostel_management_database::{Id, RecordStore};

use crate::error::AssignmentError;

/// The resolved chain above one room.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    pub room_id: Id<Room>,
    pub room: Room,
    pub block_id: Id<Block>,
    pub block: Block,
    pub hostel_id: Id<Hostel>,
    pub hostel: Hostel,
}

/// Walk up from a room to its hostel. A missing link anywhere reports the
/// entity that was absent, which distinguishes a stale room id from a broken
/// block or hostel reference.
pub async fn resolve<S: RecordStore>(
    store: &S,
    room_id: &Id<Room>,
) -> Result<Hierarchy, AssignmentError> {
    let room = store
        .get(room_id)
        .await?
        .ok_or(AssignmentError::NotFound(EntityKind::Room))?;
    let block = store
        .get(&room.block_id)
        .await?
        .ok_or(AssignmentError::NotFound(EntityKind::Block))?;
    let hostel = store
        .get(&block.hostel_id)
        .await?
        .ok_or(AssignmentError::NotFound(EntityKind::Hostel))?;
    Ok(Hierarchy {
        room_id: room_id.clone(),
        block_id: room.block_id.clone(),
        hostel_id: block.hostel_id.clone(),
        room,
        block,
        hostel,
    })
}

#[cfg(test)]
mod tests {
    use hostel_management_database::models::{Block, EntityKind, Hostel, Room};
    use hostel_management_database::{Id, MemoryStore, RecordStore};

    use super::resolve;
    use crate::error::AssignmentError;

    async fn seeded_room(store: &MemoryStore) -> Id<Room> {
        let hostel = store
            .insert(&Hostel {
                hostel_name: "North Wing".to_owned(),
                hostel_type: "boys".to_owned(),
            })
            .await
            .unwrap();
        let block = store
            .insert(&Block {
                block_name: "A".to_owned(),
                hostel_id: hostel,
            })
            .await
            .unwrap();
        store
            .insert(&Room {
                room_no: "101".to_owned(),
                capacity: 2,
                block_id: block,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn resolves_the_full_chain() {
        let store = MemoryStore::new();
        let room_id = seeded_room(&store).await;
        let chain = resolve(&store, &room_id).await.unwrap();
        assert_eq!(chain.room.room_no, "101");
        assert_eq!(chain.block.block_name, "A");
        assert_eq!(chain.hostel.hostel_type, "boys");
    }

    #[tokio::test]
    async fn resolution_is_idempotent_over_unchanged_data() {
        let store = MemoryStore::new();
        let room_id = seeded_room(&store).await;
        let first = resolve(&store, &room_id).await.unwrap();
        let second = resolve(&store, &room_id).await.unwrap();
        assert_eq!(first.room_id, second.room_id);
        assert_eq!(first.block_id, second.block_id);
        assert_eq!(first.hostel_id, second.hostel_id);
        assert_eq!(first.room.room_no, second.room.room_no);
        assert_eq!(first.hostel.hostel_type, second.hostel.hostel_type);
    }

    #[tokio::test]
    async fn unknown_room_reports_room_not_found() {
        let store = MemoryStore::new();
        let result = resolve(&store, &Id::new("missing")).await;
        assert!(matches!(
            result,
            Err(AssignmentError::NotFound(EntityKind::Room))
        ));
    }

    #[tokio::test]
    async fn dangling_block_reference_reports_block_not_found() {
        let store = MemoryStore::new();
        let room_id = store
            .insert(&Room {
                room_no: "101".to_owned(),
                capacity: 2,
                block_id: Id::new("deleted-block"),
            })
            .await
            .unwrap();
        let result = resolve(&store, &room_id).await;
        assert!(matches!(
            result,
            Err(AssignmentError::NotFound(EntityKind::Block))
        ));
    }
}
