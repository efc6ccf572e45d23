//! Admin onboarding of the hostel hierarchy. Parent links are verified at
//! creation time so a freshly created block or room never starts out with a
//! dangling reference.

use hostel_management_database::models::{Block, EntityKind, GenderPolicy, Hostel, Room};
use hostel_management_database::{Id, RecordStore};
use serde_json::json;
use tracing::info;

use crate::error::DirectoryError;

pub async fn create_hostel<S: RecordStore>(
    store: &S,
    hostel_name: &str,
    policy: GenderPolicy,
) -> Result<Id<Hostel>, DirectoryError> {
    let id = store
        .insert(&Hostel {
            hostel_name: hostel_name.to_owned(),
            hostel_type: policy.as_str().to_owned(),
        })
        .await?;
    info!(hostel = %id, name = hostel_name, policy = %policy, "hostel created");
    Ok(id)
}

/// Rewrite a hostel's name and policy in place. Flipping the policy does not
/// re-validate students already living under the old one: existing residents
/// keep their rooms, and only assignments made after the change are checked
/// against the new policy.
pub async fn update_hostel<S: RecordStore>(
    store: &S,
    id: &Id<Hostel>,
    hostel_name: &str,
    policy: GenderPolicy,
) -> Result<(), DirectoryError> {
    if store.get(id).await?.is_none() {
        return Err(DirectoryError::NotFound(EntityKind::Hostel));
    }
    store
        .patch(
            id,
            json!({ "hostel_name": hostel_name, "hostel_type": policy.as_str() }),
        )
        .await?;
    Ok(())
}

pub async fn create_block<S: RecordStore>(
    store: &S,
    block_name: &str,
    hostel_id: &Id<Hostel>,
) -> Result<Id<Block>, DirectoryError> {
    if store.get(hostel_id).await?.is_none() {
        return Err(DirectoryError::NotFound(EntityKind::Hostel));
    }
    let id = store
        .insert(&Block {
            block_name: block_name.to_owned(),
            hostel_id: hostel_id.clone(),
        })
        .await?;
    info!(block = %id, name = block_name, hostel = %hostel_id, "block created");
    Ok(id)
}

pub async fn create_room<S: RecordStore>(
    store: &S,
    room_no: &str,
    capacity: u32,
    block_id: &Id<Block>,
) -> Result<Id<Room>, DirectoryError> {
    if capacity == 0 {
        return Err(DirectoryError::InvalidCapacity);
    }
    if store.get(block_id).await?.is_none() {
        return Err(DirectoryError::NotFound(EntityKind::Block));
    }
    let id = store
        .insert(&Room {
            room_no: room_no.to_owned(),
            capacity,
            block_id: block_id.clone(),
        })
        .await?;
    info!(room = %id, room_no, capacity, block = %block_id, "room created");
    Ok(id)
}

pub async fn hostels<S: RecordStore>(
    store: &S,
) -> Result<Vec<(Id<Hostel>, Hostel)>, DirectoryError> {
    Ok(store.list().await?)
}

pub async fn blocks_by_hostel<S: RecordStore>(
    store: &S,
    hostel_id: &Id<Hostel>,
) -> Result<Vec<(Id<Block>, Block)>, DirectoryError> {
    Ok(store.scan("hostel_id", &json!(hostel_id)).await?)
}

pub async fn rooms_by_block<S: RecordStore>(
    store: &S,
    block_id: &Id<Block>,
) -> Result<Vec<(Id<Room>, Room)>, DirectoryError> {
    Ok(store.scan("block_id", &json!(block_id)).await?)
}
