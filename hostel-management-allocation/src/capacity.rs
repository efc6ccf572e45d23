//! Occupancy measurement. Occupancy is recomputed by scanning student records
//! by `room_id` on every check; no denormalized counter is kept, so the count
//! is as current as the scan that produced it and no fresher.

use hostel_management_database::models::{Room, Student};
use hostel_management_database::{Id, RecordStore};
use serde_json::json;

use crate::error::AssignmentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub occupied: u32,
    pub capacity: u32,
}

impl Occupancy {
    #[must_use]
    pub const fn has_room(self) -> bool {
        self.occupied < self.capacity
    }
}

/// Count the students currently assigned to `room_id`. A transferring student
/// is excluded from the destination count, which is equivalent to releasing
/// their source slot before the destination is checked; a same-room transfer
/// therefore never fails against the student's own occupancy.
pub async fn occupancy<S: RecordStore>(
    store: &S,
    room_id: &Id<Room>,
    room: &Room,
    excluding: Option<&Id<Student>>,
) -> Result<Occupancy, AssignmentError> {
    let occupants = store.scan::<Student>("room_id", &json!(room_id)).await?;
    let occupied = occupants
        .iter()
        .filter(|(id, _)| Some(id) != excluding)
        .count();
    Ok(Occupancy {
        occupied: u32::try_from(occupied).unwrap_or(u32::MAX),
        capacity: room.capacity,
    })
}
