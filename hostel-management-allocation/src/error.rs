use hostel_management_database::models::{EntityKind, Gender, GenderPolicy, Room};
use hostel_management_database::{Id, StoreError};
use thiserror::Error;

/// Why an assignment was refused. Every variant is terminal for the single
/// operation; the caller surfaces the message and decides whether to try a
/// different room.
#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum AssignmentError {
    /// A referenced room, block or hostel (or the student being transferred)
    /// could not be located: a stale id from the caller or a broken link in
    /// the hierarchy.
    #[error("{0} not found")]
    NotFound(EntityKind),
    /// The hostel's stored gender policy is neither "boys" nor "girls".
    /// Data corruption or a migration gap, not a user mistake.
    #[error("hostel has unrecognized gender policy {value:?}")]
    InvalidPolicy { value: String },
    #[error("{hostel_type} hostel students must be {expected}, but student is {supplied}")]
    GenderMismatch {
        hostel_type: GenderPolicy,
        expected: Gender,
        supplied: Gender,
    },
    #[error("room {room_id} is already at full capacity {capacity}")]
    RoomFull { room_id: Id<Room>, capacity: u32 },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
