//! Management-staff registration. A staff member belongs to one hostel and
//! carries a typed role; the hostel link is verified on insert.

use hostel_management_database::models::{EntityKind, Gender, Hostel};
use hostel_management_database::{Document, Id, RecordStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::DirectoryError;
use crate::roles::StaffRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub fname: String,
    pub lname: String,
    pub gender: Gender,
    pub phone: u64,
    pub email: String,
    pub address: String,
    pub hostel_id: Id<Hostel>,
    pub role: StaffRole,
}

impl Document for Staff {
    const COLLECTION: &'static str = "management_staff";
}

pub async fn add_staff<S: RecordStore>(store: &S, staff: Staff) -> Result<Id<Staff>, DirectoryError> {
    if store.get(&staff.hostel_id).await?.is_none() {
        return Err(DirectoryError::NotFound(EntityKind::Hostel));
    }
    let role = staff.role;
    let id = store.insert(&staff).await?;
    info!(staff = %id, role = ?role, hostel = %staff.hostel_id, "staff registered");
    Ok(id)
}

pub async fn staff_by_hostel<S: RecordStore>(
    store: &S,
    hostel_id: &Id<Hostel>,
) -> Result<Vec<(Id<Staff>, Staff)>, DirectoryError> {
    Ok(store.scan("hostel_id", &json!(hostel_id)).await?)
}
