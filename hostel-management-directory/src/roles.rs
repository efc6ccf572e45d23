//! Management-staff roles as a closed enumeration with a typed permission
//! set. Role names are never matched as free-form strings; adding a role
//! forces every permission decision to be revisited by the compiler.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Warden,
    AssistantWarden,
    Caretaker,
    Security,
    Maintenance,
}

/// Actions a staff member may be allowed to take on hostel records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageStudents,
    ManageRooms,
    ResolveComplaints,
    PostAnnouncements,
    ViewResidents,
}

impl StaffRole {
    #[must_use]
    pub const fn permits(self, permission: Permission) -> bool {
        match self {
            Self::Warden => true,
            Self::AssistantWarden => !matches!(permission, Permission::ManageRooms),
            Self::Caretaker => matches!(
                permission,
                Permission::ResolveComplaints | Permission::ViewResidents
            ),
            Self::Security => matches!(permission, Permission::ViewResidents),
            Self::Maintenance => matches!(permission, Permission::ResolveComplaints),
        }
    }
}
