use core::fmt::{self, Display};

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::documents;
use crate::store::{Document, Id};

/// Raw shape of one stored document row.
#[derive(Queryable, Selectable, Insertable)]
#[diesel(table_name = documents)]
pub struct DocumentRow {
    pub collection: String,
    pub id: String,
    pub data: serde_json::Value,
}

/// Resident gender as supplied at student creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
        })
    }
}

/// Hostel-level residency rule. Stored as free text on the hostel document
/// ("boys"/"girls"), parsed at the point of use so an unrecognized stored
/// value surfaces as a policy error instead of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderPolicy {
    Boys,
    Girls,
}

impl GenderPolicy {
    /// Case-insensitive parse of the stored `hostel_type` value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("boys") {
            Some(Self::Boys)
        } else if value.eq_ignore_ascii_case("girls") {
            Some(Self::Girls)
        } else {
            None
        }
    }

    /// Canonical stored form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boys => "boys",
            Self::Girls => "girls",
        }
    }

    #[must_use]
    pub const fn expected_gender(self) -> Gender {
        match self {
            Self::Boys => Gender::Male,
            Self::Girls => Gender::Female,
        }
    }
}

impl Display for GenderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boys => "Boys",
            Self::Girls => "Girls",
        })
    }
}

/// Names an entity in user-facing lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Hostel,
    Block,
    Room,
    Student,
    Staff,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hostel => "hostel",
            Self::Block => "block",
            Self::Room => "room",
            Self::Student => "student",
            Self::Staff => "staff",
        })
    }
}

/// Top-level housing unit with a fixed gender policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostel {
    pub hostel_name: String,
    pub hostel_type: String,
}

impl Document for Hostel {
    const COLLECTION: &'static str = "hostel";
}

/// Named subdivision of a hostel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub block_name: String,
    pub hostel_id: Id<Hostel>,
}

impl Document for Block {
    const COLLECTION: &'static str = "block";
}

/// Capacity-bounded unit within a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_no: String,
    pub capacity: u32,
    pub block_id: Id<Block>,
}

impl Document for Room {
    const COLLECTION: &'static str = "room";
}

/// Login credential tied to one student, removed together with the student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password_hash: String,
}

impl Document for Credential {
    const COLLECTION: &'static str = "credential";
}

/// A resident. `room_id` is the single current assignment; no history of past
/// assignments is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub fname: String,
    pub lname: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub dept_name: String,
    pub year_of_study: String,
    pub phone: u64,
    pub email: String,
    pub address: String,
    pub room_id: Id<Room>,
    pub credential_id: Id<Credential>,
}

impl Document for Student {
    const COLLECTION: &'static str = "student";
}
