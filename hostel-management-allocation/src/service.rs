//! The assignment invariant service: validation composed with the write it
//! guards. Validation and write are logically one operation; the write never
//! happens when validation fails, and nothing else is written either, so a
//! refused call leaves the store untouched.

use hostel_management_database::models::{
    Credential, EntityKind, Gender, GenderPolicy, Room, Student,
};
use hostel_management_database::{Id, RecordStore, StoreError};
use serde_json::json;
use tracing::{debug, info};

use crate::capacity::occupancy;
use crate::error::AssignmentError;
use crate::hierarchy::resolve;

/// Everything the caller supplies about a new student except the assignment
/// itself and the credential, which this service creates.
#[derive(Debug, Clone)]
pub struct StudentProfile {
    pub fname: String,
    pub lname: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub dept_name: String,
    pub year_of_study: String,
    pub phone: u64,
    pub email: String,
    pub address: String,
}

pub struct AssignmentService<S> {
    store: S,
}

impl<S: RecordStore> AssignmentService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide whether a student of `gender` may be assigned to `room_id`.
    /// Checks run in a fixed order: hierarchy resolution, policy parse,
    /// gender match, capacity. The first failure wins and is returned as-is.
    pub async fn validate_assignment(
        &self,
        gender: Gender,
        room_id: &Id<Room>,
        excluding: Option<&Id<Student>>,
    ) -> Result<(), AssignmentError> {
        let chain = resolve(&self.store, room_id).await?;
        let policy = GenderPolicy::parse(&chain.hostel.hostel_type).ok_or_else(|| {
            AssignmentError::InvalidPolicy {
                value: chain.hostel.hostel_type.clone(),
            }
        })?;
        let expected = policy.expected_gender();
        if gender != expected {
            return Err(AssignmentError::GenderMismatch {
                hostel_type: policy,
                expected,
                supplied: gender,
            });
        }
        let occupancy = occupancy(&self.store, room_id, &chain.room, excluding).await?;
        if !occupancy.has_room() {
            return Err(AssignmentError::RoomFull {
                room_id: room_id.clone(),
                capacity: occupancy.capacity,
            });
        }
        debug!(
            room = %room_id,
            occupied = occupancy.occupied,
            capacity = occupancy.capacity,
            "assignment validated"
        );
        Ok(())
    }

    /// Create a student assigned to `room_id`. Validation runs first; only on
    /// success are the credential and student records written. If the student
    /// insert fails after the credential landed, the credential is deleted
    /// again so a failed create leaves no record behind.
    pub async fn create_student(
        &self,
        profile: StudentProfile,
        room_id: &Id<Room>,
        password_hash: &str,
    ) -> Result<Id<Student>, AssignmentError> {
        self.validate_assignment(profile.gender, room_id, None)
            .await?;
        let credential_id = self
            .store
            .insert(&Credential {
                email: profile.email.clone(),
                password_hash: password_hash.to_owned(),
            })
            .await?;
        let student = Student {
            fname: profile.fname,
            lname: profile.lname,
            date_of_birth: profile.date_of_birth,
            gender: profile.gender,
            dept_name: profile.dept_name,
            year_of_study: profile.year_of_study,
            phone: profile.phone,
            email: profile.email,
            address: profile.address,
            room_id: room_id.clone(),
            credential_id: credential_id.clone(),
        };
        let student_id = match self.store.insert(&student).await {
            Ok(id) => id,
            Err(error) => {
                // The credential write is already durable; take it back out.
                // Its own failure is secondary to the one being reported.
                let _ = self.store.delete(&credential_id).await;
                return Err(error.into());
            }
        };
        info!(student = %student_id, room = %room_id, "student created and assigned");
        Ok(student_id)
    }

    /// Move an existing student to `new_room_id`, re-validating against the
    /// destination. The student is excluded from the destination count, so a
    /// transfer within the same room succeeds as a no-op write.
    pub async fn transfer_student(
        &self,
        student_id: &Id<Student>,
        new_room_id: &Id<Room>,
    ) -> Result<(), AssignmentError> {
        let student = self
            .store
            .get(student_id)
            .await?
            .ok_or(AssignmentError::NotFound(EntityKind::Student))?;
        self.validate_assignment(student.gender, new_room_id, Some(student_id))
            .await?;
        self.store
            .patch(student_id, json!({ "room_id": new_room_id }))
            .await?;
        info!(
            student = %student_id,
            from = %student.room_id,
            to = %new_room_id,
            "student transferred"
        );
        Ok(())
    }

    /// Terminal transition: remove the student and the credential record tied
    /// to them. A credential already gone is tolerated; the student record is
    /// authoritative.
    pub async fn remove_student(&self, student_id: &Id<Student>) -> Result<(), AssignmentError> {
        let student = self
            .store
            .get(student_id)
            .await?
            .ok_or(AssignmentError::NotFound(EntityKind::Student))?;
        self.store.delete(student_id).await?;
        match self.store.delete(&student.credential_id).await {
            Ok(()) | Err(StoreError::Missing { .. }) => {}
            Err(other) => return Err(AssignmentError::Store(other)),
        }
        info!(student = %student_id, "student removed");
        Ok(())
    }
}
