//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the HTTP layer.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Teacher, TeacherDraft, TeacherId, TeacherQuery},
};

/// Repository for Teacher operations.
///
/// Each method runs its statement(s) on a connection checked out for that
/// call only; nothing is held between calls.
pub trait TeacherRepository: Send + Sync {
    /// List teachers, optionally filtered by an inclusive hire-date range.
    fn list(&self, query: &TeacherQuery) -> impl Future<Output = DbResult<Vec<Teacher>>> + Send;

    /// Get a teacher by ID together with its course names.
    fn get(&self, id: TeacherId) -> impl Future<Output = DbResult<Teacher>> + Send;

    /// Get the names of the courses taught by a teacher.
    fn courses(&self, id: TeacherId) -> impl Future<Output = DbResult<Vec<String>>> + Send;

    /// Validate and insert a new teacher. The draft's `id` is ignored.
    fn create(&self, draft: &TeacherDraft) -> impl Future<Output = DbResult<Teacher>> + Send;

    /// Overwrite every column of an existing teacher.
    ///
    /// The draft's `id` must equal `id`.
    fn update(
        &self,
        id: TeacherId,
        draft: &TeacherDraft,
    ) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a teacher by ID.
    fn delete(&self, id: TeacherId) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Teachers: TeacherRepository;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the teacher repository.
    fn teachers(&self) -> Self::Teachers;
}
