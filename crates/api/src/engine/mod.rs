//! Content engine: the generic CRUD service every entity endpoint runs
//! through, best-effort audit logging, and the CSV win importer.

pub mod audit;
pub mod crud;
pub mod import;

pub use audit::AuditLogger;
pub use crud::CrudService;
