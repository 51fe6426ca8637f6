//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads
//! accept `&PgPool`; writes made by the importer accept `&mut PgConnection`
//! so they can run inside an open transaction.

pub mod alert_repo;
pub mod dataset_repo;
pub mod frame_repo;
pub mod patient_repo;

pub use alert_repo::AlertRepo;
pub use dataset_repo::DatasetRepo;
pub use frame_repo::FrameRepo;
pub use patient_repo::PatientRepo;
