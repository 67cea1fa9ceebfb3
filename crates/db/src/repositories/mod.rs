//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod mission_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod session_repo;
pub mod structure_repo;
pub mod user_repo;

pub use mission_repo::MissionRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use structure_repo::StructureRepo;
pub use user_repo::UserRepo;
