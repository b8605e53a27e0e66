//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod tour_repo;
pub mod tour_step_repo;
pub mod user_repo;

pub use tour_repo::TourRepo;
pub use tour_step_repo::TourStepRepo;
pub use user_repo::UserRepo;
