//! Account persistence - Diesel models and repository.

pub mod model;
pub mod repository;

pub use model::{AccountDB, NewAccountRow, ProfileDB};
pub use repository::AccountRepository;
