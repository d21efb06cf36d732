pub mod farm_repo;
pub mod reading_repo;

pub use farm_repo::{FarmRepository, NewFarm, NewField};
pub use reading_repo::{ReadingRepository, SavedSnapshot};
