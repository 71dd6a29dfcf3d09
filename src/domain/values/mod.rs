pub mod distance;
pub mod portfolio;
pub mod search;
