pub mod portfolio;
pub mod profile;
