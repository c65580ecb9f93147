pub mod import;
pub mod refurbishment;
