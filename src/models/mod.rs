pub mod organization;
pub mod user;
