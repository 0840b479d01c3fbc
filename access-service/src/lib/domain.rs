pub mod access;
pub mod credential;
pub mod errors;
pub mod lookup;
pub mod permission;
