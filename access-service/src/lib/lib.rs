pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::access;
pub use domain::credential;
pub use domain::permission;
pub use outbound::repositories;
