pub mod credentials;
pub mod errors;

pub use credentials::is_valid_email;
pub use credentials::CredentialValidator;
pub use errors::ValidationError;
