pub mod credential;
pub mod grant;

pub use credential::PostgresCredentialStore;
pub use grant::PostgresGrantStore;
