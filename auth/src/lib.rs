//! Authentication primitives library
//!
//! Provides the building blocks the access service composes:
//! - Login input validation (email shape, non-empty fields)
//! - Password hashing and matching (Argon2id)
//! - Signed token issue and verification (HS256 compact tokens)
//! - Authentication coordination (password match + token signing)
//!
//! Stores and request handling live in the service; nothing here performs IO.
//!
//! # Examples
//!
//! ## Credential Validation
//! ```
//! use auth::{CredentialValidator, ValidationError};
//!
//! let validator = CredentialValidator::new();
//! assert!(validator.validate("a@x.com", "secret").is_ok());
//! assert_eq!(
//!     validator.validate("not-an-email", "secret"),
//!     Err(ValidationError::InvalidEmailFormat)
//! );
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.matches("my_password", &hash));
//! assert!(!hasher.matches("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningKey, TokenCodec};
//! use chrono::Utc;
//!
//! let codec = TokenCodec::with_default_ttl(&SigningKey::from_secret("secret_key_at_least_32_bytes_long!"));
//! let now = Utc::now();
//! let token = codec.sign(42, now).unwrap();
//! assert_eq!(codec.verify(token.as_str(), now), Ok(42));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, Candidate, SigningKey, TokenCodec};
//! use chrono::Utc;
//!
//! let codec = Arc::new(TokenCodec::with_default_ttl(&SigningKey::from_secret("secret_key_at_least_32_bytes_long!")));
//! let auth = Authenticator::new(codec).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and sign a token for the stored subject
//! let now = Utc::now();
//! let account = Candidate { subject_id: 7, password_hash: &hash, active: true };
//! let token = auth.authenticate("password123", Some(account), now).unwrap();
//!
//! // No account: same rejection, same verification cost
//! assert!(auth.authenticate("password123", None, now).is_err());
//!
//! // Validate token
//! assert_eq!(auth.verify_token(token.as_str(), now), Ok(7));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod validation;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::Candidate;
pub use jwt::SigningKey;
pub use jwt::Token;
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use validation::CredentialValidator;
pub use validation::ValidationError;
