pub mod claims;
pub mod codec;
pub mod errors;
pub mod key;
pub mod token;

pub use claims::TokenClaims;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use key::SigningKey;
pub use token::Token;
