use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;
use super::key::SigningKey;
use super::token::Token;

/// Signs and verifies access tokens.
///
/// Uses HS256 (HMAC with SHA-256). Time bounds are checked against the
/// caller's clock instead of the system clock, so `verify` is a pure function
/// of the token string and `now`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub const DEFAULT_TTL_SECONDS: i64 = 300;

    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a codec with an explicit token lifetime.
    ///
    /// # Arguments
    /// * `key` - Process-wide signing key
    /// * `ttl` - Validity window of issued tokens
    pub fn new(key: &SigningKey, ttl: Duration) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        // exp/iat are checked against the caller-supplied instant in `decode`
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Create a codec issuing five-minute tokens.
    pub fn with_default_ttl(key: &SigningKey) -> Self {
        Self::new(key, Duration::seconds(Self::DEFAULT_TTL_SECONDS))
    }

    /// Sign a token for `subject_id`, valid from `now` until `now + ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn sign(&self, subject_id: i64, now: DateTime<Utc>) -> Result<Token, TokenError> {
        let issued_at = now.trunc_subsecs(0);
        let claims = TokenClaims::new(subject_id, issued_at, self.ttl);

        let encoded = encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let signature = encoded.rsplit('.').next().unwrap_or_default();
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(Token {
            encoded,
            subject_id,
            issued_at,
            expires_at: issued_at + self.ttl,
            signature,
        })
    }

    /// Verify a token string and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Not three non-empty base64url segments, or undecodable content
    /// * `SignatureMismatch` - HMAC over header and payload differs from the signature
    /// * `Expired` - `now` is past the expiration time
    /// * `NotYetValid` - `now` is before the issue time
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<i64, TokenError> {
        self.decode(token, now).map(|claims| claims.user_id)
    }

    /// Verify a token string and return its full claims.
    ///
    /// Same checks and errors as [`TokenCodec::verify`].
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        if !has_compact_shape(token) {
            return Err(TokenError::Malformed);
        }

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureMismatch
                }
                _ => TokenError::Malformed,
            })?;

        let now = now.timestamp();
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }
        if claims.is_premature(now) {
            return Err(TokenError::NotYetValid);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Self::ALGORITHM)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Exactly three dot-separated, non-empty, unpadded base64url segments.
fn has_compact_shape(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();

    segments.len() == 3
        && segments
            .iter()
            .all(|segment| !segment.is_empty() && URL_SAFE_NO_PAD.decode(segment).is_ok())
}
