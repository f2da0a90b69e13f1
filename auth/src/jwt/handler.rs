use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler issuing and verifying access tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a process-wide secret. Changing the
/// secret invalidates every token issued under the previous one.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for `subject` valid for `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_subject(subject, ttl))
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Expired` - `exp` is not strictly in the future
    /// * `Malformed` - Token cannot be parsed or lacks required claims
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Encode claims into a JWT token.
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// Requires `exp` and `sub`. No clock leeway is granted.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        // jsonwebtoken accepts exp == now; the expiry instant is already invalid.
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue("E1", Duration::minutes(30))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(subject, "E1");
    }

    #[test]
    fn test_verify_garbage_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.verify("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .issue("E1", Duration::minutes(30))
            .expect("Failed to issue token");

        assert_eq!(handler2.verify(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_zero_ttl_token_is_rejected() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue("E1", Duration::zero())
            .expect("Failed to issue token");

        assert_eq!(handler.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue("E1", Duration::minutes(-5))
            .expect("Failed to issue token");

        assert_eq!(handler.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue("E1", Duration::minutes(30))
            .expect("Failed to issue token");
        let forged = handler
            .issue("00admin", Duration::minutes(30))
            .expect("Failed to issue token");

        // Splice the forged payload onto the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(handler.verify(&spliced), Err(JwtError::InvalidSignature));
    }
}
