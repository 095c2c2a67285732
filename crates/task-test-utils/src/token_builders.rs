//! Builder patterns for test token construction
//!
//! Unlike the service's own `TokenService`, these builders can produce any
//! header/claims combination, including ones the service must reject.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Map, Value};

/// Builder for creating test session tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user("alice")
///     .with_role("admin")
///     .expired()
///     .sign(TEST_JWT_SECRET);
/// ```
pub struct TestTokenBuilder {
    alg: String,
    username: Option<String>,
    role: Option<Value>,
    exp: Option<i64>,
    iat: i64,
}

impl TestTokenBuilder {
    /// Create a new builder: HS256, user `test-user`, role `user`, valid for an hour.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            alg: "HS256".to_string(),
            username: Some("test-user".to_string()),
            role: Some(json!("user")),
            exp: Some((now + Duration::seconds(3600)).timestamp()),
            iat: now.timestamp(),
        }
    }

    /// Set the username claim
    pub fn for_user(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    /// Omit the username claim
    pub fn without_username(mut self) -> Self {
        self.username = None;
        self
    }

    /// Set the role claim
    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(json!(role));
        self
    }

    /// Set the role claim to an arbitrary JSON value (e.g. a number or array)
    pub fn with_role_value(mut self, role: Value) -> Self {
        self.role = Some(role);
        self
    }

    /// Omit the role claim
    pub fn without_role(mut self) -> Self {
        self.role = None;
        self
    }

    /// Set expiration in seconds from now (negative for the past)
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = Some((Utc::now() + Duration::seconds(seconds)).timestamp());
        self
    }

    /// Expire one minute ago
    pub fn expired(self) -> Self {
        self.expires_in(-60)
    }

    /// Omit the exp claim
    pub fn without_exp(mut self) -> Self {
        self.exp = None;
        self
    }

    /// Declare a different `alg` in the header.
    ///
    /// HS384/HS512 are really signed with that algorithm; anything else
    /// (`none`, `RS256`, ...) gets a placeholder signature.
    pub fn with_alg(mut self, alg: &str) -> Self {
        self.alg = alg.to_string();
        self
    }

    /// Build the claims as a JSON value
    pub fn build_claims(&self) -> Value {
        let mut claims = Map::new();
        if let Some(username) = &self.username {
            claims.insert("username".to_string(), json!(username));
        }
        if let Some(role) = &self.role {
            claims.insert("role".to_string(), role.clone());
        }
        if let Some(exp) = self.exp {
            claims.insert("exp".to_string(), json!(exp));
        }
        claims.insert("iat".to_string(), json!(self.iat));
        Value::Object(claims)
    }

    /// Sign with `secret` and return the compact token
    pub fn sign(self, secret: &str) -> String {
        let claims = self.build_claims();

        let algorithm = match self.alg.as_str() {
            "HS256" => Some(Algorithm::HS256),
            "HS384" => Some(Algorithm::HS384),
            "HS512" => Some(Algorithm::HS512),
            _ => None,
        };

        match algorithm {
            Some(algorithm) => encode(
                &Header::new(algorithm),
                &claims,
                &EncodingKey::from_secret(secret.as_bytes()),
            )
            .expect("HMAC signing of test claims should succeed"),
            None => {
                let header = json!({ "alg": self.alg, "typ": "JWT" });
                let signature = if self.alg == "none" {
                    String::new()
                } else {
                    URL_SAFE_NO_PAD.encode(b"placeholder-signature")
                };
                format!(
                    "{}.{}.{}",
                    URL_SAFE_NO_PAD.encode(header.to_string()),
                    URL_SAFE_NO_PAD.encode(claims.to_string()),
                    signature
                )
            }
        }
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the payload of a signed token, keeping its header and signature.
pub fn tamper_payload(token: &str, claims: &Value) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3, "token must have 3 parts");
    format!(
        "{}.{}.{}",
        parts[0],
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        parts[2]
    )
}
