//! JWT token service

use std::sync::LazyLock;
use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::sync::Cache;
use uuid::Uuid;

use mediamart_persistence::UserRole;

use crate::model::JwtPayload;

/// Cached token data containing the full payload
#[derive(Clone)]
struct CachedTokenData {
    claims: JwtPayload,
}

/// JWT token cache to avoid repeated validation of the same token
static TOKEN_CACHE: LazyLock<Cache<String, CachedTokenData>> = LazyLock::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(300))
        .build()
});

/// Decode and validate a JWT token with caching
pub fn decode_jwt_token_cached(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<JwtPayload>> {
    if let Some(cached) = TOKEN_CACHE.get(token) {
        let now = chrono::Utc::now().timestamp();
        if cached.claims.exp > now {
            return Ok(jsonwebtoken::TokenData {
                header: Header::default(),
                claims: cached.claims,
            });
        }
        // Token expired in cache, invalidate it
        TOKEN_CACHE.invalidate(token);
    }

    let result = decode_jwt_token(token, secret_key)?;

    TOKEN_CACHE.insert(
        token.to_string(),
        CachedTokenData {
            claims: result.claims.clone(),
        },
    );

    Ok(result)
}

/// Decode and validate a JWT token without caching
pub fn decode_jwt_token(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<JwtPayload>> {
    let decoding_key = DecodingKey::from_secret(secret_key.as_bytes());
    decode::<JwtPayload>(token, &decoding_key, &Validation::default())
}

/// Encode a JWT token for a user, valid for `ttl_secs` seconds.
pub fn encode_jwt_token(
    user_id: Uuid,
    role: UserRole,
    secret_key: &str,
    ttl_secs: i64,
) -> jsonwebtoken::errors::Result<String> {
    let claims = JwtPayload {
        sub: user_id,
        role,
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };
    let encoding_key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
}

/// Clear the entire token cache (used between tests)
#[allow(dead_code)]
pub fn clear_token_cache() {
    TOKEN_CACHE.invalidate_all();
}
