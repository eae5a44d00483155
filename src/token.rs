//! Token validity rules.
//!
//! DESIGN
//! ======
//! The platform hands out bearer tokens that may or may not be structured
//! (JWT-shaped). A structured token carries an `exp` claim in its payload
//! segment; an opaque token carries nothing the client can inspect. What to
//! do with opaque tokens is an explicit, named policy rather than a parse
//! failure falling through: see [`OpaqueTokenPolicy`].
//!
//! Expiry is strict at the boundary: a token whose `exp` equals the current
//! wall-clock second is already expired. Only `exp > now` is valid.

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// How to treat a token whose payload cannot be decoded as a structured
/// claim set.
///
/// `Trust` reproduces the platform's historical behavior: an opaque token is
/// assumed to carry no client-readable expiry, so freshness is left to the
/// backend (which answers profile fetches with an auth failure once the
/// token dies). `Reject` treats anything undecodable as invalid, for
/// deployments where every token is known to be a JWT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpaqueTokenPolicy {
    #[default]
    Trust,
    Reject,
}

/// Outcome of inspecting a token at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
    /// Present and not past its expiry claim (or no claim under `Trust`).
    Valid,
    /// Structured token whose `exp` claim is at or before now.
    Expired,
    /// Undecodable token rejected by [`OpaqueTokenPolicy::Reject`].
    Rejected,
}

/// Why a token yields no expiry claim.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClaimError {
    /// The token is not JWT-shaped or its payload is not decodable.
    #[error("opaque token: no readable claims")]
    Opaque,
}

/// Extract the `exp` claim (Unix seconds) from a structured token.
///
/// Returns `Ok(None)` for a decodable payload that simply carries no `exp`
/// claim, and [`ClaimError::Opaque`] when the token has no decodable payload
/// segment at all. Fractional claims truncate toward zero.
pub fn expiry_claim(token: &str) -> Result<Option<i64>, ClaimError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) => payload,
        _ => return Err(ClaimError::Opaque),
    };
    if segments.next().is_some() {
        return Err(ClaimError::Opaque);
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload).map_err(|_| ClaimError::Opaque)?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).map_err(|_| ClaimError::Opaque)?;

    match claims.get("exp") {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .map(Some)
            .ok_or(ClaimError::Opaque),
    }
}

/// Classify a token at wall-clock instant `now` (Unix seconds).
#[must_use]
pub fn token_status(token: &str, now: i64, policy: OpaqueTokenPolicy) -> TokenStatus {
    match expiry_claim(token) {
        Ok(Some(exp)) if exp > now => TokenStatus::Valid,
        Ok(Some(_)) => TokenStatus::Expired,
        Ok(None) => TokenStatus::Valid,
        Err(ClaimError::Opaque) => match policy {
            OpaqueTokenPolicy::Trust => TokenStatus::Valid,
            OpaqueTokenPolicy::Reject => TokenStatus::Rejected,
        },
    }
}

/// Whether a token passes the validity rule at instant `now`.
#[must_use]
pub fn is_token_valid(token: &str, now: i64, policy: OpaqueTokenPolicy) -> bool {
    token_status(token, now, policy) == TokenStatus::Valid
}

/// Current wall-clock time in Unix seconds.
#[must_use]
pub fn unix_now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex token. Used by the mock backend; a real
/// backend issues its own.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    /// Build a JWT-shaped token with the given claim set. The signature
    /// segment is garbage; the client never verifies signatures.
    pub(crate) fn structured_token(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    /// Token expiring at the given Unix second.
    pub(crate) fn token_expiring_at(exp: i64) -> String {
        structured_token(&serde_json::json!({ "sub": "12345678", "exp": exp }))
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
