//! Token claim decoding
//!
//! The session token is a JWT issued by the server. The client never
//! verifies the signature; it only decodes the payload segment to know who
//! is logged in. Verification stays server-side.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token does not have three segments")]
    MalformedToken,

    #[error("payload segment is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a valid claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Identity shown in the dashboard, extracted from token claims.
///
/// Every field is optional; a missing claim leaves the field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub principal_name: Option<String>,
    pub organization: Option<String>,
    pub audience: Option<String>,
}

/// Claim keys as the server issues them
#[derive(Debug, Deserialize)]
struct RawClaims {
    name: Option<String>,
    upn: Option<String>,
    org: Option<String>,
    aud: Option<String>,
}

/// Decode the payload segment of a session token into an [`Identity`].
///
/// The payload is the URL-safe base64 middle segment of the token.
pub fn decode_identity(token: &str) -> Result<Identity, ClaimsError> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(ClaimsError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let claims: RawClaims = serde_json::from_slice(&bytes)?;

    Ok(Identity {
        name: claims.name,
        principal_name: claims.upn,
        organization: claims.org,
        audience: claims.aud,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_full_claims() {
        let token = token_with_payload(
            r#"{"name":"Jane Doe","upn":"jane@example.com","org":"Acme","aud":"dashboard"}"#,
        );

        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.name.as_deref(), Some("Jane Doe"));
        assert_eq!(identity.principal_name.as_deref(), Some("jane@example.com"));
        assert_eq!(identity.organization.as_deref(), Some("Acme"));
        assert_eq!(identity.audience.as_deref(), Some("dashboard"));
    }

    #[test]
    fn test_missing_claims_stay_unset() {
        let token = token_with_payload(r#"{"upn":"jane@example.com","exp":1700000000}"#);

        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.principal_name.as_deref(), Some("jane@example.com"));
        assert_eq!(identity.name, None);
        assert_eq!(identity.organization, None);
        assert_eq!(identity.audience, None);
    }

    #[test]
    fn test_wrong_segment_count() {
        assert!(matches!(
            decode_identity("only-one-segment"),
            Err(ClaimsError::MalformedToken)
        ));
        assert!(matches!(
            decode_identity("a.b"),
            Err(ClaimsError::MalformedToken)
        ));
        assert!(matches!(
            decode_identity("a.b.c.d"),
            Err(ClaimsError::MalformedToken)
        ));
    }

    #[test]
    fn test_invalid_base64_payload() {
        assert!(matches!(
            decode_identity("header.!!!not-base64!!!.signature"),
            Err(ClaimsError::Base64(_))
        ));
    }

    #[test]
    fn test_invalid_json_payload() {
        let token = token_with_payload("this is not json");
        assert!(matches!(decode_identity(&token), Err(ClaimsError::Json(_))));
    }
}
