//! Session Token
//!
//! Cookie value identifying a server-side session:
//! `"<session_id>.<base64url(hmac_sha256(secret, session_id))>"`.

use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use uuid::Uuid;

/// Sign a session id for the cookie
pub fn sign(session_id: Uuid, secret: &[u8]) -> String {
    let session_id = session_id.to_string();
    let signature = hmac_sha256(secret, session_id.as_bytes());
    format!("{}.{}", session_id, to_base64url(&signature))
}

/// Verify a cookie value and recover the session id
///
/// `None` for anything malformed or signed with a different secret.
pub fn verify(token: &str, secret: &[u8]) -> Option<Uuid> {
    let (session_id, signature_b64) = token.split_once('.')?;
    let signature = from_base64url(signature_b64).ok()?;

    if !verify_hmac_sha256(secret, session_id.as_bytes(), &signature) {
        return None;
    }

    session_id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = &[7u8; 32];

    #[test]
    fn test_sign_then_verify() {
        let id = Uuid::new_v4();
        let token = sign(id, SECRET);
        assert_eq!(verify(&token, SECRET), Some(id));
    }

    #[test]
    fn test_tampered_tokens_rejected() {
        let id = Uuid::new_v4();
        let token = sign(id, SECRET);

        // different secret
        assert_eq!(verify(&token, &[8u8; 32]), None);

        // swapped session id, original signature
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);
        assert_eq!(verify(&forged, SECRET), None);

        // flipped signature character
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        assert_eq!(verify(&String::from_utf8(bytes).unwrap(), SECRET), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert_eq!(verify("", SECRET), None);
        assert_eq!(verify("no-dot", SECRET), None);
        assert_eq!(verify("abc.!!!", SECRET), None);
    }
}
