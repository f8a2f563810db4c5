// Signed session cookie codec: the cookie carries `token.signature` so a
// tampered token is treated as no session at all.
use sha2::{Digest, Sha256};

pub fn encode(secret: &str, token: &str) -> String {
    format!("{}.{}", token, sign(secret, token))
}

/// Returns the token when the signature verifies, else `None`.
pub fn decode(secret: &str, value: &str) -> Option<String> {
    let (token, signature) = value.rsplit_once('.')?;
    if sign(secret, token) == signature {
        Some(token.to_string())
    } else {
        None
    }
}

fn sign(secret: &str, token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b".");
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
