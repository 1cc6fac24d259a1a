//! Wire representation of an encrypted S2S payload.

use serde::{Deserialize, Serialize};

/// Encrypted payload exchanged between instances.
///
/// `data` is the base64 encoding of the nonce followed by the AES-GCM
/// ciphertext of a JSON array of envelopes. `sender_id` names the
/// organization whose shared key must be used for decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// Organization id of the sending instance.
    pub sender_id: String,
    /// Base64-encoded `nonce || ciphertext`.
    pub data: String,
}

impl EncryptedData {
    /// Create a new encrypted payload.
    pub fn new(sender_id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            data: data.into(),
        }
    }
}
