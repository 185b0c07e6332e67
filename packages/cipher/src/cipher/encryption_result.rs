//! Output of a content encryption operation

/// Ciphertext, IV and authentication tag produced together by one encryption
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptionResult {
    ciphertext: Vec<u8>,
    iv: Vec<u8>,
    authentication_tag: Vec<u8>,
}

impl EncryptionResult {
    /// Bundle the three outputs
    #[must_use]
    pub fn new(ciphertext: Vec<u8>, iv: Vec<u8>, authentication_tag: Vec<u8>) -> Self {
        Self {
            ciphertext,
            iv,
            authentication_tag,
        }
    }

    /// The ciphertext
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// The initialization vector used
    #[must_use]
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// The authentication tag
    #[must_use]
    pub fn authentication_tag(&self) -> &[u8] {
        &self.authentication_tag
    }

    /// Split into `(ciphertext, iv, authentication_tag)`
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        (self.ciphertext, self.iv, self.authentication_tag)
    }
}
