mod aes_cbc_hmac;
mod algorithm;
mod encryption_result;
mod random;

pub use aes_cbc_hmac::AesCbcHmacSha2;
pub use algorithm::ContentEncryptionAlgorithm;
pub use encryption_result::EncryptionResult;
pub use random::{generate_content_encryption_key, generate_iv};
