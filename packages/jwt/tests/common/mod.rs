//! Fixed keys shared by the integration tests

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jose_jwt::JoseKey;

/// 2048-bit RSA private key, PKCS#8 DER
const RSA_2048_PRIVATE_PKCS8: &[&str] = &[
    "MIIEvQIBADANBgkqhkiG9w0BAQEFAASCBKcwggSjAgEAAoIBAQDK0tcknUSFEODVOXji4OY1hUTc",
    "jCd1PJvbnJk2EksM5yb5mXPHcChEQEydLJ65s0BPjmnNJfQgSxuaHk4rjyM8WhuWQKnIgZ1ThR85",
    "DEG0/aZ/oTF1vlkYZ4vCWgSU+OVyKPOtl15aLdpXnlZH+PA+1o1I2RSooDgC7d3MRn0v5GtoMFXn",
    "Cy5MChCSVKEa+aYb9tpciYc2bRbQL8MLpuKhdBbtAXZnMrcU8r2j1T4Dopps416Wn4bwelEu8EHi",
    "AgWXBBdvX1/Zh1+7WFHTzEwFocldkXqcV8HNbQuz3tUfGsynEJaM6gAvzh1K0ERZejW04l0RFEW4",
    "SiFYPG1OXTonAgMBAAECggEAUPAsjN75ngRrRIvH0voexBLntP91K5LBO7VVar+IFaEU65wyGM+I",
    "Mhxatoo82SxQKK9TR1uy/UQbwrf/R+C6FfZ7dc1eM7aNuuuv1wsuGXTzgZEo9Ky+Tz/bBPb5Rx3A",
    "KntvKsHyFBiiPj7gfZ44+UqTXRPL67LsRzb3QPKMOJS+7ldbMo+AJkN5UJeNq+xHCVtZu5VRsngV",
    "vtbJm2YC+zU5x2tBZb95Vl5rVM+APRjR6M5MHg5/1KN4dahozUcDAU79bCoy3Ad8SWPu1MVx3Jfv",
    "4oK9z5O5yiMghoE6050/WVoB28qkcXRPrQEgtOB0PbxipS0lrzPZg/KvpaQbaQKBgQD9DDRB4l0h",
    "RprcKqZciWYvNliPBodBOL8gdbQQM1CLL6lzCRCrU0n7IwIeHo9m8VXRS4pteDObNAcI+QVwjZrv",
    "b71wCNZoMgzfpe6LdWKjKyi3XxMAB4EO0era6AHJ0fK+pl3SjcQ+2UowatRZM7IUUOULvvFl1eP8",
    "FF6+kJER5QKBgQDNMKDc+mKiBl40xDuXpjN1bqd+oO4RLIoa0QlzugaesXbNJxH1bEqM4h0+Bj0W",
    "s3VFY8pDwpbQvOrPIn+AVR57abD9VSyBJtqDXTDDoYKzyW7bLIEASjcc4FictX09hymmjSuabTmB",
    "mA1V8TG6oq6ezLYLIaVRcp5JIeDMn2WLGwKBgQCI3K7u63WfZ8aeSdsMtau04VnokYlZ9004SzEG",
    "ihqIDVFCzKZdY4Dh+b9Ndw3siZ72wjqulpKi4PLlIXqVs6EW24LEM6NzW46m7+IjP2wIAHHXK+7k",
    "1yowT80MdOtyssDt6KFaHh8ENxXvNfh//nvUjSQ0xCNgBt12G7Zar2onGQKBgEnYcGxW6FxrckgH",
    "P3Mqa2ad9kXKYSNpJiLUjFRL5MoEED9xCjOLT6E4V1HVKPMcjt30Nf0A8Qoak18MiVqER74eoYXq",
    "u2OXuhiA12XwoHtXyT+z2pFiJEeOLhXn8zTLih/YupKPMJ0FPfdqIH2Mws9/2RxUdYzEdVbYjHDY",
    "BNF1AoGACnC8Pqb4hrDU4AJWQP2ZhWQ3x+g03EZP/alrdgbI5O1GFJEN8hg8XQYWnly7m98+zFZW",
    "qJ2qkYmXUFvj7STWQZmOm1O3T/VrBrKgfyl+XlcclKNz0AqjMoZGDnQZNPe1T8/sdaADzHx7WcM3",
    "iAOwARpw56Tgtau/PpbYJ2IT44M=",
];

/// Public half of [`RSA_2048_PRIVATE_PKCS8`], SPKI DER
const RSA_2048_PUBLIC_SPKI: &[&str] = &[
    "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAytLXJJ1EhRDg1Tl44uDmNYVE3IwndTyb",
    "25yZNhJLDOcm+Zlzx3AoREBMnSyeubNAT45pzSX0IEsbmh5OK48jPFoblkCpyIGdU4UfOQxBtP2m",
    "f6Exdb5ZGGeLwloElPjlcijzrZdeWi3aV55WR/jwPtaNSNkUqKA4Au3dzEZ9L+RraDBV5wsuTAoQ",
    "klShGvmmG/baXImHNm0W0C/DC6bioXQW7QF2ZzK3FPK9o9U+A6KabONelp+G8HpRLvBB4gIFlwQX",
    "b19f2Ydfu1hR08xMBaHJXZF6nFfBzW0Ls97VHxrMpxCWjOoAL84dStBEWXo1tOJdERRFuEohWDxt",
    "Tl06JwIDAQAB",
];

/// 1024-bit RSA private key, too small for key validation
const RSA_1024_PRIVATE_PKCS8: &[&str] = &[
    "MIICdwIBADANBgkqhkiG9w0BAQEFAASCAmEwggJdAgEAAoGBALr7WqjcSFYXHi/mOV30GDlo0+7T",
    "x2m+nL/j5lX5fHMmHoZ8yps8E6lHHF0FSZuZN13P6g9oLeAz+fErRdkb98/AXuNiB3Vf1iN8tb2A",
    "zGNAyvckimCuwioekrjh5HqAklPuuOB4nZ0aiT9kxMcP56qEL2bRlKHSOGdOenWupOChAgMBAAEC",
    "gYB7pAnm7wLGKrNDaTE191qtW6wImPGb8vcjzEdbQoYQfnxg4dP3olo97U/MEtsBkOcTmZBkb7cm",
    "MjhsSPj+/4d1Ld0exz2gnjbsBGY15HgGSVHdrFYL4DzEuMwDlTpohssyFDPH0qkneukWcpAaCqHP",
    "iE+eEmumaVg+dyTYt4f/IQJBAPRCNSV4v+ElOw83U0aazZYSL7DEpUaKHqGGZPR8bs7jOqhkOqVm",
    "Cxf5dofOqRNpAM0Aw+d652KrxP/GkOLcZT8CQQDD+E+xizZw5O0uY+/Drmz4IWppHgKKnpEaXidn",
    "A8awewO6dS9ndizmWEuC/VIMllOlImfsdAjbBf7L0vGHreIfAkEAov+Do8vekApeTRsocVdgliLw",
    "vE+d02LcagHbYOOgtmMgg7rPAA0GnisVFC+u2Isbw7IdCV4VBt2FiwIhMaLN1QJBAIOxNZThMZeS",
    "L9VR8Uj1yWLByemT8i9HOcmXZjEy922XbTz7DP0hDDFLOotvQpkU2GcLhP0ASQcuszgzrH36Gw8C",
    "QGsHKMDlAUmXyknllu0cu1g8Qi9dbOZgz8KCWDfNaRq9jz1jE5lkaYyLiTo6helu3T6pRaTS13h7",
    "PX4xJVqVMig=",
];

fn der(lines: &[&str]) -> Vec<u8> {
    STANDARD.decode(lines.concat()).unwrap()
}

pub fn rsa_private_key() -> JoseKey {
    JoseKey::rsa_private_from_pkcs8_der(&der(RSA_2048_PRIVATE_PKCS8)).unwrap()
}

pub fn rsa_public_key() -> JoseKey {
    JoseKey::rsa_public_from_public_key_der(&der(RSA_2048_PUBLIC_SPKI)).unwrap()
}

pub fn weak_rsa_private_key() -> JoseKey {
    JoseKey::rsa_private_from_pkcs8_der(&der(RSA_1024_PRIVATE_PKCS8)).unwrap()
}

pub fn p256_private_key() -> JoseKey {
    JoseKey::p256_private_from_bytes(&[0x11; 32]).unwrap()
}

pub fn p256_public_key() -> JoseKey {
    p256_private_key().public_key().unwrap()
}

pub fn p384_private_key() -> JoseKey {
    JoseKey::p384_private_from_bytes(&[0x22; 48]).unwrap()
}

pub fn p384_public_key() -> JoseKey {
    p384_private_key().public_key().unwrap()
}

pub fn hmac_key(len: usize) -> JoseKey {
    JoseKey::symmetric((0..len).map(|i| i as u8).collect::<Vec<u8>>())
}
