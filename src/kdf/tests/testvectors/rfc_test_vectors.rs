// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! RFC appendix vectors exercising multi-block expansion paths.

use hex_literal::hex;

use super::*;

/// RFC 5869 appendix A.1: basic SHA-256 case.
pub static HKDF_RFC5869_CASE1: HkdfTestVector = HkdfTestVector {
    ikm: &hex!("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b"),
    salt: &hex!("000102030405060708090a0b0c"),
    info: &hex!("f0f1f2f3f4f5f6f7f8f9"),
    digest: "sha256",
    prk: &hex!("077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5"),
    expected: &hex!(
        "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf"
        "34007208d5b887185865"
    ),
};

/// RFC 6070 section 2, fifth vector (multi-block, truncated tail),
/// PBKDF2-HMAC-SHA1.
pub static PBKDF2_RFC6070_LONG: Pbkdf2TestVector = Pbkdf2TestVector {
    password: b"passwordPASSWORDpassword",
    salt: b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
    iterations: 4096,
    digest: "sha1",
    expected: &hex!("3d2eec4fe41c849b80c8d83662c0e44a8b291a964cf2f07038"),
};
