// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Published conformance vectors: NIST CAVS/SP 800-135 component tests,
//! RFC 2631, RFC 6070, and RFC 7914.

use hex_literal::hex;

use super::*;

/// RFC 6070-style PBKDF2-HMAC vector recomputed for SHA-256.
pub static PBKDF2_SHA256_MULTIBLOCK: Pbkdf2TestVector = Pbkdf2TestVector {
    password: b"passwordPASSWORDpassword",
    salt: b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
    iterations: 4096,
    digest: "sha256",
    expected: &hex!("348c89dbcbd32b2f32d814b8116e84cf2b17347ebc1800181c"),
};

pub static TLS1_PRF_SHA256: TlsPrfTestVector = TlsPrfTestVector {
    digest: "sha256",
    secret: b"secret",
    seed: b"seed",
    expected: &hex!("8e4d932530d765a0aae974c304735ecc"),
};

pub static HKDF_SHA256_SHORT: HkdfTestVector = HkdfTestVector {
    ikm: b"secret",
    salt: b"salt",
    info: b"label",
    digest: "sha256",
    prk: &[],
    expected: &hex!("2ac4369f525996f8de13"),
};

/// NIST SP 800-56C one-step, hash auxiliary function (SHA-224).
pub static SSKDF_HASH_SHA224: SskdfTestVector = SskdfTestVector {
    mac: None,
    digest: Some("sha224"),
    secret: &hex!(
        "6dbdc23f045488e4062757b06b9ebae183fc5a5946d80db93fec6f62ec07e372"
        "7f0126aed12ce4b262f47d48d54287f81d474c7c3b1850e9"
    ),
    info: &hex!(
        "a1b2c3d4e54341565369643c832e9849dcdba71e9a3139e606e095de3c264a66"
        "e98a165854cd07989b1ee0ec3f8dbe"
    ),
    salt: None,
    mac_size: None,
    expected: &hex!("a462de16a89de8466ef5460b47b8"),
};

/// NIST SP 800-56C one-step, HMAC-SHA256 auxiliary function.
pub static SSKDF_HMAC_SHA256: SskdfTestVector = SskdfTestVector {
    mac: Some("HMAC"),
    digest: Some("sha256"),
    secret: &hex!("b74a149a161546f8c20b06ac4ed4"),
    info: &hex!("348a37a27ef1282f5f020dcc"),
    salt: Some(&hex!("3638271ccd68a25dc24ecddd39ef3f89")),
    mac_size: None,
    expected: &hex!("44f676e85c1b1a8bbc3d319218631ca3"),
};

/// NIST SP 800-56C one-step, KMAC128 auxiliary function with a 20-byte
/// per-block MAC size.
pub static SSKDF_KMAC128: SskdfTestVector = SskdfTestVector {
    mac: Some("KMAC128"),
    digest: None,
    secret: &hex!("b74a149a161546f8c20b06ac4ed4"),
    info: &hex!("348a37a27ef1282f5f020dcc"),
    salt: Some(&hex!("3638271ccd68a25dc24ecddd39ef3f89")),
    mac_size: Some(20),
    expected: &hex!(
        "e9c18453a062b53bdbfcbb5a34bdb8e5e707eebb5dd1344243d8cfc2c2e6332f"
        "91bda586f37de48a65d4c514fdefaa1e6754f373d238e195ae157e1de8149803"
    ),
};

/// NIST CAVS 14.1 SSH KDF vector, initial IV client-to-server, SHA-256.
pub static SSHKDF_SHA256_IV: SshkdfTestVector = SshkdfTestVector {
    digest: "sha256",
    shared_secret: &hex!(
        "0000008100875c551cef526a4a8be1a7df27e9ed354bac9afb71f53dbae90567"
        "9d14f9faf2469c53457cf80a366be278965ba6255276ca2d9f4a97d271f71e50"
        "d8a9ec46253a6a906ac2c5e4f48b27a63ce08d80390a492aa43bad9d882ccac2"
        "3dac88bcada4b4d426a362083dab6569c54c224dd2d87643aa227693e141ad16"
        "30ce13144e"
    ),
    exchange_hash: &hex!("0e683fc8a9ed7c2ff02def23b2745ebc99b267daa86a4aa7697239088253f642"),
    session_id: &hex!("0e683fc8a9ed7c2ff02def23b2745ebc99b267daa86a4aa7697239088253f642"),
    role: "A",
    expected: &hex!("41ff2ead1683f1e6"),
};

/// NIST SP 800-135 ANS X9.63-2001 component vector, SHA-512.
pub static X963_SHA512: X963TestVector = X963TestVector {
    digest: "sha512",
    secret: &hex!(
        "00aa5bb79b33e389fa58ceadc047197f14e73712f452caa9fc4c9adb369348b8"
        "1507392f1a86ddfdb7c4ff8231c4bd0f44e44a1b55b1404747a9e2e753f55ef0"
        "5a2d"
    ),
    shared_info: &hex!("e3b5b4c1b0d5cf1d2b3a2f9937895d31"),
    expected: &hex!(
        "4463f869f3cc18769b52264b0112b5858f7ad32a5a2d96d8cffabf7fa733633d"
        "6e4dd2a599acceb3ea54a6217ce0b50eef4f6b40a5c30250a5a8eeee20800226"
        "7089dbf351f3f5022aa9638bf1ee419dea9c4ff745a25ac27bda33ca08bd56dd"
        "1a59b4106cf2dbbc0ab2aa8e2efa7b17902d34276951ceccab87f9661c3e8816"
    ),
};

/// RFC 2631 section 2.1.6 example: 3DES CEK from a 20-byte DH secret.
pub static X942_SHA1_3DES: X942TestVector = X942TestVector {
    digest: "sha1",
    secret: &hex!("000102030405060708090a0b0c0d0e0f10111213"),
    cek_alg: "CMS3DESwrap",
    expected: &hex!("a09661392376f7044d9052a397883246b67f5f1ef63eb5fb"),
};

/// RFC 7914 section 12, second vector.
pub static SCRYPT_RFC7914: ScryptTestVector = ScryptTestVector {
    password: b"password",
    salt: b"NaCl",
    n: 1024,
    r: 8,
    p: 16,
    expected: &hex!(
        "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162"
        "2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640"
    ),
};
