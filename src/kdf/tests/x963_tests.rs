// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

#[test]
fn x963_sha512_cavs_conformance() {
    let vec = &X963_SHA512;
    let out = derive_once(
        "X963KDF",
        &[
            Param::utf8(key::DIGEST, vec.digest),
            Param::octets(key::KEY, vec.secret),
            Param::octets(key::INFO, vec.shared_info),
        ],
        vec.expected.len(),
    )
    .unwrap();
    assert_eq!(out.as_bytes(), vec.expected);
}

#[test]
fn shared_info_is_optional() {
    let vec = &X963_SHA512;
    let out = derive_once(
        "X963KDF",
        &[
            Param::utf8(key::DIGEST, vec.digest),
            Param::octets(key::KEY, vec.secret),
        ],
        32,
    )
    .unwrap();
    assert_eq!(out.len(), 32);
    assert_ne!(out.as_bytes(), &vec.expected[..32]);
}

#[test]
fn alias_resolves_to_the_same_engine() {
    let vec = &X963_SHA512;
    let out = derive_once(
        "X9.63",
        &[
            Param::utf8(key::DIGEST, vec.digest),
            Param::octets(key::KEY, vec.secret),
            Param::octets(key::INFO, vec.shared_info),
        ],
        vec.expected.len(),
    )
    .unwrap();
    assert_eq!(out.as_bytes(), vec.expected);
}

#[test]
fn secret_is_an_advertised_alias_for_key() {
    let vec = &X963_SHA512;
    let mut ctx = kdf_context("X963KDF");
    assert!(ctx.settable_params().iter().any(|s| s.key == key::SECRET));
    ctx.set_params(&[
        Param::utf8(key::DIGEST, vec.digest),
        Param::octets(key::SECRET, vec.secret),
        Param::octets(key::INFO, vec.shared_info),
    ])
    .unwrap();
    let out = ctx.derive(vec.expected.len()).unwrap();
    assert_eq!(out.as_bytes(), vec.expected);
}

#[test]
fn counter_overflow_is_rejected() {
    let vec = &X963_SHA512;
    let mut ctx = kdf_context("X963KDF");
    ctx.set_params(&[
        Param::utf8(key::DIGEST, "sha256"),
        Param::octets(key::KEY, vec.secret),
    ])
    .unwrap();
    // More than (2^32 - 1) SHA-256 blocks cannot be counted.
    let too_big = (u32::MAX as usize + 1) * 32;
    assert_eq!(ctx.derive(too_big).unwrap_err(), CryptoError::InvalidLength);
}

#[test]
fn zero_length_output_is_rejected() {
    let vec = &X963_SHA512;
    let err = derive_once(
        "X963KDF",
        &[
            Param::utf8(key::DIGEST, vec.digest),
            Param::octets(key::KEY, vec.secret),
        ],
        0,
    )
    .unwrap_err();
    assert_eq!(err, CryptoError::InvalidLength);
}
