// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

fn configure(ctx: &mut Context, vec: &Pbkdf2TestVector) {
    ctx.set_params(&[
        Param::octets(key::PASSWORD, vec.password),
        Param::octets(key::SALT, vec.salt),
        Param::uint(key::ITERATIONS, vec.iterations),
        Param::utf8(key::DIGEST, vec.digest),
    ])
    .unwrap();
}

#[test]
fn pbkdf2_sha256_conformance() {
    let vec = &PBKDF2_SHA256_MULTIBLOCK;
    let mut ctx = kdf_context("PBKDF2");
    configure(&mut ctx, vec);
    let out = ctx.derive(vec.expected.len()).unwrap();
    assert_eq!(out.as_bytes(), vec.expected);
}

#[test]
fn pbkdf2_sha1_rfc6070_multiblock() {
    let vec = &PBKDF2_RFC6070_LONG;
    let mut ctx = kdf_context("PBKDF2");
    configure(&mut ctx, vec);
    let out = ctx.derive(vec.expected.len()).unwrap();
    assert_eq!(out.as_bytes(), vec.expected);
}

#[test]
fn output_below_112_bits_is_rejected() {
    let mut ctx = kdf_context("PBKDF2");
    configure(&mut ctx, &PBKDF2_SHA256_MULTIBLOCK);
    assert_eq!(ctx.derive(112 / 8 - 1).unwrap_err(), CryptoError::InvalidLength);
    // The configuration survives the failure.
    assert!(ctx.derive(25).is_ok());
}

#[test]
fn weak_salt_and_iterations_rejected_at_set_time() {
    let mut ctx = kdf_context("PBKDF2");
    assert_eq!(
        ctx.set_params(&[Param::octets(key::SALT, &b"123456781234567"[..])])
            .unwrap_err(),
        CryptoError::WeakParameters
    );
    assert_eq!(
        ctx.set_params(&[Param::uint(key::ITERATIONS, 1)]).unwrap_err(),
        CryptoError::WeakParameters
    );
}

#[test]
fn compatibility_flag_relaxes_the_policy() {
    let mut ctx = kdf_context("PBKDF2");
    ctx.set_params(&[Param::uint(key::PKCS5, 1)]).unwrap();
    ctx.set_params(&[
        Param::octets(key::PASSWORD, &b"password"[..]),
        Param::octets(key::SALT, &b"123456781234567"[..]),
        Param::uint(key::ITERATIONS, 1),
        Param::utf8(key::DIGEST, "sha256"),
    ])
    .unwrap();
    assert!(ctx.derive(8).is_ok());
    // Turning the flag back off makes the stored weak values fail the
    // derivation.
    ctx.set_params(&[Param::uint(key::PKCS5, 0)]).unwrap();
    assert_eq!(ctx.derive(25).unwrap_err(), CryptoError::WeakParameters);
}

#[test]
fn weak_values_set_in_the_same_batch_as_the_flag_pass() {
    let out = derive_once(
        "PBKDF2",
        &[
            Param::uint(key::PKCS5, 1),
            Param::octets(key::PASSWORD, &b"password"[..]),
            Param::octets(key::SALT, &b"salt"[..]),
            Param::uint(key::ITERATIONS, 1),
            Param::utf8(key::DIGEST, "sha1"),
        ],
        20,
    )
    .unwrap();
    // RFC 6070 vector 1.
    assert_eq!(
        out.as_bytes(),
        hex_literal::hex!("0c60c80f961f0e71f3a9b524af6012062fe037a6")
    );
}

#[test]
fn missing_password_or_salt_is_reported() {
    let mut ctx = kdf_context("PBKDF2");
    assert_eq!(ctx.derive(16).unwrap_err(), CryptoError::ParamMissing);
    ctx.set_params(&[Param::octets(key::PASSWORD, &b"password"[..])])
        .unwrap();
    assert_eq!(ctx.derive(16).unwrap_err(), CryptoError::ParamMissing);
}

#[test]
fn zero_iterations_is_invalid_even_in_compat_mode() {
    let mut ctx = kdf_context("PBKDF2");
    ctx.set_params(&[Param::uint(key::PKCS5, 1)]).unwrap();
    assert_eq!(
        ctx.set_params(&[Param::uint(key::ITERATIONS, 0)]).unwrap_err(),
        CryptoError::InvalidParameters
    );
}

#[test]
fn unknown_keys_are_ignored() {
    let mut ctx = kdf_context("PBKDF2");
    configure(&mut ctx, &PBKDF2_SHA256_MULTIBLOCK);
    ctx.set_params(&[Param::uint("no-such-key", 7)]).unwrap();
    assert!(ctx.derive(25).is_ok());
}
