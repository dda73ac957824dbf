// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

fn configure(ctx: &mut Context, vec: &SshkdfTestVector, role: &'static str) {
    ctx.set_params(&[
        Param::utf8(key::DIGEST, vec.digest),
        Param::octets(key::KEY, vec.shared_secret),
        Param::octets(key::XCGHASH, vec.exchange_hash),
        Param::octets(key::SESSION_ID, vec.session_id),
        Param::utf8(key::TYPE, role),
    ])
    .unwrap();
}

#[test]
fn sshkdf_sha256_cavs_conformance() {
    let vec = &SSHKDF_SHA256_IV;
    let mut ctx = kdf_context("SSHKDF");
    configure(&mut ctx, vec, vec.role);
    let out = ctx.derive(vec.expected.len()).unwrap();
    assert_eq!(out.as_bytes(), vec.expected);
}

#[test]
fn each_role_derives_a_distinct_key() {
    let vec = &SSHKDF_SHA256_IV;
    let mut keys = Vec::new();
    for role in ["A", "B", "C", "D", "E", "F"] {
        let mut ctx = kdf_context("SSHKDF");
        configure(&mut ctx, vec, role);
        keys.push(ctx.derive(16).unwrap());
    }
    for i in 0..keys.len() {
        for j in i + 1..keys.len() {
            assert_ne!(keys[i], keys[j], "roles {i} and {j}");
        }
    }
}

#[test]
fn long_output_extends_past_one_hash_block() {
    // 100 bytes forces the accumulate-and-rehash extension rounds; the
    // prefix must match the single-block derivation.
    let vec = &SSHKDF_SHA256_IV;
    let mut ctx = kdf_context("SSHKDF");
    configure(&mut ctx, vec, vec.role);
    let long = ctx.derive(100).unwrap();
    let short = ctx.derive(8).unwrap();
    assert_eq!(&long.as_bytes()[..8], short.as_bytes());
    assert_eq!(long.len(), 100);
}

#[test]
fn invalid_role_letters_are_rejected() {
    let mut ctx = kdf_context("SSHKDF");
    for bad in ["G", "a", "", "AB"] {
        assert_eq!(
            ctx.set_params(&[Param::utf8(key::TYPE, bad)]).unwrap_err(),
            CryptoError::InvalidParameters,
            "{bad:?}"
        );
    }
}

#[test]
fn all_inputs_are_required() {
    let vec = &SSHKDF_SHA256_IV;
    let mut ctx = kdf_context("SSHKDF");
    ctx.set_params(&[
        Param::utf8(key::DIGEST, vec.digest),
        Param::octets(key::KEY, vec.shared_secret),
        Param::utf8(key::TYPE, "A"),
    ])
    .unwrap();
    assert_eq!(ctx.derive(8).unwrap_err(), CryptoError::ParamMissing);
}
