//! Throwaway signing material for tests.

use std::path::Path;

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use openssl::symm::Cipher;
use openssl::x509::{X509Builder, X509NameBuilder};

use crate::certificates::CertificatePaths;

pub struct TestMaterial {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
    pub key: PKey<openssl::pkey::Private>,
}

/// A fresh RSA key and a self-signed certificate for it.
pub fn self_signed(common_name: &str) -> TestMaterial {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, common_name).unwrap();
    let name = name.build();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder.sign(&key, MessageDigest::sha256()).unwrap();
    let cert = builder.build();

    TestMaterial {
        cert_pem: cert.to_pem().unwrap(),
        key_pem: key.private_key_to_pem_pkcs8().unwrap(),
        key,
    }
}

/// Write the material into `dir` and return paths to it. The certificate
/// doubles as the WWDR intermediate.
pub fn write_pem_files(dir: &Path, material: &TestMaterial, passphrase: Option<&str>) -> CertificatePaths {
    let cert_path = dir.join("signer.pem");
    let wwdr_path = dir.join("wwdr.pem");
    let key_path = dir.join("signer.key");

    let key_pem = match passphrase {
        Some(p) => material
            .key
            .private_key_to_pem_pkcs8_passphrase(Cipher::aes_256_cbc(), p.as_bytes())
            .unwrap(),
        None => material.key_pem.clone(),
    };

    std::fs::write(&cert_path, &material.cert_pem).unwrap();
    std::fs::write(&wwdr_path, &material.cert_pem).unwrap();
    std::fs::write(&key_path, key_pem).unwrap();

    CertificatePaths {
        wwdr_certificate: wwdr_path,
        signer_certificate: cert_path,
        signer_key: key_path,
        signer_key_passphrase: passphrase.map(str::to_string),
    }
}
