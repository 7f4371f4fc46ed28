//! Collaborators the client manager consumes: file access, flags and the
//! operating system trust store

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Flag naming a PEM file with an additional trusted root certificate
pub const ZEEBE_SSL_CERTIFICATE: &str = "zeebe-ssl-certificate";

/// Read access to local files
pub trait FileSystem: Send + Sync {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileSystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Key/value feature flags
pub trait Flags: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl Flags for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Flags for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Source of the root certificates the operating system trusts
pub trait TrustStore: Send + Sync {
    /// PEM encoded certificates, one per entry
    fn system_certificates(&self) -> Vec<String>;
}

/// [`TrustStore`] reading the platform certificate store
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTrustStore;

impl TrustStore for NativeTrustStore {
    fn system_certificates(&self) -> Vec<String> {
        let result = rustls_native_certs::load_native_certs();

        for err in &result.errors {
            warn!("Failed to load system certificate: {}", err);
        }

        debug!("Loaded {} system certificates", result.certs.len());

        result
            .certs
            .iter()
            .map(|cert| der_to_pem(cert.as_ref()))
            .collect()
    }
}

/// Wrap a DER certificate in PEM armor
pub(crate) fn der_to_pem(der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);
    let mut pem = String::with_capacity(encoded.len() + encoded.len() / 64 + 64);

    pem.push_str("-----BEGIN CERTIFICATE-----\n");
    for line in encoded.as_bytes().chunks(64) {
        // base64 output is ASCII
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str("-----END CERTIFICATE-----\n");

    pem
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_local_file_system_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<definitions/>").unwrap();

        let contents = LocalFileSystem.read_file(file.path()).unwrap();
        assert_eq!(contents, b"<definitions/>");
    }

    #[test]
    fn test_local_file_system_missing_file() {
        let err = LocalFileSystem
            .read_file(Path::new("/definitely/not/here.bpmn"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_map_flags() {
        let mut flags = HashMap::new();
        flags.insert(ZEEBE_SSL_CERTIFICATE.to_string(), "/etc/ca.pem".to_string());

        assert_eq!(
            Flags::get(&flags, ZEEBE_SSL_CERTIFICATE).as_deref(),
            Some("/etc/ca.pem")
        );
        assert_eq!(Flags::get(&flags, "other"), None);
    }

    #[test]
    fn test_der_to_pem_wraps_lines() {
        let der = vec![0u8; 100];
        let pem = der_to_pem(&der);

        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(pem.ends_with("-----END CERTIFICATE-----\n"));
        assert!(pem.lines().all(|line| line.len() <= 64));
    }
}
