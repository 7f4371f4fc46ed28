//! Root certificate resolution for encrypted gateway connections

use crate::services::{FileSystem, Flags, TrustStore, ZEEBE_SSL_CERTIFICATE};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use x509_parser::pem::parse_x509_pem;

/// Ordered list of PEM root certificates.
///
/// An administrator supplied certificate always comes first, followed by the
/// certificates exported from the operating system trust store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsMaterial {
    root_certs: Vec<String>,
}

impl TlsMaterial {
    /// Collect trust material from the custom certificate flag and the OS.
    ///
    /// Read or parse failures of the custom certificate are logged and the
    /// certificate is skipped; they never fail client construction.
    pub fn resolve(flags: &dyn Flags, fs: &dyn FileSystem, trust_store: &dyn TrustStore) -> Self {
        let custom = flags
            .get(ZEEBE_SSL_CERTIFICATE)
            .filter(|path| !path.is_empty())
            .and_then(|path| read_root_certificate(fs, &path));

        Self::from_parts(custom, trust_store.system_certificates())
    }

    pub fn from_parts(custom: Option<String>, system: Vec<String>) -> Self {
        let mut root_certs = Vec::with_capacity(system.len() + 1);
        root_certs.extend(custom);
        root_certs.extend(system);

        Self { root_certs }
    }

    pub fn certificates(&self) -> &[String] {
        &self.root_certs
    }

    pub fn is_empty(&self) -> bool {
        self.root_certs.is_empty()
    }

    /// All certificates concatenated into a single PEM bundle
    pub fn pem_bundle(&self) -> Vec<u8> {
        self.root_certs.join("\n").into_bytes()
    }
}

/// Read and validate the certificate at `cert_path`.
///
/// Relative paths resolve against the current working directory.
pub fn read_root_certificate(fs: &dyn FileSystem, cert_path: &str) -> Option<String> {
    let path = match resolve_path(cert_path) {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to read custom SSL certificate: {}", e);
            return None;
        }
    };

    let contents = match fs.read_file(&path) {
        Ok(contents) => contents,
        Err(e) => {
            error!(
                "Failed to read custom SSL certificate {}: {}",
                path.display(),
                e
            );
            return None;
        }
    };

    let (_, pem) = match parse_x509_pem(&contents) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Failed to parse custom SSL certificate: {}", e);
            return None;
        }
    };

    match pem.parse_x509() {
        Ok(cert) => {
            if cert.issuer().as_raw() != cert.subject().as_raw() {
                warn!("Custom SSL certificate appears to be not a root certificate");
            }
        }
        Err(e) => {
            warn!("Failed to parse custom SSL certificate: {}", e);
            return None;
        }
    }

    debug!("Using custom SSL certificate from {}", path.display());

    Some(String::from_utf8_lossy(&contents).into_owned())
}

fn resolve_path(cert_path: &str) -> std::io::Result<PathBuf> {
    let path = Path::new(cert_path);

    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LocalFileSystem;
    use std::collections::HashMap;

    const ROOT_CA: &str = include_str!("../tests/fixtures/root-ca.pem");
    const LEAF: &str = include_str!("../tests/fixtures/leaf.pem");

    struct StaticTrustStore(Vec<String>);

    impl TrustStore for StaticTrustStore {
        fn system_certificates(&self) -> Vec<String> {
            self.0.clone()
        }
    }

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn flags_with_cert(path: &str) -> HashMap<String, String> {
        let mut flags = HashMap::new();
        flags.insert(ZEEBE_SSL_CERTIFICATE.to_string(), path.to_string());
        flags
    }

    #[test]
    fn test_custom_certificate_comes_first() {
        let flags = flags_with_cert(&fixture("root-ca.pem"));
        let store = StaticTrustStore(vec!["SYSTEM-A".to_string(), "SYSTEM-B".to_string()]);

        let material = TlsMaterial::resolve(&flags, &LocalFileSystem, &store);

        assert_eq!(material.certificates().len(), 3);
        assert_eq!(material.certificates()[0], ROOT_CA);
        assert_eq!(material.certificates()[1], "SYSTEM-A");
        assert_eq!(material.certificates()[2], "SYSTEM-B");
    }

    #[test]
    fn test_non_root_certificate_is_still_used() {
        let cert = read_root_certificate(&LocalFileSystem, &fixture("leaf.pem"));
        assert_eq!(cert.as_deref(), Some(LEAF));
    }

    #[test]
    fn test_unparseable_certificate_is_skipped() {
        let flags = flags_with_cert(&fixture("garbage.pem"));
        let store = StaticTrustStore(vec!["SYSTEM".to_string()]);

        let material = TlsMaterial::resolve(&flags, &LocalFileSystem, &store);

        assert_eq!(material.certificates(), ["SYSTEM".to_string()]);
    }

    #[test]
    fn test_missing_certificate_file_is_skipped() {
        let flags = flags_with_cert("/no/such/ca.pem");
        let store = StaticTrustStore(vec![]);

        let material = TlsMaterial::resolve(&flags, &LocalFileSystem, &store);

        assert!(material.is_empty());
    }

    #[test]
    fn test_relative_path_resolves_against_cwd() {
        let resolved = resolve_path("certs/ca.pem").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("certs/ca.pem"));
    }

    #[test]
    fn test_pem_bundle_joins_with_newline() {
        let material = TlsMaterial::from_parts(Some("A".to_string()), vec!["B".to_string()]);
        assert_eq!(material.pem_bundle(), b"A\nB".to_vec());
    }
}
