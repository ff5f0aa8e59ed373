use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::canonicalizer::CanonicalDocument;
use crate::encode::{to_json_value, EncodeError, LeafEncoder};

/// Supported digest algorithms for fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlg {
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Algorithm + bytes digest, encoded as base64url without padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm.
    pub alg: DigestAlg,
    /// Base64URL (no padding) digest bytes.
    #[serde(rename = "b64")]
    pub b64: String,
}

impl Digest {
    /// SHA-256 digest of `bytes`.
    pub fn sha256(bytes: &[u8]) -> Self {
        let hash = Sha256::digest(bytes);
        Digest {
            alg: DigestAlg::Sha256,
            b64: URL_SAFE_NO_PAD.encode(hash),
        }
    }
}

/// RFC 8785 bytes of a canonical document and their digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Canonical UTF-8 JSON bytes.
    pub bytes: Vec<u8>,
    /// Digest over `bytes`.
    pub digest: Digest,
}

/// Computes the fingerprint of a canonical document.
///
/// Documents whose canonical forms are equal have equal fingerprints, so the
/// digest can stand in for the document when comparing across processes.
pub fn fingerprint(
    document: &CanonicalDocument,
    encoder: Option<&dyn LeafEncoder>,
) -> Result<Fingerprint, EncodeError> {
    let value = to_json_value(document.as_document(), encoder)?;
    let canonical =
        canonical_json::to_string(&value).map_err(|err| EncodeError::Canonical(err.to_string()))?;
    let bytes = canonical.into_bytes();
    let digest = Digest::sha256(&bytes);
    Ok(Fingerprint { bytes, digest })
}
