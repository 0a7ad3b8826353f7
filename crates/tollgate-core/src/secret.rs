//! Shared signing secret

use std::fmt;

/// Symmetric key used to sign and verify tokens.
///
/// Every component that trusts the same tokens must be built from the same
/// secret value. The key bytes never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Wrap raw key material
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self(secret.as_ref().to_vec())
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret([redacted; {} bytes])", self.0.len())
    }
}

impl From<String> for SharedSecret {
    fn from(secret: String) -> Self {
        Self(secret.into_bytes())
    }
}

impl From<&str> for SharedSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = SharedSecret::from("hunter2-hunter2");
        let rendered = format!("{:?}", secret);

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("15 bytes"));
    }

    #[test]
    fn test_empty_secret() {
        assert!(SharedSecret::from("").is_empty());
        assert!(!SharedSecret::from("k").is_empty());
    }
}
