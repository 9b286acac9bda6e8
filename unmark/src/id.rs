//! Artifact key generation.
//!
//! Every stored artifact gets a fresh opaque key so that concurrent uploads
//! from different workers can never overwrite each other.

use uuid::Uuid;

/// Produces collision-resistant opaque keys.
///
/// Generation never blocks and never fails.
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs rendered as 32 lowercase hex characters (no hyphens).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeyGenerator;

impl KeyGenerator for UuidKeyGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_format() {
        let key = UuidKeyGenerator.generate();
        assert_eq!(key.len(), 32);
        assert!(!key.contains('-'));
        assert!(key
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<String> = (0..1000).map(|_| UuidKeyGenerator.generate()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let generator: std::sync::Arc<dyn KeyGenerator> = std::sync::Arc::new(UuidKeyGenerator);
        assert_ne!(generator.generate(), generator.generate());
    }
}
