//! Idempotency keys for mutating Graph API calls.
//!
//! Acknowledge, ship, cancel and refund calls carry a fresh key so the Graph
//! API can de-duplicate a request that the caller decides to resend. The
//! adapter itself never resends anything.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Name of the parameter carrying the key.
pub const IDEMPOTENCY_KEY_PARAM: &str = "idempotency_key";

/// A process-unique random token attached to a mutating request.
///
/// The key is the current time in microseconds (hex) followed by a random
/// alphanumeric suffix.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::graph::IdempotencyKey;
///
/// let first = IdempotencyKey::generate();
/// let second = IdempotencyKey::generate();
/// assert_ne!(first, second);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    const RANDOM_LENGTH: usize = 16;

    /// Generates a new key.
    #[must_use]
    pub fn generate() -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::RANDOM_LENGTH)
            .map(char::from)
            .collect();
        let micros = chrono::Utc::now().timestamp_micros();
        Self(format!("{micros:x}{suffix}"))
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
