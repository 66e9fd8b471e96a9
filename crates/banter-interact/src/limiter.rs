//! The submission rate limiter.
//!
//! A user who starts an intake session is marked in the TTL cache and stays
//! cooled down until the entry expires on its own, no matter how the
//! session ended. There is no release operation.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use banter_core::{CacheResult, TtlCache, UserId};

/// Cache-key prefix for intake cooldown entries ("jp" = job posting).
pub const KEY_PREFIX: &str = "jp-";

/// TTL-keyed gate preventing a user from starting a new intake session
/// while a prior one is in cooldown.
///
/// The cooldown key is derived from the user id alone, so it spans every
/// community the bot serves.
pub struct SubmissionLimiter {
    cache: Arc<dyn TtlCache>,
    cooldown: Duration,
}

impl SubmissionLimiter {
    /// Creates a limiter over `cache` with the given cooldown window.
    pub fn new(cache: Arc<dyn TtlCache>, cooldown: Duration) -> Self {
        Self { cache, cooldown }
    }

    /// Returns the deterministic cooldown key for `user`.
    pub fn cache_key(user: &UserId) -> String {
        format!("{KEY_PREFIX}{user}")
    }

    /// Attempts to open the gate for `user`.
    ///
    /// Returns `true` and starts the cooldown if no live entry exists;
    /// returns `false` if the user is still cooled down. The check and the
    /// insert are one atomic cache operation, so two concurrent attempts
    /// for the same user cannot both acquire. A cache failure is fatal for
    /// the attempt and surfaces as `Err`.
    pub async fn try_acquire(&self, user: &UserId) -> CacheResult<bool> {
        let key = Self::cache_key(user);
        let acquired = self.cache.insert_if_vacant(&key, self.cooldown).await?;
        if !acquired {
            debug!(user = %user, "Submission gate closed; cooldown entry still live");
        }
        Ok(acquired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::MemoryTtlCache;
    use banter_core::testing::FakeClock;

    const COOLDOWN: Duration = Duration::from_secs(12 * 60 * 60);

    fn limiter_with_clock() -> (SubmissionLimiter, Arc<FakeClock>) {
        let clock = Arc::new(FakeClock::new());
        let cache = Arc::new(MemoryTtlCache::with_clock(clock.clone()));
        (SubmissionLimiter::new(cache, COOLDOWN), clock)
    }

    #[tokio::test]
    async fn second_attempt_within_window_is_refused() {
        let (limiter, _clock) = limiter_with_clock();
        let user = UserId::from("alice");

        assert!(limiter.try_acquire(&user).await.unwrap());
        assert!(!limiter.try_acquire(&user).await.unwrap());
    }

    #[tokio::test]
    async fn gate_reopens_after_cooldown() {
        let (limiter, clock) = limiter_with_clock();
        let user = UserId::from("alice");

        assert!(limiter.try_acquire(&user).await.unwrap());
        clock.advance(COOLDOWN);
        assert!(limiter.try_acquire(&user).await.unwrap());
    }

    #[tokio::test]
    async fn distinct_users_do_not_share_a_gate() {
        let (limiter, _clock) = limiter_with_clock();

        assert!(limiter.try_acquire(&UserId::from("alice")).await.unwrap());
        assert!(limiter.try_acquire(&UserId::from("bob")).await.unwrap());
    }

    #[test]
    fn cache_key_is_prefixed_per_user() {
        assert_eq!(SubmissionLimiter::cache_key(&UserId::from("42")), "jp-42");
    }
}
