//! Best-effort per-user lock so concurrent refreshes do not all hit the provider.
//!
//! The lock is advisory: it expires on its own after a TTL, and the engine never
//! blocks on it.

use anyhow::Result;
use async_trait::async_trait;
use redis::Client as RedisClient;
use uuid::Uuid;

#[async_trait]
pub trait RefreshLock: Send + Sync {
    /// `Ok(true)` if this caller now owns the refresh for `user_id`.
    async fn try_acquire(&self, user_id: Uuid) -> Result<bool>;

    async fn release(&self, user_id: Uuid) -> Result<()>;
}

/// `SET key 1 NX EX ttl` on Redis.
pub struct RedisRefreshLock {
    client: RedisClient,
    ttl_secs: u64,
}

impl RedisRefreshLock {
    pub fn new(client: RedisClient, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }
}

fn lock_key(user_id: Uuid) -> String {
    format!("recommendations:refresh:{user_id}")
}

#[async_trait]
impl RefreshLock for RedisRefreshLock {
    async fn try_acquire(&self, user_id: Uuid) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(lock_key(user_id))
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn release(&self, user_id: Uuid) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("DEL")
            .arg(lock_key(user_id))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_key_is_scoped_per_user() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_ne!(lock_key(a), lock_key(b));
        assert!(lock_key(a).starts_with("recommendations:refresh:"));
    }
}
