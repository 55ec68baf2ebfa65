/// Read-through caching against an optional [`Cache`](crate::db::Cache).
///
/// Looks the key up first; on a miss (or when no cache is configured, or Redis
/// is unavailable) awaits `$block`, queues the value for storage and returns it.
/// Errors from `$block` propagate with `?` and are never cached.
///
/// # Arguments
/// * `$cache`: an `Option<&Cache>`.
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) to read and write.
/// * `$ttl`: time-to-live for the stored value, in seconds.
/// * `$block`: future computing the value on a miss.
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let hit = match $cache {
            Some(cache) => cache.lookup(&key).await,
            None => None,
        };

        match hit {
            Some(cached) => Ok(cached),
            None => {
                let value = $block.await?;
                if let Some(cache) = $cache {
                    cache.set_in_background(&key, &value, $ttl);
                }
                Ok(value)
            }
        }
    }};
}
