//! HTTP transport used by the Discord client.
//!
//! Serenity is handed a reqwest client with a bounded idle pool, TCP
//! keep-alive and a DNS resolver that reuses answers for a fixed time.

use crate::error::{BotError, BotResult};
use dashmap::DashMap;
use nightcore_common::format_millis;
use nightcore_config::TransportConfig;
use poise::serenity_prelude as serenity;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct CachedAddrs {
    addrs: Vec<SocketAddr>,
    resolved_at: Instant,
}

/// Host name to resolved addresses, each entry valid for `ttl`.
#[derive(Debug)]
pub struct DnsCache {
    entries: DashMap<String, CachedAddrs>,
    ttl: Duration,
}

impl DnsCache {
    /// Creates an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Cached addresses for `host`, dropping the entry once it has expired.
    pub fn get(&self, host: &str) -> Option<Vec<SocketAddr>> {
        self.entries
            .remove_if(host, |_, cached| cached.resolved_at.elapsed() >= self.ttl);
        self.entries.get(host).map(|cached| cached.addrs.clone())
    }

    /// Stores a fresh answer for `host`.
    pub fn insert(&self, host: impl Into<String>, addrs: Vec<SocketAddr>) {
        self.entries.insert(
            host.into(),
            CachedAddrs {
                addrs,
                resolved_at: Instant::now(),
            },
        );
    }

    /// Number of cached hosts, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// reqwest resolver backed by [`DnsCache`] and the system resolver.
#[derive(Debug, Clone)]
pub struct CachingResolver {
    cache: Arc<DnsCache>,
}

impl CachingResolver {
    /// Creates a resolver whose answers live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(DnsCache::new(ttl)),
        }
    }
}

impl Resolve for CachingResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let cache = Arc::clone(&self.cache);
        let host = name.as_str().to_string();
        Box::pin(async move {
            let addrs = lookup(&cache, host).await?;
            Ok::<Addrs, Box<dyn std::error::Error + Send + Sync>>(Box::new(addrs.into_iter()))
        })
    }
}

async fn lookup(cache: &DnsCache, host: String) -> std::io::Result<Vec<SocketAddr>> {
    if let Some(addrs) = cache.get(&host) {
        return Ok(addrs);
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0)).await?.collect();
    debug!("Resolved {} to {} addresses", host, addrs.len());
    cache.insert(host, addrs.clone());
    Ok(addrs)
}

/// Builds the reqwest client used for every Discord REST call.
pub fn build_http_client(config: &TransportConfig) -> BotResult<reqwest::Client> {
    let resolver = Arc::new(CachingResolver::new(config.dns_cache_ttl()));

    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(config.pool_limit)
        .pool_idle_timeout(config.keepalive())
        .tcp_keepalive(config.keepalive())
        .dns_resolver(resolver)
        .build()?;

    Ok(client)
}

/// Builds serenity's HTTP handle on top of `client`.
pub fn build_http(token: &str, client: reqwest::Client) -> serenity::Http {
    serenity::HttpBuilder::new(token).client(client).build()
}

/// Requests the bot gateway once, warming the connection pool.
///
/// Returns how long the request took.
pub async fn warm_gateway(http: &serenity::Http, timeout: Duration) -> BotResult<Duration> {
    let started = Instant::now();
    tokio::time::timeout(timeout, http.get_bot_gateway())
        .await
        .map_err(|_| BotError::Timeout("gateway discovery"))??;

    let elapsed = started.elapsed();
    info!("[gateway] Fetched bot gateway in {}ms", format_millis(elapsed));
    Ok(elapsed)
}

/// Http routed to a local listener that accepts connections and never answers.
#[cfg(test)]
pub(crate) async fn unresponsive_http(config: &TransportConfig) -> serenity::Http {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    serenity::HttpBuilder::new("unused-token")
        .client(build_http_client(config).unwrap())
        .proxy(format!("http://{address}"))
        .ratelimiter_disabled(true)
        .build()
}
