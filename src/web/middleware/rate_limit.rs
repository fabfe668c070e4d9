//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::{Duration, Instant},
};

use crate::config::WebConfig;
use crate::web::error::ApiError;

/// Message returned once a client exceeds its quota.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Per-IP rate limiter using Governor.
pub type IpRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Limiter for one client plus the time it was last seen.
struct ClientLimiter {
    limiter: IpRateLimiter,
    /// Milliseconds since the owning state was created.
    last_seen_ms: AtomicU64,
}

/// State for rate limiting.
#[derive(Clone)]
pub struct RateLimitState {
    /// Per-IP rate limiters.
    limiters: Arc<RwLock<HashMap<String, Arc<ClientLimiter>>>>,
    /// Quota applied to each client.
    quota: Quota,
    /// Time after which an idle client's allowance is fully restored.
    window: Duration,
    /// Honour `X-Forwarded-For` / `X-Real-IP`.
    trust_proxy: bool,
    epoch: Instant,
}

impl RateLimitState {
    /// Allow `max` requests per `window` for each client.
    ///
    /// The full allowance is available as a burst and refills evenly over the
    /// window. Clients are keyed on the socket peer address.
    pub fn new(window: Duration, max: u32) -> Self {
        let burst = NonZeroU32::new(max).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiters: Arc::new(RwLock::new(HashMap::new())),
            quota,
            window,
            trust_proxy: false,
            epoch: Instant::now(),
        }
    }

    /// Limiter configured from the `[web]` section.
    pub fn from_config(config: &WebConfig) -> Self {
        Self::new(
            Duration::from_millis(config.rate_limit_window_ms),
            config.rate_limit_max,
        )
        .with_trust_proxy(config.trust_proxy)
    }

    /// Key clients on the forwarding headers set by a reverse proxy.
    ///
    /// Only enable this when every request passes through a proxy that
    /// overwrites those headers.
    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Get or create a rate limiter for the given IP.
    fn get_or_create_limiter(&self, ip: &str) -> Arc<ClientLimiter> {
        {
            let read_guard = self.limiters.read().unwrap_or_else(|e| e.into_inner());
            if let Some(limiter) = read_guard.get(ip) {
                return limiter.clone();
            }
        }

        let mut write_guard = self.limiters.write().unwrap_or_else(|e| e.into_inner());

        // Double-check after acquiring write lock
        if let Some(limiter) = write_guard.get(ip) {
            return limiter.clone();
        }

        let limiter = Arc::new(ClientLimiter {
            limiter: RateLimiter::direct(self.quota),
            last_seen_ms: AtomicU64::new(self.now_ms()),
        });
        write_guard.insert(ip.to_string(), limiter.clone());
        limiter
    }

    /// Check if a request from `ip` is allowed.
    pub fn check(&self, ip: &str) -> bool {
        let client = self.get_or_create_limiter(ip);
        client.last_seen_ms.store(self.now_ms(), Ordering::Relaxed);
        client.limiter.check().is_ok()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiters.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Drop limiters whose client has been idle for a whole window.
    ///
    /// Such a client has its full allowance back, so forgetting it does not
    /// change what it may send next.
    pub fn cleanup(&self) {
        let now = self.now_ms();
        let window_ms = u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX);
        let mut guard = self.limiters.write().unwrap_or_else(|e| e.into_inner());
        guard.retain(|_, client| {
            let idle = now.saturating_sub(client.last_seen_ms.load(Ordering::Relaxed));
            Arc::strong_count(client) > 1 || idle < window_ms
        });
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(CLEANUP_INTERVAL).await;
                self.cleanup();
            }
        });
    }

    /// Key identifying the client that sent `req`.
    fn client_key(&self, req: &Request<Body>) -> String {
        if self.trust_proxy {
            if let Some(ip) = forwarded_ip(req) {
                return ip;
            }
        }

        if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
            return addr.ip().to_string();
        }

        "unknown".to_string()
    }
}

/// Client IP as reported by a reverse proxy.
fn forwarded_ip(req: &Request<Body>) -> Option<String> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(ip) = forwarded.split(',').next().map(str::trim) {
            if !ip.is_empty() {
                return Some(ip.to_string());
            }
        }
    }

    header("x-real-ip").map(str::to_string)
}

/// Rate limiting middleware for every API route.
pub async fn api_rate_limit(
    State(state): State<Arc<RateLimitState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = state.client_key(&req);

    if !state.check(&ip) {
        tracing::warn!(ip = %ip, "API rate limit exceeded");
        return ApiError::too_many_requests(RATE_LIMIT_MESSAGE).into_response();
    }

    next.run(req).await
}
