//! Context carrier
//!
//! Packages a resolved [`AuthorizationContext`] for reuse between
//! resolutions: the slot is time-boxed, explicitly refreshed, and
//! explicitly invalidated on logout or assignment change. The slot
//! holds an `Arc` that is replaced wholesale, so a
//! concurrent reader always observes one complete context, never new
//! roles with old menus.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use wicket_api_types::{AuthorizationContext, UserId};

use crate::config::RbacConfig;
use crate::error::RbacResult;
use crate::resolver::RbacResolver;

struct CachedContext {
    context: Arc<AuthorizationContext>,
    cached_at: Instant,
}

/// Time-boxed carrier for one user's authorization context
pub struct ContextCarrier {
    slot: RwLock<Option<CachedContext>>,
    ttl: Duration,
}

impl ContextCarrier {
    /// Create an empty carrier with the given freshness window
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Carrier configured from [`RbacConfig::context_ttl`]
    pub fn from_config(config: &RbacConfig) -> Self {
        Self::new(config.context_ttl())
    }

    /// The carried context, if one is present and still fresh.
    ///
    /// A stale entry is dropped on read; callers then refresh. Expiry
    /// never silently yields the old context.
    pub fn get(&self) -> Option<Arc<AuthorizationContext>> {
        {
            let slot = self.slot.read();
            match slot.as_ref() {
                Some(cached) if cached.cached_at.elapsed() < self.ttl => {
                    return Some(Arc::clone(&cached.context));
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry expired: take the write lock and clear it, unless a
        // concurrent refresh already replaced it with a fresh one.
        let mut slot = self.slot.write();
        if let Some(cached) = slot.as_ref() {
            if cached.cached_at.elapsed() < self.ttl {
                return Some(Arc::clone(&cached.context));
            }
            debug!("carried context expired");
            *slot = None;
        }
        None
    }

    /// Replace the carried context wholesale
    pub fn put(&self, context: AuthorizationContext) -> Arc<AuthorizationContext> {
        let context = Arc::new(context);
        let mut slot = self.slot.write();
        *slot = Some(CachedContext {
            context: Arc::clone(&context),
            cached_at: Instant::now(),
        });
        context
    }

    /// Resolve at login and seed the carrier in one step
    pub async fn login(
        &self,
        resolver: &RbacResolver,
        user_id: UserId,
    ) -> RbacResult<Arc<AuthorizationContext>> {
        self.refresh(resolver, user_id).await
    }

    /// Force re-resolution and replace the slot.
    ///
    /// Must be invoked whenever the underlying assignments could
    /// plausibly have changed: after any administrative RBAC mutation,
    /// at minimum on next login. A resolution failure leaves the slot
    /// untouched and propagates; the caller must not fall back to a
    /// stale context as a substitute.
    pub async fn refresh(
        &self,
        resolver: &RbacResolver,
        user_id: UserId,
    ) -> RbacResult<Arc<AuthorizationContext>> {
        let context = resolver.resolve(user_id).await?;
        Ok(self.put(context))
    }

    /// Fresh context if carried, otherwise re-resolve and seed
    pub async fn get_or_refresh(
        &self,
        resolver: &RbacResolver,
        user_id: UserId,
    ) -> RbacResult<Arc<AuthorizationContext>> {
        if let Some(context) = self.get() {
            return Ok(context);
        }
        self.refresh(resolver, user_id).await
    }

    /// Clear the slot; the trigger on logout and on assignment change
    pub fn invalidate(&self) {
        let mut slot = self.slot.write();
        if slot.take().is_some() {
            debug!("carried context invalidated");
        }
    }
}

/// Encode a context into the JSON transport envelope returned at login
pub fn encode_context(context: &AuthorizationContext) -> RbacResult<String> {
    Ok(serde_json::to_string(context)?)
}

/// Decode a context from the JSON transport envelope
pub fn decode_context(payload: &str) -> RbacResult<AuthorizationContext> {
    Ok(serde_json::from_str(payload)?)
}
