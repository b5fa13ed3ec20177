//! Open-file policy gate.
//!
//! Local file opening (desktop integration) is an optional capability
//! supplied by the embedding environment through an [`OpenFilePolicy`]
//! provider. The gate probes for the provider on demand: if none is
//! installed, that negative result is memoized for the rest of the process
//! and the warning is logged once. An installed provider is queried fresh on
//! every call, since its decision may be request-scoped.
//!
//! Install a provider at process start with [`install_provider`]; renders
//! consult the global [`OPEN_FILE_GATE`] unless their environment supplies a
//! different gate.

use std::sync::{
    Arc, LazyLock, OnceLock,
    atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;

use crate::log;
use crate::render::RenderEnv;

/// Decides whether local file opening is allowed for a render.
pub trait OpenFilePolicy: Send + Sync {
    fn is_allowed(&self, env: &RenderEnv<'_>) -> bool;
}

/// Locates the optional provider. Invoked under the probe lock.
type PolicyResolver = dyn Fn() -> Option<Arc<dyn OpenFilePolicy>> + Send + Sync;

/// Capability gate with a probe-once negative cache.
pub struct OpenFileGate {
    resolver: Box<PolicyResolver>,
    /// Set once the resolver reports the provider absent; never cleared.
    missing: AtomicBool,
    /// Spans the probe-and-cache step.
    probe_lock: Mutex<()>,
}

impl OpenFileGate {
    pub fn with_resolver(
        resolver: impl Fn() -> Option<Arc<dyn OpenFilePolicy>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            resolver: Box::new(resolver),
            missing: AtomicBool::new(false),
            probe_lock: Mutex::new(()),
        }
    }

    /// Whether local file opening is allowed in this environment.
    ///
    /// Lock-free once the provider has been detected absent.
    pub fn is_allowed(&self, env: &RenderEnv<'_>) -> bool {
        if self.missing.load(Ordering::Acquire) {
            return false;
        }
        let _probe = self.probe_lock.lock();
        if self.missing.load(Ordering::Relaxed) {
            return false;
        }
        match (self.resolver)() {
            Some(policy) => policy.is_allowed(env),
            None => {
                log!(
                    "openfile";
                    "local file opening unavailable; install an open-file policy provider for desktop integration"
                );
                self.missing.store(true, Ordering::Release);
                false
            }
        }
    }
}

impl std::fmt::Debug for OpenFileGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenFileGate")
            .field("missing", &self.missing.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Process-wide provider registry, populated once at startup.
static PROVIDER: OnceLock<Arc<dyn OpenFilePolicy>> = OnceLock::new();

/// Install the open-file policy provider. Returns `false` when a provider
/// was already installed (the first one wins).
///
/// Must happen before the first render that could use local open: once the
/// global gate has probed and found no provider, the negative result sticks
/// for the process lifetime.
pub fn install_provider(provider: Arc<dyn OpenFilePolicy>) -> bool {
    PROVIDER.set(provider).is_ok()
}

/// Global gate used by default render environments.
pub static OPEN_FILE_GATE: LazyLock<OpenFileGate> =
    LazyLock::new(|| OpenFileGate::with_resolver(|| PROVIDER.get().cloned()));

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct FixedPolicy(bool);

    impl OpenFilePolicy for FixedPolicy {
        fn is_allowed(&self, _env: &RenderEnv<'_>) -> bool {
            self.0
        }
    }

    #[test]
    fn test_absent_provider_probed_once() {
        let probes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&probes);
        let gate = OpenFileGate::with_resolver(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        });
        let env = RenderEnv::new("");

        assert!(!gate.is_allowed(&env));
        assert!(!gate.is_allowed(&env));
        assert_eq!(probes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_present_provider_queried_every_call() {
        let queries = Arc::new(AtomicUsize::new(0));

        struct CountingPolicy(Arc<AtomicUsize>);
        impl OpenFilePolicy for CountingPolicy {
            fn is_allowed(&self, _env: &RenderEnv<'_>) -> bool {
                self.0.fetch_add(1, Ordering::SeqCst);
                true
            }
        }

        let policy: Arc<dyn OpenFilePolicy> = Arc::new(CountingPolicy(Arc::clone(&queries)));
        let gate = OpenFileGate::with_resolver(move || Some(Arc::clone(&policy)));
        let env = RenderEnv::new("");

        assert!(gate.is_allowed(&env));
        assert!(gate.is_allowed(&env));
        assert_eq!(queries.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_policy_answer_passes_through() {
        let denying: Arc<dyn OpenFilePolicy> = Arc::new(FixedPolicy(false));
        let gate = OpenFileGate::with_resolver(move || Some(Arc::clone(&denying)));
        let env = RenderEnv::new("");
        assert!(!gate.is_allowed(&env));
    }
}
