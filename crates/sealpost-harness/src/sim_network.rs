//! Simulated origins for the cache proxy.
//!
//! [`SimNetwork`] serves a mutable file map and can be taken offline.
//! [`ChaoticNetwork`] wraps any [`Network`] and drops requests at a configured
//! rate, deterministically from a seed, so failed installs and offline
//! fallbacks can be exercised without real sockets.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use sealpost_cache::{Network, NetworkError, Request, Response};

#[derive(Default)]
struct OriginState {
    files: HashMap<String, Vec<u8>>,
    offline: bool,
    fetches: usize,
}

/// In-memory origin. Unknown paths answer 404.
///
/// Clones share the same file map, so a test can keep a handle after moving
/// the network into a proxy.
#[derive(Clone, Default)]
pub struct SimNetwork {
    state: Arc<Mutex<OriginState>>,
}

impl SimNetwork {
    /// Create an empty, online origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an origin serving `files` as `(path, body)` pairs.
    pub fn serving<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let network = Self::new();
        for (path, body) in files {
            network.serve(path, body);
        }
        network
    }

    /// Serve `body` at `path`, replacing any previous content.
    pub fn serve(&self, path: &str, body: impl Into<Vec<u8>>) {
        self.lock().files.insert(Request::get(path).path().to_string(), body.into());
    }

    /// Stop serving `path`.
    pub fn remove(&self, path: &str) {
        self.lock().files.remove(Request::get(path).path());
    }

    /// Toggle connectivity. Offline fetches fail without a response.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Fetches attempted so far, including failed ones.
    pub fn fetch_count(&self) -> usize {
        self.lock().fetches
    }

    fn lock(&self) -> MutexGuard<'_, OriginState> {
        #[allow(clippy::expect_used)]
        self.state.lock().expect("SimNetwork mutex poisoned")
    }
}

impl Network for SimNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        let mut state = self.lock();
        state.fetches += 1;

        if state.offline {
            return Err(NetworkError::Unreachable("simulated offline".into()));
        }

        Ok(match state.files.get(request.path()) {
            Some(body) => Response::ok(body.clone()),
            None => Response { status: 404, body: b"not found".to_vec() },
        })
    }
}

/// Network wrapper that randomly drops requests.
///
/// Delegates to an underlying network but fails a fraction of fetches with
/// [`NetworkError::Unreachable`]. The RNG sits behind `Arc<Mutex<>>`, making
/// the wrapper `Clone` and reproducible for a given seed.
#[derive(Clone)]
pub struct ChaoticNetwork<N: Network> {
    inner: N,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    rng: Arc<Mutex<ChaoticRng>>,
    injected: Arc<Mutex<usize>>,
}

/// LCG for reproducible chaos.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0.0, 1.0)
    fn next(&mut self) -> f64 {
        // Numerical Recipes constants
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }
}

impl<N: Network> ChaoticNetwork<N> {
    /// Wrap `inner` with the default seed.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: N, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Wrap `inner` with an explicit seed.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn with_seed(inner: N, failure_rate: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&failure_rate),
            "failure_rate must be between 0.0 and 1.0, got {failure_rate}"
        );

        Self {
            inner,
            failure_rate,
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            injected: Arc::new(Mutex::new(0)),
        }
    }

    /// Underlying network.
    pub fn inner(&self) -> &N {
        &self.inner
    }

    /// Number of failures injected so far.
    pub fn injected_failures(&self) -> usize {
        #[allow(clippy::expect_used)]
        *self.injected.lock().expect("injected mutex poisoned")
    }

    fn should_fail(&self) -> bool {
        #[allow(clippy::expect_used)]
        let fail = self.rng.lock().expect("ChaoticRng mutex poisoned").next() < self.failure_rate;
        if fail {
            #[allow(clippy::expect_used)]
            let mut injected = self.injected.lock().expect("injected mutex poisoned");
            *injected += 1;
        }
        fail
    }
}

impl<N: Network> Network for ChaoticNetwork<N> {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        if self.should_fail() {
            tracing::debug!(path = request.path(), "injected network failure");
            return Err(NetworkError::Unreachable("chaos: injected failure".into()));
        }
        self.inner.fetch(request).await
    }
}
