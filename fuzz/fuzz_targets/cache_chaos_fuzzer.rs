//! Fuzz target for the offline cache under network chaos
//!
//! # Strategy
//!
//! - Random seed and failure rate for the chaotic network
//! - Random version bumps between installs
//! - Random offline windows during fetches
//!
//! # Invariants
//!
//! - Install is all-or-nothing
//! - After activation only the current cache remains
//! - A fetch of an installed asset never fails, online or not

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealpost_cache::{
    storage::{CacheStorage, MemoryCache},
    CacheProxy, Manifest, Request, DEFAULT_ASSETS,
};
use sealpost_harness::{ChaoticNetwork, SimNetwork};

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Install { version: u8 },
    Fetch { asset: u8 },
    SetOffline(bool),
}

#[derive(Debug, Clone, Arbitrary)]
struct Scenario {
    seed: u64,
    failure_percent: u8,
    steps: Vec<Step>,
}

fuzz_target!(|scenario: Scenario| {
    let origin = SimNetwork::serving(DEFAULT_ASSETS.iter().map(|path| (*path, *path)));
    let rate = f64::from(scenario.failure_percent % 101) / 100.0;
    let network = ChaoticNetwork::with_seed(origin.clone(), rate, scenario.seed);
    let storage = MemoryCache::new();
    let mut installed: Option<String> = None;

    futures::executor::block_on(async {
        for step in scenario.steps {
            match step {
                Step::Install { version } => {
                    let proxy = CacheProxy::new(network.clone(), storage.clone(), Manifest::new(version.to_string()));
                    let name = proxy.cache_name();
                    let before = storage.entry_count(&name);
                    match proxy.install().await {
                        Ok(count) => {
                            assert_eq!(count, DEFAULT_ASSETS.len());
                            proxy.activate().unwrap();
                            assert_eq!(storage.cache_names().unwrap(), vec![name.clone()]);
                            installed = Some(name);
                        }
                        Err(_) => assert_eq!(storage.entry_count(&name), before),
                    }
                }
                Step::Fetch { asset } => {
                    let path = DEFAULT_ASSETS[usize::from(asset) % DEFAULT_ASSETS.len()];
                    let proxy = CacheProxy::new(network.clone(), storage.clone(), Manifest::new("0"));
                    let result = proxy.fetch(&Request::get(path)).await;
                    if installed.is_some() {
                        assert_eq!(result.unwrap().body, path.as_bytes());
                    }
                }
                Step::SetOffline(offline) => origin.set_offline(offline),
            }
        }
    });
});
