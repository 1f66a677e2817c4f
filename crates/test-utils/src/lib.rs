pub mod builders;

use std::sync::Once;

use cachebound::logging::{LOG_ENV, env_filter};
use tracing_subscriber::fmt;

static INIT: Once = Once::new();

/// Route crate logs into the per-test capture buffer, filtered the same way
/// as the binary (`CACHEBOUND_LOG=debug cargo test` to see more). Output only
/// shows up for failing tests unless `--nocapture` is passed.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(env_filter(std::env::var(LOG_ENV).ok().as_deref()))
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Deterministic random source for tests.
pub fn seeded_rng(seed: u64) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(seed)
}
