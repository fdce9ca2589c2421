pub mod builders;
pub mod fake_executor;

use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing_subscriber::{EnvFilter, fmt};

pub use fake_executor::{ExecEvent, FakeExecutor, wait_for_commands};

pub const TEST_SECRET: &str = "1111111111111111";

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Independent signer, so tests do not just check the crate against itself.
pub fn sign(secret: &str, body: &[u8], timestamp: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    mac.update(timestamp.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// `(x-timestamp, x-signature)` for `body`, signed now with [`TEST_SECRET`].
pub fn signed_headers(body: &[u8]) -> (String, String) {
    let ts = unix_now().to_string();
    let sig = sign(TEST_SECRET, body, &ts);
    (ts, sig)
}
