//! Shared embedded PostgreSQL cluster for integration tests.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` by default, which
//! sandboxed runners often forbid. When `PG_RUNTIME_DIR` or `PG_DATA_DIR` is
//! unset both are pointed under the Cargo target directory for the duration
//! of the bootstrap. Root runners hand the unprivileged half of the work to
//! the crate's `pg_worker` binary via `PG_EMBEDDED_WORKER`.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

static PG_EMBED_BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;
const STABLE_PASSWORD: &str = "tracker_embedded_test";

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

/// Binary downloads fail intermittently when suites start in parallel.
fn is_transient_error(err: &str) -> bool {
    const TRANSIENT: [&str; 6] = [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "temporarily unavailable",
        "dns error",
    ];
    let lower = err.to_lowercase();
    TRANSIENT.iter().any(|pattern| lower.contains(pattern))
}

/// Run the bootstrap, turning a panic inside the helper crate into an error
/// so suites can skip instead of aborting.
fn bootstrap_cluster() -> Result<&'static ClusterHandle, String> {
    panic::catch_unwind(AssertUnwindSafe(
        pg_embedded_setup_unpriv::test_support::shared_cluster_handle,
    ))
    .map_err(|payload| panic_message(payload.as_ref()))?
    .map_err(|err| format!("{err:?}"))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|msg| (*msg).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned());
    format!("embedded cluster bootstrap panicked: {detail}")
}

/// Return the process-wide cluster, bootstrapping it on first use.
///
/// The data directory is stable across test binaries, so the password is
/// pinned too; a regenerated password would not match the existing cluster.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _bootstrap_guard = PG_EMBED_BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let base = pg_embed_target_dir().join("shared");
    let mut overrides = vec![(
        "PG_PASSWORD",
        Some(std::env::var("PG_PASSWORD").unwrap_or_else(|_| STABLE_PASSWORD.to_owned())),
    )];
    if std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none() {
        let runtime_dir = base.join("install");
        let data_dir = base.join("data");
        std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
        std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;
        overrides.push((
            "PG_RUNTIME_DIR",
            Some(runtime_dir.to_string_lossy().into_owned()),
        ));
        overrides.push(("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())));
    }
    if std::env::var_os("PG_EMBEDDED_WORKER").is_none() {
        overrides.push((
            "PG_EMBEDDED_WORKER",
            Some(env!("CARGO_BIN_EXE_pg_worker").to_owned()),
        ));
    }
    let _env_guard = env_lock::lock_env(overrides);

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match bootstrap_cluster() {
            Ok(handle) => return Ok(handle),
            Err(err) => {
                last_error = err;
                if attempt == MAX_RETRIES || !is_transient_error(&last_error) {
                    break;
                }
                let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                eprintln!(
                    "pg-embed: transient error on attempt {}/{}, retrying in {delay:?}: {last_error}",
                    attempt + 1,
                    MAX_RETRIES + 1,
                );
                std::thread::sleep(delay);
            }
        }
    }
    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bootstrap_panics_become_errors() {
        let outcome: Result<(), String> = panic::catch_unwind(|| panic!("no worker binary"))
            .map_err(|payload| panic_message(payload.as_ref()));
        let message = outcome.expect_err("panic is captured");
        assert!(message.contains("bootstrap panicked"), "got: {message}");
        assert!(message.contains("no worker binary"), "got: {message}");
    }

    #[rstest]
    #[case("connection reset by peer", true)]
    #[case("permission denied", false)]
    fn transient_errors_are_recognised(#[case] raw: &str, #[case] transient: bool) {
        assert_eq!(is_transient_error(raw), transient);
    }
}
