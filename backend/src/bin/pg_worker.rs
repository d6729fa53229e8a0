//! Unprivileged PostgreSQL lifecycle helper for the embedded test cluster.
//!
//! When the integration suites run as root, `pg_embedded_setup_unpriv`
//! re-executes this binary as an unprivileged user with
//! `pg_worker <setup|start|stop> <payload.json>`. The payload is the crate's
//! own `WorkerPayload`, so it is deserialised as-is.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use color_eyre::eyre::{Context, Report, Result, bail, eyre};
use pg_embedded_setup_unpriv::worker::WorkerPayload;
use postgresql_embedded::PostgreSQL;

/// Lifecycle step requested by the cluster bootstrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Setup,
    Start,
    Stop,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl FromStr for Action {
    type Err = Report;

    fn from_str(raw: &str) -> Result<Self> {
        [Self::Setup, Self::Start, Self::Stop]
            .into_iter()
            .find(|action| action.as_str() == raw)
            .ok_or_else(|| eyre!("unsupported worker action `{raw}`; use setup, start or stop"))
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    action: Action,
    payload_path: PathBuf,
}

impl Invocation {
    /// Parse `argv`, including the program name in position zero.
    fn from_args(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter().skip(1);
        let action: Action = args
            .next()
            .ok_or_else(|| eyre!("usage: pg_worker <setup|start|stop> <payload.json>"))?
            .to_string_lossy()
            .parse()?;
        let payload_path = args
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("missing payload path after `{}`", action.as_str()))?;
        if let Some(extra) = args.next() {
            bail!("unexpected argument `{}`", extra.to_string_lossy());
        }
        Ok(Self {
            action,
            payload_path,
        })
    }
}

fn read_payload(path: &Path) -> Result<WorkerPayload> {
    let bytes = fs::read(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).wrap_err_with(|| format!("decoding {}", path.display()))
}

fn run(invocation: Invocation) -> Result<()> {
    let payload = read_payload(&invocation.payload_path)?;
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| Report::new(err).wrap_err("invalid postgres settings in payload"))?;

    for (key, value) in payload.environment {
        // SAFETY: the worker is single-threaded until the runtime below starts.
        match value {
            Some(value) => unsafe { env::set_var(&key, value.expose()) },
            None => unsafe { env::remove_var(&key) },
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("building worker runtime")?;
    let action = invocation.action;
    runtime
        .block_on(async move {
            let mut postgres = PostgreSQL::new(settings);
            match action {
                Action::Setup => postgres.setup().await,
                Action::Start => postgres.start().await,
                Action::Stop => postgres.stop().await,
            }
        })
        .wrap_err_with(|| format!("postgres {} failed", action.as_str()))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    run(Invocation::from_args(env::args_os())?)
}
