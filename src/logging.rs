// SPDX-License-Identifier: MIT

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable that overrides the configured filter.
pub const ENV_VAR: &str = "TINCT_LOG";

/// Install a global `fmt` subscriber filtered by `TINCT_LOG`, or by `level`
/// when the variable is unset or invalid.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_env(ENV_VAR)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Err only when a global subscriber already exists.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init("debug");
        init("not a valid ::directive==");
        tracing::debug!("still logging");
    }
}
