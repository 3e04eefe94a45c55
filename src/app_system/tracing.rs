//! Tracing setup.
//!
//! Configure once at startup; every actor and client span uses it.
//!
//! ```bash
//! RUST_LOG=debug cargo run    # request-level detail, including store requests
//! RUST_LOG=info cargo run     # one line per catalog operation
//! RUST_LOG=product_catalog::clients=debug,info cargo run
//! ```

/// Installs the global subscriber: `RUST_LOG` filtering (default `info`),
/// uptime timestamps, compact output.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
