//! Classical conceptual aircraft sizing.
//!
//! The workspace crates are re-exported here so front-ends depend on a single crate:
//! constraint diagrams live in [`constraint`], fuel-fraction weight sizing in [`weight`],
//! and [`study`] binds study manifests to both engines.

pub mod study;

pub use sizing_aero as aero;
pub use sizing_config as config;
pub use sizing_constraint as constraint;
pub use sizing_core as physics;
pub use sizing_export as export;
pub use sizing_weight as weight;

/// Install the stderr tracing subscriber used by the command-line tools.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
