// Library surface for headless/integration tests and reuse.
pub mod api;
pub mod app;
pub mod app_dirs;
pub mod audiocall;
pub mod auth;
pub mod browse;
pub mod config;
pub mod history;
pub mod options;
pub mod progress;
pub mod runtime;
pub mod session;
pub mod sprint;
pub mod ui;
pub mod util;

/// Runner tick interval; the sprint countdown is derived from it.
pub const TICK_RATE_MS: u64 = 100;
