// Shared helpers for integration tests
//
// Each test binary compiles this module separately and uses a different
// subset of it.

#![allow(dead_code)]

pub mod fake_hrm;

use fake_hrm::{BASE_URL, FakeHrm};
use orangehrm_e2e::{Scenario, ScenarioFactory, SuiteConfig, Timeouts};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Installs a test-friendly tracing subscriber; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Timeouts scaled down for the in-memory application.
pub fn fast_timeouts() -> Timeouts {
    Timeouts {
        short: Duration::from_millis(200),
        default: Duration::from_millis(400),
        page_load: Duration::from_millis(1_000),
        action: Duration::from_millis(1_000),
    }
}

pub fn fake_config(workdir: &Path) -> SuiteConfig {
    SuiteConfig::builder()
        .base_url(BASE_URL)
        .expect("valid base URL")
        .timeouts(fast_timeouts())
        .storage_state_path(workdir.join(".auth/user.json"))
        .reports_dir(workdir.join("reports"))
        .build()
        .expect("valid config")
}

/// A scenario attached to `fake`, with files under `workdir`.
pub fn attach(fake: &Arc<FakeHrm>, workdir: &Path) -> Scenario {
    ScenarioFactory::new(fake_config(workdir)).attach(fake.clone())
}
