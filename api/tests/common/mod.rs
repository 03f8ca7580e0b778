use std::{path::PathBuf, sync::Arc};

use axum_test::TestServer;
use bootcamp_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use clap::Parser;
use test_context::AsyncTestContext;

pub const DEVWORKS: &str = "0b000000-0000-4000-8000-000000000001";
pub const MODERNTECH: &str = "0b000000-0000-4000-8000-000000000002";
pub const DATA_SCIENCE_COURSE: &str = "0c000000-0000-4000-8000-000000000005";
pub const DEVWORKS_FIRST_REVIEW: &str = "0e000000-0000-4000-8000-000000000001";

pub fn seed_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")
}

/// A server over in-memory storage loaded with the bundled seed data.
pub struct ApiContext {
    pub server: TestServer,
}

impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        let seed_dir = seed_dir();
        let args = Args::parse_from([
            "bootcamp-api".to_string(),
            "--storage".to_string(),
            "memory".to_string(),
            "--server-metrics".to_string(),
            "false".to_string(),
            "--server-seed-dir".to_string(),
            seed_dir.display().to_string(),
        ]);

        let state = state(Arc::new(args)).await.expect("seeded state");
        let app = router(state).expect("router");

        Self {
            server: TestServer::try_new(app).expect("test server"),
        }
    }
}
