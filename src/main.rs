// src/main.rs
//! StackTics: Under-Bed Packing Optimization Service
//!
//! A Rust service that places a heterogeneous set of boxes inside a
//! rectangular under-bed cavity, considering:
//! - Rotation, collision, and rounded-corner clearance
//! - Support, cumulative load, and fragility constraints
//! - Strategy-dependent scoring (pack tight vs. keep things accessible)

use stacktics::api;
use stacktics::config::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("⚠️ Could not load .env: {}", err);
        }
    }

    let app_config = AppConfig::from_env();

    println!("🚀 StackTics starting...");
    api::start_api_server(app_config.api).await;
}
