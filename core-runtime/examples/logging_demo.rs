//! Logging system demonstration
//!
//! This example shows how to use the logging infrastructure in different modes.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format
//! cargo run --example logging_demo -- compact
//!
//! # With custom filter
//! cargo run --example logging_demo -- pretty "core_runtime=trace"
//! ```

use bridge_traits::time::LogLevel;
use core_runtime::logging::{
    init_logging, redact_if_sensitive, strip_query, LogFormat, LoggingConfig,
};
use std::env;
use tracing::{debug, error, info, instrument, span, trace, warn, Level};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let format = if args.len() > 1 {
        match args[1].as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Pretty,
        }
    } else {
        LogFormat::default()
    };

    let filter = args.get(2).cloned();

    // Initialize logging
    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_pii_redaction(true)
        .with_spans(true)
        .with_target(true);

    if let Some(f) = filter {
        config = config.with_filter(f);
    }

    init_logging(config).expect("Failed to initialize logging");

    info!("=== Logging System Demo ===");
    info!(format = ?format, "Logging initialized");

    // Demonstrate different log levels
    demo_log_levels();

    // Demonstrate structured logging
    demo_structured_logging();

    // Demonstrate spans for tracing
    demo_spans().await;

    // Demonstrate PII redaction
    demo_pii_redaction();

    // Demonstrate instrumentation
    demo_instrumentation().await;

    info!("=== Demo Complete ===");
}

fn demo_log_levels() {
    let span = span!(Level::INFO, "log_levels");
    let _enter = span.enter();

    trace!("This is a TRACE level log");
    debug!("This is a DEBUG level log");
    info!("This is an INFO level log");
    warn!("This is a WARN level log");
    error!("This is an ERROR level log");
}

fn demo_structured_logging() {
    let span = span!(Level::INFO, "structured_logging");
    let _enter = span.enter();

    info!("Simple message without fields");

    info!(
        floor_id = "m2033625",
        space_count = 42,
        seat_count = 120,
        "Floor information"
    );

    info!(
        tile_requests = 64,
        cache_hits = 33,
        cache_hit_rate = 0.52,
        "Tile cache metrics"
    );
}

async fn demo_spans() {
    let span = span!(Level::INFO, "token_refresh", grant = "refresh_token");
    let _enter = span.enter();

    info!("Starting token refresh");

    {
        let inner_span = span!(Level::DEBUG, "load_credentials");
        let _inner = inner_span.enter();

        debug!(has_refresh_token = true, "Loaded stored credentials");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    {
        let inner_span = span!(Level::DEBUG, "token_endpoint");
        let _inner = inner_span.enter();

        debug!(status = 200, "Token endpoint responded");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    info!(expires_in = 3600, "Token refresh completed");
}

fn demo_pii_redaction() {
    let span = span!(Level::INFO, "pii_redaction");
    let _enter = span.enter();

    // These values will be automatically redacted by our helper
    let token = "secret_access_token_12345";
    let email = "user@example.com";
    let callback_url = "https://viewer.example.com/plan?code=one_time_code";

    info!(
        token = %redact_if_sensitive("access_token", token),
        email = %redact_if_sensitive("email", email),
        url = %strip_query(callback_url),
        "Sensitive data example"
    );

    // Best practice: Don't log sensitive values at all
    info!("Authentication successful for user");
    // Instead of: info!(code = authorization_code, "Auth successful")
}

#[instrument]
async fn demo_instrumentation() {
    info!("Instrumented function automatically creates spans");

    let floors = vec!["m2033625", "m2033626", "m2033627"];
    load_floors(&floors).await;
}

#[instrument(fields(count = floors.len()))]
async fn load_floors(floors: &[&str]) {
    debug!("Loading floors");

    for (idx, floor) in floors.iter().enumerate() {
        load_floor(idx, floor).await;
    }

    info!("All floors loaded");
}

#[instrument(fields(floor_index = idx))]
async fn load_floor(idx: usize, floor: &str) {
    trace!(floor_id = %floor, "Loading individual floor");
    tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
}
