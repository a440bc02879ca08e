//! Shared fixtures for resolver integration tests

#![allow(dead_code)]

use shared::{Handedness, PitchInput, ScoringEndpoint};
use wiremock::MockServer;

use resolver::{RealScoringClient, StuffPlusResolver};

/// The reference fastball: 96 mph, 18" IVB, 8" HMOV, 2400 rpm.
/// Local formula scores it 101.82, bucket 75.
pub fn reference_fastball() -> PitchInput {
    PitchInput {
        pitch_type: "FF".to_string(),
        handedness: Handedness::R,
        release_speed: 96.0,
        pfx_x: 8.0,
        pfx_z: 18.0,
        release_extension: 6.0,
        release_spin_rate: 2400.0,
        spin_axis: 180.0,
        release_pos_x: 1.5,
        release_pos_z: 5.5,
        fb_velo: 96.0,
        fb_ivb: 18.0,
        fb_hmov: 8.0,
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

/// Resolver talking HTTP to a wiremock server
pub fn resolver_for(server: &MockServer) -> StuffPlusResolver<RealScoringClient> {
    let endpoint = ScoringEndpoint::parse(&server.uri()).expect("mock server uri");
    StuffPlusResolver::new(RealScoringClient::new(endpoint))
}

/// Resolver talking HTTP to an arbitrary base URL
pub fn resolver_at(base: &str) -> StuffPlusResolver<RealScoringClient> {
    let endpoint = ScoringEndpoint::parse(base).expect("valid base url");
    StuffPlusResolver::new(RealScoringClient::new(endpoint))
}

/// Base URL of a local port nothing listens on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let address = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{address}")
}
