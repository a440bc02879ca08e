//! Tests for resolver services
