//! Tests for core business logic
