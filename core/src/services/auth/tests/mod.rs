//! Tests for the login blocker
