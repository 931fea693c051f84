//! Test Module
//!
//! Test suite for the exam coach core.
//!
//! ## Test Categories
//! - `brain_tests`: Intent cascade ordering, totality and purity
//! - `integration_tests`: Responder state, bounded memory, statistics, config-built responders
//! - `actor_tests`: Coach actor request/reply, serialization and shutdown
//! - `sentiment_tests`: HTTP sentiment backend and neutral fallback

pub mod actor_tests;
