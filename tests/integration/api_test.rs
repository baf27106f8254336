//! API endpoint integration tests
//!
//! Drives the composed router in-process with host-signed init data.

#![allow(dead_code)]

mod auth;
mod common;
mod health;
