//! Common utilities and types shared across Task Manager components.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for JWT utilities (size limit, expected algorithm, header inspection)
pub mod jwt;
