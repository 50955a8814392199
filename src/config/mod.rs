// ABOUTME: Configuration module exposing environment-based server settings
// ABOUTME: Re-exports the environment configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Configuration management.

pub mod environment;

pub use environment::{AuthConfig, DatabaseUrl, Environment, LogLevel, ServerConfig, SmtpConfig};
