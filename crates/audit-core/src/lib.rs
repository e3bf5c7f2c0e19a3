//! Audit-core crate: configuration and report rendering for the
//! `windows-security-audit` binary.

pub mod config;
pub mod report;
