//! Platform-windows crate: host security posture collection.
//!
//! Reads TPM, Secure Boot and per-volume BitLocker state through PowerShell
//! and normalizes it into flat [`DriveRecord`]s. Every collector degrades to a
//! defined fallback record instead of failing.

pub mod compliance;
pub mod shell;
mod windows_cmd;

#[cfg(test)]
mod test_support;

pub use compliance::{
    collect_posture, BitLockerFields, BootMode, DriveRecord, LockStatus, ProtectionStatus,
    Reading, SecureBootFacts, TpmFacts, VolumeHandle,
};
pub use shell::{PowerShell, PowerShellRunner, QueryError, QueryOutcome};
