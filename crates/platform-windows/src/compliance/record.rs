//! Per-drive posture record and the host-wide facts it embeds.

use std::fmt;

/// Sentinel text for a value that does not apply to the drive.
pub const NOT_APPLICABLE: &str = "N/A";
/// Sentinel text for a value whose query failed.
pub const ERROR: &str = "Error";

/// Host-wide TPM state, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TpmFacts {
    pub present: bool,
    pub ready: bool,
    pub owned: bool,
    pub spec_version: String,
}

impl TpmFacts {
    /// The record used whenever the TPM cannot be read.
    pub fn absent() -> Self {
        Self {
            present: false,
            ready: false,
            owned: false,
            spec_version: NOT_APPLICABLE.to_string(),
        }
    }
}

/// Firmware boot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootMode {
    Uefi,
    LegacyOrBios,
    Unknown,
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uefi => "UEFI",
            Self::LegacyOrBios => "Legacy/BIOS",
            Self::Unknown => "Unknown",
        })
    }
}

/// Host-wide Secure Boot state, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecureBootFacts {
    pub secure_boot_enabled: bool,
    pub boot_mode: BootMode,
}

impl SecureBootFacts {
    /// The record used whenever the Secure Boot query fails.
    pub fn unknown() -> Self {
        Self {
            secure_boot_enabled: false,
            boot_mode: BootMode::Unknown,
        }
    }
}

/// Opaque identifier of one fixed local volume, e.g. `C:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeHandle(String);

impl VolumeHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VolumeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// BitLocker protection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionStatus {
    Disabled,
    Unknown,
    On,
    NotApplicable,
    Error,
}

impl ProtectionStatus {
    /// Map a `Get-BitLockerVolume` protection code.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Disabled,
            Some(1) => Self::Unknown,
            Some(2) => Self::On,
            _ => Self::NotApplicable,
        }
    }
}

impl fmt::Display for ProtectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "Disabled",
            Self::Unknown => "Unknown",
            Self::On => "On",
            Self::NotApplicable => NOT_APPLICABLE,
            Self::Error => ERROR,
        })
    }
}

/// BitLocker lock status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    Unlocked,
    Locked,
    NotApplicable,
    Error,
}

impl LockStatus {
    /// Map a `Get-BitLockerVolume` lock code.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Unlocked,
            Some(1) => Self::Locked,
            _ => Self::NotApplicable,
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unlocked => "Unlocked",
            Self::Locked => "Locked",
            Self::NotApplicable => NOT_APPLICABLE,
            Self::Error => ERROR,
        })
    }
}

/// A per-drive value, or the sentinel explaining why there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading<T> {
    Value(T),
    NotApplicable,
    Error,
}

impl<T> Reading<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::NotApplicable | Self::Error => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        value.map(Self::Value).unwrap_or(Self::NotApplicable)
    }
}

impl<T: fmt::Display> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt::Display::fmt(value, f),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE),
            Self::Error => f.write_str(ERROR),
        }
    }
}

/// The BitLocker-derived half of a [`DriveRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitLockerFields {
    pub protection_status: ProtectionStatus,
    pub lock_status: LockStatus,
    pub encryption_method: Reading<String>,
    pub percentage_encrypted: Reading<u8>,
    pub key_protector_types: Reading<String>,
    pub auto_unlock: Reading<bool>,
}

impl BitLockerFields {
    /// Volume exists but has never been associated with BitLocker.
    pub fn no_association() -> Self {
        Self {
            protection_status: ProtectionStatus::Disabled,
            lock_status: LockStatus::NotApplicable,
            encryption_method: Reading::NotApplicable,
            percentage_encrypted: Reading::NotApplicable,
            key_protector_types: Reading::NotApplicable,
            auto_unlock: Reading::NotApplicable,
        }
    }

    /// The BitLocker query itself failed.
    pub fn query_error() -> Self {
        Self {
            protection_status: ProtectionStatus::Error,
            lock_status: LockStatus::Error,
            encryption_method: Reading::Error,
            percentage_encrypted: Reading::Error,
            key_protector_types: Reading::Error,
            auto_unlock: Reading::Error,
        }
    }
}

/// One report row: a fixed volume plus copies of the host-wide facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveRecord {
    pub drive_letter: String,
    pub tpm: TpmFacts,
    pub secure_boot: SecureBootFacts,
    pub bitlocker: BitLockerFields,
}

impl DriveRecord {
    pub fn new(
        volume: &VolumeHandle,
        tpm: &TpmFacts,
        secure_boot: &SecureBootFacts,
        bitlocker: BitLockerFields,
    ) -> Self {
        Self {
            drive_letter: volume.as_str().to_string(),
            tpm: tpm.clone(),
            secure_boot: *secure_boot,
            bitlocker,
        }
    }
}
