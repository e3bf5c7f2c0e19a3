//! Per-volume BitLocker state, merged with the host-wide facts.

use serde::Deserialize;

use super::record::{
    BitLockerFields, DriveRecord, LockStatus, ProtectionStatus, Reading, SecureBootFacts,
    TpmFacts, VolumeHandle,
};
use crate::shell::{ps_quote, query_json, PowerShell, QueryOutcome, StringList};

/// Raw `Get-BitLockerVolume` projection. The query casts the status enums to
/// `int` and the encryption method to `string`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BitLockerReading {
    protection_status: Option<i64>,
    lock_status: Option<i64>,
    encryption_method: Option<String>,
    encryption_percentage: Option<f64>,
    key_protector_types: Option<StringList>,
    auto_unlock_enabled: Option<bool>,
}

pub(crate) fn bitlocker_query(volume: &VolumeHandle) -> String {
    format!(
        "Get-BitLockerVolume -MountPoint {mount} | Select-Object -First 1 \
         @{{n='ProtectionStatus';e={{[int]$_.ProtectionStatus}}}},\
         @{{n='LockStatus';e={{[int]$_.LockStatus}}}},\
         @{{n='EncryptionMethod';e={{[string]$_.EncryptionMethod}}}},\
         EncryptionPercentage,AutoUnlockEnabled,\
         @{{n='KeyProtectorTypes';e={{@($_.KeyProtector | ForEach-Object {{ [string]$_.KeyProtectorType }})}}}} \
         | ConvertTo-Json -Compress",
        mount = ps_quote(volume.as_str()),
    )
}

/// Build the report row for `volume`. Never fails: a BitLocker query error
/// becomes the error tier and leaves the host facts untouched.
pub fn collect_drive<S: PowerShell + ?Sized>(
    shell: &S,
    volume: &VolumeHandle,
    tpm: &TpmFacts,
    secure_boot: &SecureBootFacts,
) -> DriveRecord {
    let outcome = query_json::<S, BitLockerReading>(shell, &bitlocker_query(volume));
    tracing::debug!(volume = %volume, tier = outcome.tier(), "BitLocker query finished");
    DriveRecord::new(volume, tpm, secure_boot, bitlocker_fields(volume, outcome))
}

fn bitlocker_fields(
    volume: &VolumeHandle,
    outcome: QueryOutcome<BitLockerReading>,
) -> BitLockerFields {
    match outcome {
        QueryOutcome::Found(reading) => fields_from_reading(reading),
        QueryOutcome::Absent => BitLockerFields::no_association(),
        QueryOutcome::Failed(err) => {
            tracing::warn!(volume = %volume, error = %err, "BitLocker query failed");
            BitLockerFields::query_error()
        }
    }
}

fn fields_from_reading(reading: BitLockerReading) -> BitLockerFields {
    let key_protectors = reading
        .key_protector_types
        .map(StringList::into_vec)
        .unwrap_or_default();

    BitLockerFields {
        protection_status: ProtectionStatus::from_code(reading.protection_status),
        lock_status: LockStatus::from_code(reading.lock_status),
        encryption_method: reading
            .encryption_method
            .map(|method| method.trim().to_string())
            .filter(|method| !method.is_empty())
            .into(),
        percentage_encrypted: reading.encryption_percentage.map(round_percentage).into(),
        key_protector_types: if key_protectors.is_empty() {
            Reading::NotApplicable
        } else {
            Reading::Value(key_protectors.join(", "))
        },
        auto_unlock: reading.auto_unlock_enabled.into(),
    }
}

fn round_percentage(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}
