//! Windows security posture orchestrator.
//!
//! Collects the host-wide TPM and Secure Boot facts once, enumerates fixed
//! volumes, then builds one [`DriveRecord`] per volume from its BitLocker state.

pub mod bitlocker;
pub mod record;
pub mod secure_boot;
pub mod tpm;
pub mod volumes;

pub use bitlocker::collect_drive;
pub use record::{
    BitLockerFields, BootMode, DriveRecord, LockStatus, ProtectionStatus, Reading,
    SecureBootFacts, TpmFacts, VolumeHandle,
};
pub use secure_boot::collect_secure_boot;
pub use tpm::collect_tpm;
pub use volumes::enumerate_fixed_volumes;

use crate::shell::PowerShell;

/// Collect one record per fixed volume, in enumeration order.
pub fn collect_posture<S: PowerShell + ?Sized>(shell: &S) -> Vec<DriveRecord> {
    let tpm = collect_tpm(shell);
    let secure_boot = collect_secure_boot(shell);
    let volumes = enumerate_fixed_volumes(shell);

    tracing::info!(
        tpm_present = tpm.present,
        tpm_spec = %tpm.spec_version,
        secure_boot = secure_boot.secure_boot_enabled,
        boot_mode = %secure_boot.boot_mode,
        volumes = volumes.len(),
        "host facts collected"
    );

    volumes
        .iter()
        .map(|volume| collect_drive(shell, volume, &tpm, &secure_boot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedShell;

    #[test]
    fn host_facts_are_queried_once_for_all_volumes() {
        let shell = ScriptedShell::new()
            .reply(
                "Win32_Tpm",
                r#"{"IsEnabled_InitialValue":true,"IsOwned_InitialValue":true,"SpecVersion":"2.0, 0, 1.59"}"#,
            )
            .reply(
                "Confirm-SecureBootUEFI",
                r#"{"SecureBoot":true,"BootState":"UEFI"}"#,
            )
            .reply("Win32_LogicalDisk", r#"["C:","D:","E:"]"#)
            .reply(
                "-MountPoint 'C:'",
                r#"{"ProtectionStatus":2,"LockStatus":0,"EncryptionMethod":"XtsAes256","EncryptionPercentage":100,"AutoUnlockEnabled":null,"KeyProtectorTypes":["Tpm","RecoveryPassword"]}"#,
            )
            .fail("-MountPoint 'D:'", "Access is denied.");

        let records = collect_posture(&shell);
        let drives: Vec<&str> = records.iter().map(|r| r.drive_letter.as_str()).collect();
        assert_eq!(drives, vec!["C:", "D:", "E:"]);

        assert_eq!(shell.calls_matching("Win32_Tpm"), 1);
        assert_eq!(shell.calls_matching("Confirm-SecureBootUEFI"), 1);
        assert_eq!(shell.calls_matching("Get-BitLockerVolume"), 3);

        assert_eq!(records[0].bitlocker.protection_status, ProtectionStatus::On);
        assert_eq!(records[1].bitlocker, BitLockerFields::query_error());
        assert_eq!(records[2].bitlocker, BitLockerFields::no_association());
        for record in &records {
            assert_eq!(record.tpm.spec_version, "2.0");
            assert_eq!(record.secure_boot.boot_mode, BootMode::Uefi);
        }
    }

    #[test]
    fn everything_failing_still_yields_records_for_each_volume() {
        let shell = ScriptedShell::new()
            .fail("Win32_Tpm", "Invalid namespace")
            .fail("Confirm-SecureBootUEFI", "Cmdlet not supported on this platform")
            .reply("Win32_LogicalDisk", r#""C:""#)
            .fail("Get-BitLockerVolume", "The term 'Get-BitLockerVolume' is not recognized");

        let records = collect_posture(&shell);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tpm, TpmFacts::absent());
        assert_eq!(records[0].secure_boot, SecureBootFacts::unknown());
        assert_eq!(records[0].bitlocker, BitLockerFields::query_error());
    }

    #[test]
    fn no_volumes_means_empty_report() {
        let shell = ScriptedShell::new();
        assert!(collect_posture(&shell).is_empty());
        assert_eq!(shell.calls_matching("Get-BitLockerVolume"), 0);
    }
}
