//! UEFI Secure Boot enablement and firmware boot mode.
//!
//! `Confirm-SecureBootUEFI` throws on legacy BIOS firmware, so both facts are
//! read in one guarded script and degrade together.

use serde::Deserialize;
use serde_json::Value;

use super::record::{BootMode, SecureBootFacts};
use crate::shell::{is_truthy, query_json, PowerShell, QueryOutcome};

pub(crate) const SECURE_BOOT_QUERY: &str = "$sb = Confirm-SecureBootUEFI; [pscustomobject]@{ SecureBoot = $sb; BootState = [string]$env:firmware_type } | ConvertTo-Json -Compress";

/// Case-insensitive marker identifying a UEFI boot-state string.
const UEFI_MARKER: &str = "efi";

#[derive(Debug, Deserialize)]
struct SecureBootReading {
    #[serde(rename = "SecureBoot", default)]
    secure_boot: Value,
    #[serde(rename = "BootState", default)]
    boot_state: Option<String>,
}

/// Read Secure Boot state. Never fails: any problem yields
/// [`SecureBootFacts::unknown`].
pub fn collect_secure_boot<S: PowerShell + ?Sized>(shell: &S) -> SecureBootFacts {
    match query_json::<S, SecureBootReading>(shell, SECURE_BOOT_QUERY) {
        QueryOutcome::Found(reading) => SecureBootFacts {
            secure_boot_enabled: is_truthy(&reading.secure_boot),
            boot_mode: boot_mode_from_state(reading.boot_state.as_deref().unwrap_or_default()),
        },
        QueryOutcome::Absent => {
            tracing::warn!("Secure Boot query produced no output");
            SecureBootFacts::unknown()
        }
        QueryOutcome::Failed(err) => {
            tracing::warn!(error = %err, "Secure Boot query failed");
            SecureBootFacts::unknown()
        }
    }
}

/// Classify a successfully read boot-state string.
pub fn boot_mode_from_state(state: &str) -> BootMode {
    if state.to_ascii_lowercase().contains(UEFI_MARKER) {
        BootMode::Uefi
    } else {
        BootMode::LegacyOrBios
    }
}
