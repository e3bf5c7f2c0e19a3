//! Canonical Windows system command paths.
//!
//! Using absolute system paths avoids PATH-search hijacking when the audit
//! runs elevated.

pub(crate) const POWERSHELL_EXE: &str =
    r"C:\Windows\System32\WindowsPowerShell\v1.0\powershell.exe";
