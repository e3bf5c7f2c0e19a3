use std::fmt::Write as _;

use platform_windows::{DriveRecord, Reading};

/// Header and left-aligned width of every column, in order.
pub const COLUMNS: [(&str, usize); 13] = [
    ("Drive", 6),
    ("TPMPres", 8),
    ("TPMReady", 8),
    ("TPMOwn", 8),
    ("SpecVer", 10),
    ("SB", 8),
    ("BootMode", 12),
    ("BLStatus", 12),
    ("Lock", 10),
    ("EncryptMethod", 15),
    ("PctEnc", 8),
    ("KeyProtectors", 20),
    ("AutoUnlock", 10),
];

/// Length of the dash rule under the header.
pub const RULE_WIDTH: usize = 140;

/// Render the header, the rule and one line per record.
pub fn render_table(records: &[DriveRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, COLUMNS.map(|(header, _)| header.to_string()));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for record in records {
        push_row(&mut out, row_cells(record));
    }
    out
}

/// Cell text for one record, in column order.
pub fn row_cells(record: &DriveRecord) -> [String; 13] {
    let bitlocker = &record.bitlocker;
    [
        record.drive_letter.clone(),
        flag(record.tpm.present),
        flag(record.tpm.ready),
        flag(record.tpm.owned),
        record.tpm.spec_version.clone(),
        flag(record.secure_boot.secure_boot_enabled),
        record.secure_boot.boot_mode.to_string(),
        bitlocker.protection_status.to_string(),
        bitlocker.lock_status.to_string(),
        bitlocker.encryption_method.to_string(),
        bitlocker.percentage_encrypted.to_string(),
        bitlocker.key_protector_types.to_string(),
        match &bitlocker.auto_unlock {
            Reading::Value(enabled) => flag(*enabled),
            other => other.to_string(),
        },
    ]
}

fn push_row(out: &mut String, cells: [String; 13]) {
    for ((_, width), cell) in COLUMNS.iter().zip(cells) {
        let _ = write!(out, "{cell:<width$}", width = *width);
    }
    out.push('\n');
}

fn flag(value: bool) -> String {
    String::from(if value { "True" } else { "False" })
}
