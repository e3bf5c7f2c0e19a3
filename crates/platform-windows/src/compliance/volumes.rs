//! Fixed local volume enumeration.

use super::record::VolumeHandle;
use crate::shell::{query_json, PowerShell, QueryOutcome, StringList};

/// `DriveType = 3` is `Local Disk`; removable, network, optical and RAM disks
/// are excluded by the filter.
pub(crate) const FIXED_VOLUMES_QUERY: &str = "Get-CimInstance -ClassName Win32_LogicalDisk -Filter 'DriveType = 3' | Select-Object -ExpandProperty DeviceID | ConvertTo-Json -Compress";

/// List fixed local volumes in the order Windows reports them.
///
/// A listing failure is logged and yields an empty list.
pub fn enumerate_fixed_volumes<S: PowerShell + ?Sized>(shell: &S) -> Vec<VolumeHandle> {
    match query_json::<S, StringList>(shell, FIXED_VOLUMES_QUERY) {
        QueryOutcome::Found(ids) => ids.into_vec().into_iter().map(VolumeHandle::new).collect(),
        QueryOutcome::Absent => Vec::new(),
        QueryOutcome::Failed(err) => {
            tracing::warn!(error = %err, "fixed volume listing failed");
            Vec::new()
        }
    }
}
