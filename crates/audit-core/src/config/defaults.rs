use platform_windows::PowerShellRunner;

use super::constants::DEFAULT_FILE_PREFIX;
use super::paths::executable_dir;
use super::types::AuditConfig;

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            output_dir: executable_dir(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            powershell_path: PowerShellRunner::default().program().to_path_buf(),
        }
    }
}
