use std::path::PathBuf;

/// Runtime settings for one audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Directory the report file is written to.
    pub output_dir: PathBuf,
    /// Report file name prefix, followed by `_<yyyyMMdd_HHmmss>.txt`.
    pub file_prefix: String,
    pub powershell_path: PathBuf,
}
