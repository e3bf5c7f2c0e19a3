pub(super) const DEFAULT_FILE_PREFIX: &str = "WindowsSecurityAudit";
