use super::types::AuditConfig;

impl AuditConfig {
    /// The audit has no configuration surface: every run targets the local
    /// machine and writes next to the executable.
    pub fn load() -> Self {
        Self::default()
    }
}
