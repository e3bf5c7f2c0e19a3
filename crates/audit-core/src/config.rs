mod constants;
mod defaults;
mod load;
mod paths;
mod types;

pub use types::AuditConfig;
