use anyhow::Result;
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use audit_core::config::AuditConfig;
use audit_core::report::{render_table, report_file_name, write_report};
use platform_windows::{collect_posture, PowerShellRunner};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AuditConfig::load();
    let taken_at = Local::now().naive_local();
    let shell = PowerShellRunner::new(&config.powershell_path);

    info!(
        powershell = %config.powershell_path.display(),
        output_dir = %config.output_dir.display(),
        "windows security audit started"
    );

    let records = collect_posture(&shell);
    let table = render_table(&records);
    print!("{table}");

    let file_name = report_file_name(&config.file_prefix, &taken_at);
    let path = write_report(&config.output_dir, &file_name, &table)?;
    info!(path = %path.display(), drives = records.len(), "audit report written");

    Ok(())
}
