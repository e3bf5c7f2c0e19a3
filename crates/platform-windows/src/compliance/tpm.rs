//! TPM presence, readiness and spec version.

use serde::Deserialize;

use super::record::{TpmFacts, NOT_APPLICABLE};
use crate::shell::{query_json, PowerShell, QueryOutcome};

pub(crate) const TPM_QUERY: &str = "Get-CimInstance -Namespace 'root\\cimv2\\Security\\MicrosoftTpm' -ClassName Win32_Tpm | Select-Object -First 1 IsEnabled_InitialValue,IsOwned_InitialValue,SpecVersion | ConvertTo-Json -Compress";

#[derive(Debug, Deserialize)]
struct TpmReading {
    #[serde(rename = "IsEnabled_InitialValue")]
    enabled: Option<bool>,
    #[serde(rename = "IsOwned_InitialValue")]
    owned: Option<bool>,
    #[serde(rename = "SpecVersion")]
    spec_version: Option<String>,
}

/// Read the host TPM. Never fails: every problem yields [`TpmFacts::absent`].
pub fn collect_tpm<S: PowerShell + ?Sized>(shell: &S) -> TpmFacts {
    match query_json::<S, TpmReading>(shell, TPM_QUERY) {
        QueryOutcome::Found(reading) => facts_from_reading(reading).unwrap_or_else(|| {
            tracing::warn!("TPM object is missing enablement, ownership or spec version");
            TpmFacts::absent()
        }),
        QueryOutcome::Absent => {
            tracing::info!("no TPM device reported");
            TpmFacts::absent()
        }
        QueryOutcome::Failed(err) => {
            tracing::warn!(error = %err, "TPM query failed");
            TpmFacts::absent()
        }
    }
}

fn facts_from_reading(reading: TpmReading) -> Option<TpmFacts> {
    let ready = reading.enabled?;
    let owned = reading.owned?;
    let spec = reading.spec_version.filter(|s| !s.trim().is_empty())?;
    Some(TpmFacts {
        present: true,
        ready,
        owned,
        spec_version: format_spec_version(&spec),
    })
}

/// Reduce a raw `SpecVersion` such as `"2.0, 0, 1.59"` to `major.minor`.
pub fn format_spec_version(raw: &str) -> String {
    let mut tokens = raw
        .split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty());
    let Some(major) = tokens.next() else {
        return NOT_APPLICABLE.to_string();
    };
    let minor = tokens.next().unwrap_or("0");
    format!("{major}.{minor}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedShell;

    #[test]
    fn spec_version_takes_first_two_numeric_tokens() {
        assert_eq!(format_spec_version("2.0"), "2.0");
        assert_eq!(format_spec_version("2.0, 0, 1.59"), "2.0");
        assert_eq!(format_spec_version("1.2, 2, 3"), "1.2");
    }

    #[test]
    fn spec_version_defaults_minor_to_zero() {
        assert_eq!(format_spec_version("1"), "1.0");
        assert_eq!(format_spec_version(" 1. "), "1.0");
    }

    #[test]
    fn spec_version_without_digits_is_not_applicable() {
        assert_eq!(format_spec_version("n/a"), "N/A");
        assert_eq!(format_spec_version(", ."), "N/A");
    }

    #[test]
    fn present_tpm_reports_flags_and_version() {
        let shell = ScriptedShell::new().reply(
            "Win32_Tpm",
            r#"{"IsEnabled_InitialValue":true,"IsOwned_InitialValue":false,"SpecVersion":"2.0, 0, 1.38"}"#,
        );

        let facts = collect_tpm(&shell);
        assert_eq!(
            facts,
            TpmFacts {
                present: true,
                ready: true,
                owned: false,
                spec_version: "2.0".to_string(),
            }
        );
    }

    #[test]
    fn present_tpm_with_unparseable_version_keeps_presence() {
        let shell = ScriptedShell::new().reply(
            "Win32_Tpm",
            r#"{"IsEnabled_InitialValue":true,"IsOwned_InitialValue":true,"SpecVersion":"unknown"}"#,
        );

        let facts = collect_tpm(&shell);
        assert!(facts.present);
        assert!(facts.owned);
        assert_eq!(facts.spec_version, "N/A");
    }

    #[test]
    fn missing_fields_degrade_to_absent() {
        for raw in [
            r#"{"IsEnabled_InitialValue":true,"IsOwned_InitialValue":true,"SpecVersion":""}"#,
            r#"{"IsEnabled_InitialValue":true,"SpecVersion":"2.0"}"#,
            r#"{"IsOwned_InitialValue":true,"SpecVersion":"2.0"}"#,
            r#"{"IsEnabled_InitialValue":null,"IsOwned_InitialValue":true,"SpecVersion":"2.0"}"#,
        ] {
            let shell = ScriptedShell::new().reply("Win32_Tpm", raw);
            assert_eq!(collect_tpm(&shell), TpmFacts::absent(), "input: {raw}");
        }
    }

    #[test]
    fn no_device_and_query_failure_degrade_to_absent() {
        let shell = ScriptedShell::new();
        assert_eq!(collect_tpm(&shell), TpmFacts::absent());

        let shell = ScriptedShell::new().fail("Win32_Tpm", "Access denied");
        assert_eq!(collect_tpm(&shell), TpmFacts::absent());
    }
}
