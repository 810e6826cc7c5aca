use crate::tasks::config::CaptureConfig;

/// Builds a config running `script` through the platform shell.
pub(crate) fn shell_config(script: &str) -> CaptureConfig {
    CaptureConfig::new("sh").args(["-c", script])
}

/// Lines making up a complete debug task region on stderr.
pub(crate) const DEBUG_REGION: &str = r#"
echo 'Starting the Playwright script'
echo 'Build started' >&2
echo 'START OF TASK [debug]' >&2
echo 'ok: [localhost] => {' >&2
echo '    "script_output.stdout_lines": [' >&2
echo '        "[#<CompanyUser id: 7,",' >&2
echo '        "  email: ops@example.com,",' >&2
echo '    ]' >&2
echo '}' >&2
echo 'END OF TASK [debug]' >&2
echo 'Playwright script completed'
"#;

pub(crate) const EXPECTED_DEBUG_CAPTURE: &str = r#"START OF TASK [debug]
ok: [localhost] => {
    "script_output.stdout_lines": [
        "[#<CompanyUser id: 7,",
        "  email: ops@example.com,",
    ]
}
END OF TASK [debug]
"#;
