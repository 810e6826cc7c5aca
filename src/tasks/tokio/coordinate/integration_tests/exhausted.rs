use crate::tasks::{
    event::CaptureOutcome,
    parser::RecordStatus,
    state::CaptureState,
    tokio::{coordinate::integration_tests::helper::shell_config, executor::CaptureExecutor},
};

#[tokio::test]
async fn exit_without_end_marker() {
    let script = r#"
echo 'START OF TASK [debug]' >&2
echo 'ok: [localhost]' >&2
echo 'bye'
"#;
    let config = shell_config(script).timeout_ms(10_000);

    let (report, record) = CaptureExecutor::new(config).run_and_parse().await.unwrap();

    assert_eq!(report.outcome, CaptureOutcome::StreamExhausted);
    assert!(report.is_degraded());
    assert_eq!(report.state, CaptureState::Capturing);
    assert_eq!(report.captured, "START OF TASK [debug]\nok: [localhost]\n");
    assert_eq!(record.status, RecordStatus::Success);
    assert!(record.attributes.is_empty());
}

#[tokio::test]
async fn exit_without_any_marker() {
    let script = r#"
echo 'Please provide the path to the Ruby script as an argument.'
echo 'No TASK [debug] or [failure] information found in the output.' >&2
exit 1
"#;
    let config = shell_config(script).timeout_ms(10_000);

    let report = CaptureExecutor::new(config).run().await.unwrap();

    assert_eq!(report.outcome, CaptureOutcome::StreamExhausted);
    assert_eq!(report.state, CaptureState::NotStarted);
    assert!(report.captured.is_empty());
}

#[tokio::test]
async fn silent_process() {
    let report = CaptureExecutor::new(shell_config("exit 0").timeout_ms(10_000))
        .run()
        .await
        .unwrap();

    assert_eq!(report.outcome, CaptureOutcome::StreamExhausted);
    assert_eq!(report.captured_lines, 0);
}
