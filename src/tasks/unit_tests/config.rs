use crate::tasks::{
    config::{CaptureConfig, CaptureMarkers, DEFAULT_TIMEOUT_MS, StreamSource},
    error::TaskError,
};

#[test]
fn defaults() {
    let config = CaptureConfig::default();
    assert_eq!(config.command, "python3");
    assert_eq!(config.args, vec!["main.py".to_string()]);
    assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(config.timeout_ms, 600_000);
    assert_eq!(config.markers, CaptureMarkers::default());
    assert!(config.validate().is_ok());
}

#[test]
fn for_script_appends_sole_positional_argument() {
    let config = CaptureConfig::for_script("scripts/SS_3515.rb");
    assert_eq!(config.command, "python3");
    assert_eq!(
        config.args,
        vec!["main.py".to_string(), "scripts/SS_3515.rb".to_string()]
    );
}

#[test]
fn builder() {
    let config = CaptureConfig::new("sh")
        .args(["-c", "echo hi"])
        .env([("RUST_LOG", "debug")])
        .timeout_ms(300)
        .channel_capacity(8)
        .markers(CaptureMarkers::new(["BEGIN"], ["DONE"]));

    assert_eq!(config.command, "sh");
    assert_eq!(config.args, vec!["-c".to_string(), "echo hi".to_string()]);
    assert_eq!(
        config.env.as_ref().and_then(|env| env.get("RUST_LOG")),
        Some(&"debug".to_string())
    );
    assert_eq!(config.timeout_ms, 300);
    assert_eq!(config.channel_capacity, 8);
    assert_eq!(config.markers.start, vec!["BEGIN".to_string()]);
    assert_eq!(config.markers.end, vec!["DONE".to_string()]);
}

fn assert_invalid(config: CaptureConfig) {
    match config.validate() {
        Err(TaskError::InvalidConfiguration(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn validation() {
    assert_invalid(CaptureConfig::new(""));
    assert_invalid(CaptureConfig::new(" python3"));
    assert_invalid(CaptureConfig::new("python3").args(["main.py", ""]));
    assert_invalid(CaptureConfig::new("python3").args([" main.py"]));
    assert_invalid(CaptureConfig::new("python3").timeout_ms(0));
    assert_invalid(CaptureConfig::new("python3").channel_capacity(0));
    assert_invalid(CaptureConfig::new("python3").working_dir("/definitely/not/a/dir/tcrm"));
    assert_invalid(CaptureConfig::new("python3").env([("BAD=KEY", "v")]));
    assert_invalid(CaptureConfig::new("python3").env([("", "v")]));

    assert!(CaptureConfig::new("python3").timeout_ms(30).validate().is_ok());
}

#[test]
fn working_dir_must_be_directory() {
    let file = std::env::current_exe().unwrap();
    let config = CaptureConfig::new("python3").working_dir(file.to_string_lossy());
    assert_invalid(config);

    let dir = std::env::temp_dir();
    let config = CaptureConfig::new("python3").working_dir(dir.to_string_lossy());
    assert!(config.validate().is_ok());
}

#[test]
fn marker_validation() {
    let empty: [&str; 0] = [];
    assert_invalid(CaptureConfig::default().markers(CaptureMarkers::new(empty, ["END"])));
    assert_invalid(CaptureConfig::default().markers(CaptureMarkers::new(["START"], empty)));
    assert_invalid(CaptureConfig::default().markers(CaptureMarkers::new(["START", "  "], ["END"])));
}

#[test]
fn default_markers_match_both_task_kinds() {
    let markers = CaptureMarkers::default();
    assert!(markers.is_start("START OF TASK [debug]"));
    assert!(markers.is_start("   START OF TASK [failure]   "));
    assert!(markers.is_end("END OF TASK [debug]"));
    assert!(markers.is_end("END OF TASK [failure]"));
    assert!(!markers.is_start("TASK [debug]"));
    assert!(!markers.is_end("START OF TASK [debug]"));
}

#[test]
fn stream_source_names() {
    assert_eq!(StreamSource::Ordinary.as_str(), "ordinary");
    assert_eq!(StreamSource::Task.as_str(), "task");
    assert_eq!(StreamSource::default(), StreamSource::Ordinary);
}

#[cfg(feature = "serde")]
#[test]
fn deserialize_fills_defaults() {
    let config: CaptureConfig =
        serde_json::from_str(r#"{ "command": "sh", "timeout_ms": 1000 }"#).unwrap();
    assert_eq!(config.command, "sh");
    assert_eq!(config.timeout_ms, 1000);
    assert_eq!(config.markers, CaptureMarkers::default());
    assert_eq!(config.channel_capacity, 100);
}
