use crate::tasks::parser::{RecordStatus, parse_captured};

const DEBUG_TASK: &str = r#"START OF TASK [debug]

TASK [debug] *******************************************************************
ok: [localhost] => {
    "script_output.stdout_lines": [
        "[#<CompanyUser id: 7,",
        "  identity_number: \"1069645215\",",
        "  email: ops@example.com,",
        "  created_at: 2024-09-01 10:00:00 +0300>]",
        "| rendered by pp",
        "\"Done\""
    ]
}

PLAY RECAP ******************************
END OF TASK [debug]
"#;

#[test]
fn failure_marker_short_circuits() {
    let text = "START OF TASK [failure]\nfatal: [localhost]: FAILED! => {\"script_output.stdout_lines\": [\n\"a: b\"\n]}\nEND OF TASK [failure]\n";
    let record = parse_captured(text);

    assert_eq!(record.status, RecordStatus::Failed);
    assert!(record.is_failed());
    assert_eq!(record.error, text);
    assert_eq!(record.output(), Some(text));
    assert!(record.object_name.is_empty());
    assert!(record.attributes.is_empty());
}

#[test]
fn debug_task_object() {
    let record = parse_captured(DEBUG_TASK);

    assert_eq!(record.status, RecordStatus::Success);
    assert_eq!(record.output(), None);
    assert_eq!(record.error, "");
    assert_eq!(record.object_name, "CompanyUser id");
    assert_eq!(record.attributes["identity_number"], "\\\"1069645215\\");
    assert_eq!(record.attributes["email"], "ops@example.com");
    assert_eq!(record.attributes["created_at"], "2024-09-01 10:00:00 +0300>]");
    assert_eq!(record.attributes.len(), 3);
}

#[test]
fn simple_object() {
    let text = "script_output.stdout_lines\n\"[#<Foo: bar=1>\"\nname: value\n]\n";
    let record = parse_captured(text);

    assert_eq!(record.status, RecordStatus::Success);
    assert_eq!(record.object_name, "Foo");
    assert_eq!(record.attributes["name"], "value");
    assert_eq!(record.attributes.len(), 1);
}

#[test]
fn error_line_wins_regardless_of_other_lines() {
    let text = "script_output.stdout_lines\n\"[#<Foo: bar=1>\"\n\"ERROR: disk full\",\nname: value\n]\n";
    let record = parse_captured(text);

    assert_eq!(record.status, RecordStatus::Success);
    assert_eq!(record.error, "ERROR: disk full");
    assert_eq!(record.object_name, "Foo");
    assert_eq!(record.attributes["name"], "value");
    assert!(!record.attributes.contains_key("ERROR"));
}

#[test]
fn last_error_line_wins() {
    let text = "script_output.stdout_lines\nERROR: first\nERROR: second\n]\n";
    let record = parse_captured(text);
    assert_eq!(record.error, "ERROR: second");
}

#[test]
fn no_output_block_yields_empty_record() {
    let text = "START OF TASK [debug]\nok: [localhost]\nkey: value\nEND OF TASK [debug]\n";
    let record = parse_captured(text);

    assert_eq!(record.status, RecordStatus::Success);
    assert_eq!(record.error, "");
    assert!(record.object_name.is_empty());
    assert!(record.attributes.is_empty());
}

#[test]
fn empty_input() {
    let record = parse_captured("");
    assert_eq!(record.status, RecordStatus::Success);
    assert!(record.error.is_empty());
    assert!(record.object_name.is_empty());
    assert!(record.attributes.is_empty());
}

#[test]
fn terminator_line_ends_block() {
    let text = "script_output.stdout_lines\na: 1\n   ],\nb: 2\n";
    let record = parse_captured(text);
    assert_eq!(record.attributes.len(), 1);
    assert_eq!(record.attributes["a"], "1");
}

#[test]
fn unterminated_block_runs_to_end() {
    let text = "script_output.stdout_lines\na: 1\nb: 2";
    let record = parse_captured(text);
    assert_eq!(record.attributes.len(), 2);
}

#[test]
fn continuation_and_blank_lines_discarded() {
    let text = "script_output.stdout_lines\n\"| a: 1\",\n\"\",\n   \n,\nb: 2\n]\n";
    let record = parse_captured(text);
    assert_eq!(record.attributes.len(), 1);
    assert_eq!(record.attributes["b"], "2");
}

#[test]
fn splits_on_first_colon_only() {
    let text = "script_output.stdout_lines\nurl: https://example.com:8443/path\n]\n";
    let record = parse_captured(text);
    assert_eq!(record.attributes["url"], "https://example.com:8443/path");
}

#[test]
fn object_line_without_colon_has_no_name() {
    let text = "script_output.stdout_lines\n[#<Foo bar>\nk: v\n]\n";
    let record = parse_captured(text);
    assert!(record.object_name.is_empty());
    assert_eq!(record.attributes["k"], "v");
}

#[test]
fn last_object_name_wins() {
    let text = "script_output.stdout_lines\n[#<First: 1>\n[#<Second: 2>\n]\n";
    let record = parse_captured(text);
    assert_eq!(record.object_name, "Second");
    assert!(record.attributes.is_empty());
}

#[test]
fn display_lists_fields() {
    let text = "script_output.stdout_lines\n[#<Foo: bar=1>\nname: value\nage: 3\n]\n";
    let record = parse_captured(text);
    assert_eq!(
        record.to_string(),
        "- status : success\n- error : \n- Foo : {age: 3, name: value}"
    );

    let failed = parse_captured("FAILED!");
    assert_eq!(failed.to_string(), "- status : failed\n- output : FAILED!");
}

#[cfg(feature = "serde")]
#[test]
fn serializes_camel_case() {
    let text = "script_output.stdout_lines\n[#<Foo: bar=1>\nname: value\n]\n";
    let value = serde_json::to_value(parse_captured(text)).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["objectName"], "Foo");
    assert_eq!(value["attributes"]["name"], "value");
}
