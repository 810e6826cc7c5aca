use std::{collections::BTreeMap, fmt};

/// Substring marking the captured text as a failed task
pub const FAILURE_MARKER: &str = "FAILED!";

/// Substring introducing the block of script output lines
pub const OUTPUT_BLOCK_MARKER: &str = "script_output.stdout_lines";

/// Prefix of a trimmed line closing the output block
pub const OUTPUT_BLOCK_TERMINATOR: &str = "]";

/// Prefix of a line carrying the error message
pub const ERROR_PREFIX: &str = "ERROR:";

/// Prefix of presentation-only continuation lines
pub const CONTINUATION_PREFIX: &str = "|";

/// Prefix of the line opening a printed object, e.g. `[#<Company id: 1`
pub const OBJECT_OPENING: &str = "[#<";

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Success,
    Failed,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Success => "success",
            RecordStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured record recovered from captured task text
///
/// A failed record carries the whole raw text as its error and nothing else.
/// A successful record carries whatever the output block yielded; fields
/// stay empty when the text does not have the expected shape.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub status: RecordStatus,
    pub error: String,
    pub object_name: String,
    pub attributes: BTreeMap<String, String>,
}

impl ParsedRecord {
    fn failed(raw: &str) -> Self {
        Self {
            status: RecordStatus::Failed,
            error: raw.to_string(),
            object_name: String::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == RecordStatus::Failed
    }

    /// Raw task output of a failed record.
    ///
    /// Returns `None` for successful records, whose output was parsed into fields.
    pub fn output(&self) -> Option<&str> {
        match self.status {
            RecordStatus::Failed => Some(&self.error),
            RecordStatus::Success => None,
        }
    }
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- status : {}", self.status)?;
        if self.is_failed() {
            return write!(f, "- output : {}", self.error);
        }
        write!(f, "- error : {}", self.error)?;
        if !self.object_name.is_empty() {
            write!(f, "\n- {} : {{", self.object_name)?;
            for (i, (key, value)) in self.attributes.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Parses captured task text into a [`ParsedRecord`].
///
/// Never fails: text departing from the expected shape yields a record with
/// emptier fields.
///
/// # Examples
///
/// ```rust
/// use tcrm_capture::tasks::parser::{parse_captured, RecordStatus};
///
/// let text = "\
/// ok: [localhost] => {
///     \"script_output.stdout_lines\": [
///         \"[#<CompanyUser id: 7,\",
///         \"  email: ops@example.com,\",
///         \"ERROR: disk full\",
///     ]
/// }
/// ";
/// let record = parse_captured(text);
/// assert_eq!(record.status, RecordStatus::Success);
/// assert_eq!(record.object_name, "CompanyUser id");
/// assert_eq!(record.attributes["email"], "ops@example.com");
/// assert_eq!(record.error, "ERROR: disk full");
/// ```
pub fn parse_captured(text: &str) -> ParsedRecord {
    if text.contains(FAILURE_MARKER) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Captured text contains failure marker");
        return ParsedRecord::failed(text);
    }

    let (error, retained) = collect_output_block(text);
    let (object_name, attributes) = rebuild_object(&retained);

    ParsedRecord {
        status: RecordStatus::Success,
        error,
        object_name,
        attributes,
    }
}

/// Collects the cleaned lines of the output block, splitting off the error line.
fn collect_output_block(text: &str) -> (String, Vec<&str>) {
    let mut error = String::new();
    let mut retained = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.contains(OUTPUT_BLOCK_MARKER) {
            in_block = true;
            continue;
        }
        if !in_block {
            continue;
        }
        if trimmed.starts_with(OUTPUT_BLOCK_TERMINATOR) {
            break;
        }

        let cleaned = trimmed.trim_matches(|c: char| c == '"' || c == ',' || c.is_whitespace());
        if cleaned.starts_with(ERROR_PREFIX) {
            error = cleaned.to_string();
        } else if !cleaned.is_empty() && !cleaned.starts_with(CONTINUATION_PREFIX) {
            retained.push(cleaned);
        }
    }

    (error, retained)
}

/// Rebuilds the printed object from retained lines.
///
/// The opening line only names the object; its own `key: value` is not an
/// attribute. The name is everything before the first colon with the
/// opening token characters trimmed, which is brittle for names carrying
/// those characters and kept that way for compatibility.
fn rebuild_object(lines: &[&str]) -> (String, BTreeMap<String, String>) {
    let mut object_name = String::new();
    let mut attributes = BTreeMap::new();

    for line in lines {
        if line.starts_with(OBJECT_OPENING) {
            if let Some((name, _)) = line.split_once(':') {
                object_name = name
                    .trim_matches(|c: char| OBJECT_OPENING.contains(c))
                    .to_string();
            }
        } else if let Some((key, value)) = line.split_once(':') {
            attributes.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    (object_name, attributes)
}
