//! JSON rendering for outlines.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::analysis::FeatureRecord;
use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// Indent used by [`JsonFormat::Pretty`].
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with a 4-space indent
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
///
/// Non-ASCII text is written as UTF-8 rather than escaped.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    serialize(result, format)
}

/// Convert feature records to a JSON array.
pub fn to_json_features(records: &[FeatureRecord], format: JsonFormat) -> Result<String> {
    serialize(records, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    let result = match format {
        JsonFormat::Pretty => {
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            value.serialize(&mut Serializer::with_formatter(&mut buf, formatter))
        }
        JsonFormat::Compact => value.serialize(&mut Serializer::new(&mut buf)),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;

    String::from_utf8(buf).map_err(|e| Error::Render(e.to_string()))
}
