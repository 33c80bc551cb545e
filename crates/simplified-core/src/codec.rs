//! JSON encode/decode helpers for the wire format.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;

use crate::{Error, Result};

/// Indent width used by the command-line utilities unless configured
/// otherwise.
pub const DEFAULT_INDENT: usize = 4;

/// Decode a JSON payload. Unknown keys are ignored and missing keys take
/// their default values, so only malformed or mistyped input fails.
pub fn decode<T: DeserializeOwned>(src: &[u8]) -> Result<T> {
  serde_json::from_slice(src).map_err(Error::Decode)
}

/// Encode `value` as pretty-printed JSON indented by `indent` spaces.
pub fn encode_pretty<T: Serialize + ?Sized>(
  value: &T,
  indent: usize,
) -> Result<Vec<u8>> {
  let indent = " ".repeat(indent);
  let mut out = Vec::new();
  let mut ser = serde_json::Serializer::with_formatter(
    &mut out,
    PrettyFormatter::with_indent(indent.as_bytes()),
  );
  value.serialize(&mut ser).map_err(Error::Encode)?;
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn indent_is_configurable() {
    let v = serde_json::json!({ "a": 1 });
    assert_eq!(encode_pretty(&v, 2).unwrap(), b"{\n  \"a\": 1\n}");
    assert_eq!(encode_pretty(&v, 4).unwrap(), b"{\n    \"a\": 1\n}");
  }

  #[test]
  fn malformed_input_is_a_decode_error() {
    let err = decode::<serde_json::Value>(b"{not json").unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
  }
}
