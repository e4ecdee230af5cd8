use std::{io, sync::Arc};

use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// A string together with its escaped JSON form, so that writers can emit it repeatedly without
/// escaping it again.
#[derive(Debug, Clone)]
pub struct EncodedText {
    text: Arc<str>,
    json: Arc<RawValue>,
}

impl EncodedText {
    pub fn new(text: &str) -> Self {
        let json = serde_json::to_string(text)
            .and_then(RawValue::from_string)
            .expect("a str always serializes to a JSON string literal");

        Self {
            text: Arc::from(text),
            json: Arc::from(json),
        }
    }

    /// The unescaped text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The escaped JSON string literal, quotes included.
    pub fn as_json(&self) -> &str {
        self.json.get()
    }

    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.as_json().as_bytes())
    }
}

impl PartialEq for EncodedText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for EncodedText {}

impl std::fmt::Display for EncodedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Serializes as a plain string with any serializer. Use [`EncodedText::write_to`] to emit the
/// pre-escaped form.
impl Serialize for EncodedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_once() {
        let text = EncodedText::new("say \"hi\"");

        assert_eq!(text.as_str(), "say \"hi\"");
        assert_eq!(text.as_json(), r#""say \"hi\"""#);
    }

    #[test]
    fn writes_raw_json() {
        let text = EncodedText::new("delta_foxtrot");

        let mut buffer = Vec::new();
        text.write_to(&mut buffer).unwrap();
        assert_eq!(buffer, br#""delta_foxtrot""#);

        let object = serde_json::json!({ "value": text.as_str() });
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""delta_foxtrot""#);
        assert_eq!(object["value"], "delta_foxtrot");
    }

    #[test]
    fn serializes_as_a_plain_string() {
        let text = EncodedText::new("say \"hi\"");

        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            serde_json::Value::String("say \"hi\"".to_owned())
        );
        assert_eq!(serde_json::to_string(&text).unwrap(), text.as_json());
        assert_eq!(
            serde_json::to_string(&vec![text.clone(), text]).unwrap(),
            r#"["say \"hi\"","say \"hi\""]"#
        );
    }
}
