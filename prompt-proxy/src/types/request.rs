use serde::Deserialize;
use serde_json::{Map, Value};

/// The body a caller posts to the generate endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateRequest {
    /// Parses a request body, which must be a JSON object.
    ///
    /// The derived `Deserialize` would also accept a sequence such as
    /// `["Hello"]` as a positional struct, so the body goes through an
    /// object map first.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let object = serde_json::from_slice::<Map<String, Value>>(body)?;
        serde_json::from_value(Value::Object(object))
    }

    /// The prompt, unless it is absent, `null` or the empty string.
    ///
    /// Whitespace-only prompts are forwarded as-is.
    #[must_use]
    pub fn into_prompt(self) -> Option<String> {
        self.prompt.filter(|prompt| !prompt.is_empty())
    }
}
