use serde::{Deserialize, Serialize};

/// Request for POST /api/text
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTextRequest {
    pub character_description: String,
}

/// Response for POST /api/text
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTextResponse {
    pub text: String,
}

/// Request for POST /api/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub character_description: String,
    pub text: String,
    /// Text previously returned by POST /api/text, if the client used it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,
}

impl SynthesizeRequest {
    /// True unless the text is exactly the generated text
    pub fn text_modified(&self) -> bool {
        self.generated_text.as_deref() != Some(self.text.as_str())
    }
}
