use serde_json::Value;

/// Shape of a generation service response.
///
/// Completion-style services answer `{"text": ...}` or
/// `{"choices": [{"text": ...}]}`, chat-style ones
/// `{"choices": [{"message": {"content": ...}}]}`. Every variant yields raw
/// text through [`GenerationEnvelope::raw_text`]; unrecognized shapes are
/// [`GenerationEnvelope::Empty`]. Choices keep their position even when they
/// carry no text, so "first choice" always means index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEnvelope {
    Text(String),
    Choices(Vec<Option<String>>),
    Empty,
}

impl GenerationEnvelope {
    /// Total over every JSON value.
    pub fn from_value(value: &Value) -> Self {
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return Self::Text(text.to_string());
        }

        let choices: Vec<Option<String>> = value
            .get("choices")
            .and_then(Value::as_array)
            .map(|choices| choices.iter().map(choice_text).collect())
            .unwrap_or_default();

        if choices.is_empty() {
            Self::Empty
        } else {
            Self::Choices(choices)
        }
    }

    /// The primary text, else the first choice's text.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Choices(choices) => choices.first().and_then(Option::as_deref),
            Self::Empty => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::Choices(choices) => choices.len(),
            Self::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn choice_text(choice: &Value) -> Option<String> {
    choice
        .get("text")
        .and_then(Value::as_str)
        .or_else(|| {
            choice
                .get("message")
                .and_then(|message| message.get("content"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}
