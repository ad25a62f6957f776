use serde::{Deserialize, Serialize};

/// Editor mode tag. Closed set; unknown tags are rejected on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Cpp,
    Html,
    Css,
    Json,
    Markdown,
}

/// A user-authored text artifact in the working tree.
///
/// Owned exclusively by the session's file list; the simulator core
/// only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileData {
    /// Opaque stable identifier, unique within the open file set.
    pub id: String,
    /// Display name including extension.
    pub name: String,
    pub language: Language,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_playground_wire_shape() {
        let file: FileData = serde_json::from_str(
            r#"{"id":"1","name":"main.js","language":"javascript","content":"let x = 1;\n"}"#,
        )
        .unwrap();
        assert_eq!(file.language, Language::Javascript);
        assert_eq!(file.content, "let x = 1;\n");
    }

    #[test]
    fn rejects_unknown_language_tags() {
        let err = serde_json::from_str::<FileData>(
            r#"{"id":"1","name":"x","language":"cobol","content":""}"#,
        );
        assert!(err.is_err());
    }
}
