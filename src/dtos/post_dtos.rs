use serde::{Deserialize, Serialize};

/// Text fields of the `/add-post` multipart form. The optional `image` part
/// is carried separately as an upload.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreatePostDTO {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
}

impl CreatePostDTO {
    pub fn validate(&self) -> Result<(), String> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("missing required field(s): {}", missing.join(", ")))
        }
    }
}

/// Short status body for delete/approve endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_form_is_valid() {
        let dto = CreatePostDTO {
            title: "Contract Law Basics".into(),
            content: "# Intro".into(),
            author: "R. Mehta".into(),
            category: "Contracts".into(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn blank_fields_are_reported_by_name() {
        let dto = CreatePostDTO {
            title: "   ".into(),
            content: "body".into(),
            author: String::new(),
            category: "Family Law".into(),
        };
        let err = dto.validate().unwrap_err();
        assert_eq!(err, "missing required field(s): title, author");
    }
}
