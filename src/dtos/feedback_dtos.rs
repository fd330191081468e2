use serde::Deserialize;

/// Public testimonial submission. Unknown keys (including any `isApproved`
/// sent by a client) are dropped during deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackDTO {
    #[serde(default)]
    pub client_name: String,
    pub address: Option<String>,
    pub occupation: Option<String>,
    #[serde(default)]
    pub service_taken: String,
    #[serde(default)]
    pub feedback_content: String,
}

impl CreateFeedbackDTO {
    pub fn validate(&self) -> Result<(), String> {
        let missing: Vec<&str> = [
            ("clientName", &self.client_name),
            ("serviceTaken", &self.service_taken),
            ("feedbackContent", &self.feedback_content),
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

/// Blank optional text is stored as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_flag_from_client_is_ignored() {
        let dto: CreateFeedbackDTO = serde_json::from_str(
            r#"{"clientName":"A. Sharma","serviceTaken":"Property Dispute",
                "feedbackContent":"Great service","isApproved":true}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.client_name, "A. Sharma");
        assert!(dto.address.is_none());
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let dto: CreateFeedbackDTO = serde_json::from_str(r#"{"clientName":"X"}"#).unwrap();
        let err = dto.validate().unwrap_err();
        assert!(err.contains("serviceTaken"));
        assert!(err.contains("feedbackContent"));
        assert!(!err.contains("clientName"));
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("Pune".into())), Some("Pune".into()));
        assert_eq!(non_blank(None), None);
    }
}
