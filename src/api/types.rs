//! Typed payloads decoded from response envelopes.
//!
//! Payload fields sit beside `success`/`message` in the same JSON object, so
//! these types deserialize from the full envelope body and ignore the flag
//! fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AuditKind;

/// Account profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Successful login: bearer credential plus the profile to cache locally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginPayload {
    pub access_token: String,
    pub user: UserProfile,
}

/// Confirmation-only payload for operations that return just a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("OK")
    }
}

/// One audit record, common across the three families.
///
/// Kind-specific fields (the name key, input data, computed results) are
/// captured in `details`; the backend owns their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: String,
    pub user_id: String,
    pub audit_period: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl AuditRecord {
    /// The facility/building/organization name, depending on the family.
    #[must_use]
    pub fn name(&self, kind: AuditKind) -> Option<&str> {
        self.details.get(kind.name_field()).and_then(Value::as_str)
    }
}

/// Listing payload: record count plus the records themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditList {
    #[serde(default)]
    pub count: u64,
    pub audits: Vec<AuditRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserBody {
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuditBody {
    pub audit: AuditRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn user_profile_defaults_active() -> Result<()> {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": "abc",
            "email": "user@x.com"
        }))?;
        assert!(profile.is_active);
        assert_eq!(profile.created_at, None);
        Ok(())
    }

    #[test]
    fn login_payload_ignores_envelope_fields() -> Result<()> {
        let payload: LoginPayload = serde_json::from_value(json!({
            "success": true,
            "message": "Login successful",
            "access_token": "jwt-123",
            "user": {"id": "u1", "email": "user@x.com"}
        }))?;
        assert_eq!(payload.access_token, "jwt-123");
        assert_eq!(payload.user.email, "user@x.com");
        Ok(())
    }

    #[test]
    fn audit_record_exposes_kind_name() -> Result<()> {
        let record: AuditRecord = serde_json::from_value(json!({
            "id": "a1",
            "user_id": "u1",
            "audit_period": "2025-Q1",
            "facility_name": "Plant 7",
            "total_carbon_footprint": 12.5,
            "status": "draft"
        }))?;
        assert_eq!(record.name(AuditKind::Carbon), Some("Plant 7"));
        assert_eq!(record.name(AuditKind::Esg), None);
        assert_eq!(record.status.as_deref(), Some("draft"));
        Ok(())
    }
}
