//! Audit record operations.
//!
//! The backend exposes three parallel endpoint families with identical CRUD
//! shapes; only the path segment and the name key in the create body differ.
//! [`AuditKind`] carries those two facts so every operation is written once.

use anyhow::anyhow;
use reqwest::Method;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

use super::{
    ApiClient, ApiOutcome,
    types::{Ack, AuditBody, AuditList, AuditRecord},
};

/// The three audit families tracked by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditKind {
    /// Carbon-emission audits, keyed by facility.
    Carbon,
    /// IGBC green-building audits, keyed by building.
    Igbc,
    /// ESG audits, keyed by organization.
    Esg,
}

impl AuditKind {
    pub const ALL: [Self; 3] = [Self::Carbon, Self::Igbc, Self::Esg];

    /// URL path segment under `/audits/`.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Carbon => "carbon",
            Self::Igbc => "igbc",
            Self::Esg => "esg",
        }
    }

    /// Name key expected by the create endpoint for this family.
    #[must_use]
    pub fn name_field(self) -> &'static str {
        match self {
            Self::Carbon => "facility_name",
            Self::Igbc => "building_name",
            Self::Esg => "organization_name",
        }
    }
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for AuditKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "carbon" => Ok(Self::Carbon),
            "igbc" => Ok(Self::Igbc),
            "esg" => Ok(Self::Esg),
            other => Err(anyhow!(
                "invalid audit kind {other}: expected carbon, igbc or esg"
            )),
        }
    }
}

impl ApiClient {
    /// Creates an audit record for the given family.
    pub async fn create_audit(
        &self,
        token: &str,
        kind: AuditKind,
        name: &str,
        audit_period: &str,
        audit_data: Value,
    ) -> ApiOutcome<AuditRecord> {
        let body = json!({
            kind.name_field(): name,
            "audit_period": audit_period,
            "audit_data": audit_data
        });

        self.execute::<AuditBody>(
            Method::POST,
            &format!("/audits/{}/create", kind.path_segment()),
            Some(token),
            Some(body),
        )
        .await
        .map(|body| body.audit)
    }

    /// Fetches one audit record by id.
    pub async fn get_audit(
        &self,
        token: &str,
        kind: AuditKind,
        audit_id: &str,
    ) -> ApiOutcome<AuditRecord> {
        self.execute::<AuditBody>(
            Method::GET,
            &format!("/audits/{}/{audit_id}", kind.path_segment()),
            Some(token),
            None,
        )
        .await
        .map(|body| body.audit)
    }

    /// Lists the caller's audit records for one family.
    pub async fn list_audits(&self, token: &str, kind: AuditKind) -> ApiOutcome<AuditList> {
        self.execute(
            Method::GET,
            &format!("/audits/{}/list", kind.path_segment()),
            Some(token),
            None,
        )
        .await
    }

    /// Replaces the audit data of an existing record.
    pub async fn update_audit(
        &self,
        token: &str,
        kind: AuditKind,
        audit_id: &str,
        audit_data: Value,
    ) -> ApiOutcome<AuditRecord> {
        self.execute::<AuditBody>(
            Method::PUT,
            &format!("/audits/{}/{audit_id}", kind.path_segment()),
            Some(token),
            Some(json!({"audit_data": audit_data})),
        )
        .await
        .map(|body| body.audit)
    }

    /// Deletes an audit record.
    pub async fn delete_audit(
        &self,
        token: &str,
        kind: AuditKind,
        audit_id: &str,
    ) -> ApiOutcome<Ack> {
        self.execute(
            Method::DELETE,
            &format!("/audits/{}/{audit_id}", kind.path_segment()),
            Some(token),
            None,
        )
        .await
    }
}
