use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db_types::{BankVerificationStatus, Club, PayoutAccount, UploadedDocument};

/// A decoded document, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentsUploadResult {
    pub club: Club,
    pub documents: Vec<UploadedDocument>,
}

impl DocumentsUploadResult {
    /// `pending_admin_review` for registered clubs, otherwise `verified`.
    pub fn status(&self) -> &'static str {
        if self.club.kyc_verified {
            "verified"
        } else {
            "pending_admin_review"
        }
    }
}

/// The fields of a bank account verification response that are shown back to the account holder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankCheckDetails {
    pub reference_id: Option<String>,
    pub name_at_bank: Option<String>,
    pub bank_name: Option<String>,
    pub name_match_score: Option<String>,
    pub name_match_result: String,
    pub account_status: String,
    pub city: Option<String>,
    pub branch: Option<String>,
}

fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl BankCheckDetails {
    /// Reads a bank account sync response. Missing results are reported as `UNKNOWN`.
    pub fn from_response(response: &Value) -> Self {
        Self {
            reference_id: text(response, "reference_id"),
            name_at_bank: text(response, "name_at_bank"),
            bank_name: text(response, "bank_name"),
            name_match_score: text(response, "name_match_score"),
            name_match_result: text(response, "name_match_result").unwrap_or_else(|| "UNKNOWN".into()),
            account_status: text(response, "account_status").unwrap_or_else(|| "UNKNOWN".into()),
            city: text(response, "city"),
            branch: text(response, "branch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankCheckOutcome {
    pub account: PayoutAccount,
    pub status: BankVerificationStatus,
    pub details: BankCheckDetails,
}

impl BankCheckOutcome {
    pub fn message(&self) -> &'static str {
        match self.status {
            BankVerificationStatus::Verified => "✅ Your bank account has been verified successfully!",
            BankVerificationStatus::Failed => {
                "❌ Bank account verification failed. Name or account details do not match."
            },
            _ => "⏳ Your bank account is pending review. We will verify it shortly.",
        }
    }
}
