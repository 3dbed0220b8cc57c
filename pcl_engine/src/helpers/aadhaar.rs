//! Parsing and matching rules for Aadhaar (national identity) verification responses and bank account names.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db_types::BankVerificationStatus;

/// Strips whitespace from an Aadhaar number and checks that exactly 12 digits remain.
pub fn normalize_aadhaar(input: &str) -> Option<String> {
    let cleaned = input.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    (cleaned.len() == 12 && cleaned.chars().all(|c| c.is_ascii_digit())).then_some(cleaned)
}

/// Masks all but the last four digits, for logging.
pub fn mask_aadhaar(aadhaar: &str) -> String {
    let keep = aadhaar.len().saturating_sub(4);
    aadhaar.chars().enumerate().map(|(i, c)| if i < keep && c.is_ascii_digit() { '*' } else { c }).collect()
}

pub fn is_valid_otp(otp: &str) -> bool {
    otp.len() == 6 && otp.chars().all(|c| c.is_ascii_digit())
}

fn normalize_person_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let letters = lower.chars().filter(|c| c.is_ascii_lowercase() || c.is_whitespace()).collect::<String>();
    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lenient comparison between the name on an Aadhaar record and the name on a user profile.
///
/// Names match when they are equal after normalisation, when one contains the other, or when at least half of the
/// words of the shorter name (ignoring words of two letters or less) appear in both.
pub fn names_match(aadhaar_name: &str, profile_name: &str) -> bool {
    let a = normalize_person_name(aadhaar_name);
    let b = normalize_person_name(profile_name);
    if a == b || a.contains(&b) || b.contains(&a) {
        return true;
    }
    let a_words = a.split(' ').collect::<Vec<_>>();
    let b_words = b.split(' ').collect::<Vec<_>>();
    let common = a_words.iter().filter(|w| w.len() > 2 && b_words.contains(*w)).count();
    common as f64 >= a_words.len().min(b_words.len()) as f64 * 0.5
}

/// Converts `DD-MM-YYYY` and `DD/MM/YYYY` dates into `YYYY-MM-DD`. Anything else is returned unchanged.
pub fn normalize_dob(date: &str) -> String {
    let date = date.trim();
    let digits_at = |idx: &[usize]| idx.iter().all(|&i| date.as_bytes().get(i).is_some_and(u8::is_ascii_digit));
    if date.len() == 10 {
        let bytes = date.as_bytes();
        if bytes[4] == b'-' && bytes[7] == b'-' && digits_at(&[0, 1, 2, 3, 5, 6, 8, 9]) {
            return date.to_string();
        }
        let sep = bytes[2];
        if (sep == b'-' || sep == b'/') && bytes[5] == sep && digits_at(&[0, 1, 3, 4, 6, 7, 8, 9]) {
            return format!("{}-{}-{}", &date[6..10], &date[3..5], &date[0..2]);
        }
    }
    date.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadhaarAddress {
    pub state: Option<String>,
    pub district: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub full_address: Option<String>,
}

/// Reads a field as a non-empty string. Numbers are accepted too, since pincodes often arrive as integers.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| text(obj, k))
}

/// Extracts the address from a verified Aadhaar record.
///
/// The structured `split_address` object is preferred. Missing parts are then filled from top-level fields, and the
/// free-form address is used as a last resort. The country defaults to India when any Indian address part is known.
pub fn parse_aadhaar_address(data: &Value) -> AadhaarAddress {
    let empty = Map::new();
    let root = data.as_object().unwrap_or(&empty);
    let mut addr = AadhaarAddress::default();
    if let Some(split) = root.get("split_address").and_then(Value::as_object) {
        addr.state = text(split, "state");
        addr.district = first_text(split, &["dist", "district"]);
        addr.pincode = text(split, "pincode");
        addr.city = first_text(split, &["vtc", "city"]);
        addr.country = text(split, "country");
        let parts = [
            text(split, "house"),
            text(split, "street"),
            text(split, "landmark"),
            text(split, "locality"),
            text(split, "vtc"),
            first_text(split, &["dist", "district"]),
            text(split, "state"),
            text(split, "country"),
            text(split, "pincode"),
        ];
        let full = parts.into_iter().flatten().collect::<Vec<_>>().join(", ");
        addr.full_address = (!full.is_empty()).then_some(full);
    }
    addr.state = addr.state.or_else(|| text(root, "state"));
    addr.district = addr.district.or_else(|| text(root, "district"));
    addr.pincode = addr.pincode.or_else(|| first_text(root, &["pincode", "zip"]));
    addr.city = addr.city.or_else(|| text(root, "city"));
    addr.country = addr.country.or_else(|| text(root, "country"));
    addr.full_address = addr.full_address.or_else(|| first_text(root, &["address", "full_address", "care_of"]));
    if addr.country.is_none() && (addr.state.is_some() || addr.district.is_some() || addr.pincode.is_some()) {
        addr.country = Some("India".to_string());
    }
    addr
}

/// The identity details returned by a successful Aadhaar OTP verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AadhaarData {
    pub name: String,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub parsed_address: AadhaarAddress,
    /// The record as received, stored with the KYC document.
    pub raw: Value,
}

/// Finds the identity record in a verification response. It may be under `data`, under `aadhaar_data`, or at the
/// top level. Returns `None` when no name is present, which means verification did not succeed.
pub fn extract_aadhaar_data(response: &Value) -> Option<AadhaarData> {
    let record = response
        .get("data")
        .filter(|v| v.is_object())
        .or_else(|| response.get("aadhaar_data").filter(|v| v.is_object()))
        .unwrap_or(response);
    let obj = record.as_object()?;
    let name = first_text(obj, &["name", "full_name"])?;
    Some(AadhaarData {
        name,
        dob: first_text(obj, &["dob", "date_of_birth"]),
        gender: text(obj, "gender"),
        address: text(obj, "address"),
        parsed_address: parse_aadhaar_address(record),
        raw: record.clone(),
    })
}

/// The OTP request id from an OTP generation response: `ref_id`, or `request_id`.
pub fn extract_request_id(response: &Value) -> Option<String> {
    let obj = response.as_object()?;
    first_text(obj, &["ref_id", "request_id"])
}

/// Splits a name from an identity document into (first, last). A single-word name is used for both.
pub fn split_full_name(name: &str) -> (String, String) {
    let mut words = name.split_whitespace();
    let first = words.next().unwrap_or_default().to_string();
    let rest = words.collect::<Vec<_>>().join(" ");
    let last = if rest.is_empty() { first.clone() } else { rest };
    (first, last)
}

//--------------------------------------    Bank accounts     --------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatchResult {
    GoodMatch,
    GoodPartialMatch,
    NoMatch,
}

impl NameMatchResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameMatchResult::GoodMatch => "GOOD_MATCH",
            NameMatchResult::GoodPartialMatch => "GOOD_PARTIAL_MATCH",
            NameMatchResult::NoMatch => "NO_MATCH",
        }
    }
}

fn normalize_bank_name(name: &str) -> String {
    let upper = name.to_uppercase();
    let letters = upper.chars().filter(|c| c.is_ascii_uppercase() || c.is_whitespace()).collect::<String>();
    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compares the account holder name supplied by the user with the name registered at the bank.
pub fn match_account_holder(provided: &str, at_bank: &str) -> NameMatchResult {
    let provided = normalize_bank_name(provided);
    let at_bank = normalize_bank_name(at_bank);
    if provided == at_bank {
        return NameMatchResult::GoodMatch;
    }
    let significant = |s: &str| s.split(' ').filter(|p| p.len() > 1).map(String::from).collect::<Vec<_>>();
    let provided_parts = significant(&provided);
    let bank_parts = significant(&at_bank);
    let overlaps = |a: &str, b: &str| a.contains(b) || b.contains(a);
    let all_provided_in_bank =
        provided_parts.iter().all(|p| bank_parts.iter().any(|b| overlaps(p.as_str(), b.as_str())));
    let all_bank_in_provided =
        bank_parts.iter().all(|b| provided_parts.iter().any(|p| overlaps(p.as_str(), b.as_str())));
    if all_provided_in_bank || all_bank_in_provided {
        NameMatchResult::GoodPartialMatch
    } else {
        NameMatchResult::NoMatch
    }
}

/// Maps a name-match result and bank account status onto a verification outcome.
pub fn bank_verification_status(name_match: &str, account_status: &str) -> BankVerificationStatus {
    let good_name = name_match == "GOOD_MATCH" || name_match == "GOOD_PARTIAL_MATCH";
    if good_name && account_status == "VALID" {
        BankVerificationStatus::Verified
    } else if name_match == "NO_MATCH" || account_status == "INVALID" {
        BankVerificationStatus::Failed
    } else {
        BankVerificationStatus::PendingReview
    }
}
