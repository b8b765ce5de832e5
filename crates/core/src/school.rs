//! School submission validation.
//!
//! A [`SchoolDraft`] collects the raw text fields of a create request in
//! whatever order the body delivers them. [`SchoolDraft::validate`] turns it
//! into a [`NewSchool`] whose values are guaranteed to fit the `schools`
//! table, or reports every problem it found as [`CoreError::Validation`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Form field names, in the order they are reported when missing.
pub const REQUIRED_FIELDS: [&str; 6] = ["name", "address", "city", "state", "contact", "email_id"];

/// Column widths of the `schools` table (in characters).
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_CITY_LEN: usize = 100;
pub const MAX_STATE_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;

/// Longest digit string accepted for `contact`; anything longer overflows `BIGINT`.
pub const MAX_CONTACT_DIGITS: usize = 15;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw, unvalidated text fields of a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolDraft {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub contact: Option<String>,
    pub email_id: Option<String>,
}

/// A school submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: i64,
    pub email_id: String,
}

impl SchoolDraft {
    /// Record a form field by name. Returns `false` for unknown fields, which
    /// callers are expected to ignore.
    ///
    /// A repeated field overwrites the earlier value.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "contact" => &mut self.contact,
            "email_id" => &mut self.email_id,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.name,
            &self.address,
            &self.city,
            &self.state,
            &self.contact,
            &self.email_id,
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(field, _)| *field)
            .collect()
    }

    /// Validate the draft. Values are trimmed before any check.
    ///
    /// Missing fields are reported on their own; otherwise all format errors
    /// are joined into a single message.
    pub fn validate(self) -> Result<NewSchool, CoreError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let take = |value: Option<String>| value.unwrap_or_default().trim().to_string();
        let name = take(self.name);
        let address = take(self.address);
        let city = take(self.city);
        let state = take(self.state);
        let contact = take(self.contact);
        let email_id = take(self.email_id);

        let mut errors = Vec::new();
        for (field, value) in [
            ("name", &name),
            ("address", &address),
            ("city", &city),
            ("state", &state),
            ("email_id", &email_id),
        ] {
            check_no_nul(&mut errors, field, value);
        }
        check_len(&mut errors, "name", &name, MAX_NAME_LEN);
        check_len(&mut errors, "city", &city, MAX_CITY_LEN);
        check_len(&mut errors, "state", &state, MAX_STATE_LEN);
        check_len(&mut errors, "email_id", &email_id, MAX_EMAIL_LEN);

        let contact = match parse_contact(&contact) {
            Ok(contact) => Some(contact),
            Err(msg) => {
                errors.push(msg);
                None
            }
        };
        if let Err(msg) = validate_email(&email_id) {
            errors.push(msg);
        }

        match contact {
            Some(contact) if errors.is_empty() => Ok(NewSchool {
                name,
                address,
                city,
                state,
                contact,
                email_id,
            }),
            _ => Err(CoreError::Validation(errors.join("; "))),
        }
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Parse a contact number: ASCII digits only, at most [`MAX_CONTACT_DIGITS`].
pub fn parse_contact(raw: &str) -> Result<i64, String> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err("contact must contain digits only".to_string());
    }
    if raw.len() > MAX_CONTACT_DIGITS {
        return Err(format!(
            "contact must be at most {MAX_CONTACT_DIGITS} digits"
        ));
    }
    raw.parse()
        .map_err(|_| "contact is not a valid number".to_string())
}

/// Check an email address against the basic `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err("email_id must be a valid email address".to_string())
    }
}

/// PostgreSQL text columns cannot store U+0000.
fn check_no_nul(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.contains('\0') {
        errors.push(format!("{field} must not contain NUL characters"));
    }
}

fn check_len(errors: &mut Vec<String>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(format!("{field} must be at most {max} characters"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn complete_draft() -> SchoolDraft {
        SchoolDraft {
            name: Some("Green Valley High".into()),
            address: Some("12 Orchard Road, Sector 4".into()),
            city: Some("Pune".into()),
            state: Some("Maharashtra".into()),
            contact: Some("9876543210".into()),
            email_id: Some("office@greenvalley.edu".into()),
        }
    }

    #[test]
    fn set_known_and_unknown_fields() {
        let mut draft = SchoolDraft::default();
        assert!(draft.set("city", "Pune".into()));
        assert!(!draft.set("principal", "Someone".into()));
        assert_eq!(draft.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn complete_draft_validates() {
        let school = complete_draft().validate().unwrap();
        assert_eq!(school.name, "Green Valley High");
        assert_eq!(school.contact, 9_876_543_210);
        assert_eq!(school.email_id, "office@greenvalley.edu");
    }

    #[test]
    fn values_are_trimmed() {
        let mut draft = complete_draft();
        draft.name = Some("  Green Valley High \n".into());
        draft.contact = Some(" 9876543210 ".into());
        let school = draft.validate().unwrap();
        assert_eq!(school.name, "Green Valley High");
        assert_eq!(school.contact, 9_876_543_210);
    }

    #[test]
    fn missing_fields_are_listed_in_form_order() {
        let mut draft = complete_draft();
        draft.email_id = None;
        draft.city = Some("   ".into());
        assert_eq!(draft.missing_fields(), vec!["city", "email_id"]);

        let err = draft.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Missing required fields: city, email_id");
    }

    #[test]
    fn empty_draft_reports_every_field() {
        assert_eq!(SchoolDraft::default().missing_fields(), REQUIRED_FIELDS.to_vec());
    }

    #[test]
    fn contact_rules() {
        assert_eq!(parse_contact("0123456789"), Ok(123_456_789));
        assert!(parse_contact("98765-43210").is_err());
        assert!(parse_contact("+919876543210").is_err());
        assert!(parse_contact("1234567890123456").is_err());
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign.example.com").is_err());
        assert!(validate_email("white space@example.com").is_err());
        assert!(validate_email("user@localhost").is_err());
    }

    #[test]
    fn format_errors_are_joined() {
        let mut draft = complete_draft();
        draft.contact = Some("call me".into());
        draft.email_id = Some("nope".into());
        let err = draft.validate().unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation(msg)
                if msg == "contact must contain digits only; email_id must be a valid email address"
        );
    }

    #[test]
    fn nul_character_is_rejected() {
        let mut draft = complete_draft();
        draft.address = Some("12 Orchard\0Road".into());
        assert_matches!(
            draft.validate(),
            Err(CoreError::Validation(msg)) if msg == "address must not contain NUL characters"
        );
    }

    #[test]
    fn overlong_city_is_rejected() {
        let mut draft = complete_draft();
        draft.city = Some("x".repeat(MAX_CITY_LEN + 1));
        assert_matches!(
            draft.validate(),
            Err(CoreError::Validation(msg)) if msg == "city must be at most 100 characters"
        );
    }
}
