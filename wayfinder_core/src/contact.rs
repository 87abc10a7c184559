//! Contact data: what extraction produces and what the contact store keeps.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ContactError;

/// Email shape shared by extraction and submission validation.
pub const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

static EMAIL_EXACT: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(&format!("^{EMAIL_PATTERN}$")).ok());

const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 1000;
const PHONE_MIN_DIGITS: usize = 3;

/// The four fields a contact submission can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Description,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Description];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Description => "description",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured contact details pulled out of free text.
///
/// A field is only ever present when it is non-empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExtractedContact {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.description.is_none()
    }

    #[must_use]
    pub const fn get(&self, field: ContactField) -> Option<&String> {
        match field {
            ContactField::Name => self.name.as_ref(),
            ContactField::Email => self.email.as_ref(),
            ContactField::Phone => self.phone.as_ref(),
            ContactField::Description => self.description.as_ref(),
        }
    }

    const fn slot_mut(&mut self, field: ContactField) -> &mut Option<String> {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Description => &mut self.description,
        }
    }

    /// Stores `value` trimmed; blank values clear the field.
    pub fn set(&mut self, field: ContactField, value: &str) {
        let value = value.trim();
        *self.slot_mut(field) = (!value.is_empty()).then(|| value.to_string());
    }

    /// Stores `value` only if the field is still empty. Returns whether it was stored.
    pub fn fill(&mut self, field: ContactField, value: &str) -> bool {
        if self.get(field).is_some() {
            return false;
        }
        self.set(field, value);
        self.get(field).is_some()
    }

    /// Present fields in canonical order.
    #[must_use]
    pub fn present_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_some())
            .collect()
    }
}

/// Follow-up state of a stored contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Contacted,
    Resolved,
}

impl ContactStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "resolved" => Ok(Self::Resolved),
            other => Err(ContactError::InvalidStatus(other.to_string())),
        }
    }
}

/// A persisted contact entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: ExtractedContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_interest: Option<String>,
    #[serde(default)]
    pub original_query: String,
    #[serde(default)]
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactRecord {
    /// Wraps extracted fields for storage. Emails are stored lowercased.
    #[must_use]
    pub fn new(mut fields: ExtractedContact, original_query: impl Into<String>) -> Self {
        fields.email = fields.email.map(|e| e.to_lowercase());
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            fields,
            service_interest: None,
            original_query: original_query.into().trim().to_string(),
            status: ContactStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: ContactStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// A contact form submitted directly rather than extracted from chat text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub service_interest: Option<String>,
    pub original_query: Option<String>,
}

impl ContactSubmission {
    /// Trims every field, keeps the non-empty ones and validates them.
    pub fn into_record(self) -> Result<ContactRecord, ContactError> {
        let mut fields = ExtractedContact::default();
        for (field, value) in [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Phone, &self.phone),
            (ContactField::Description, &self.description),
        ] {
            if let Some(value) = value {
                fields.set(field, value);
            }
        }
        let service_interest = self
            .service_interest
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);

        if fields.is_empty() && service_interest.is_none() {
            return Err(ContactError::Empty);
        }
        validate(&fields)?;

        let mut record = ContactRecord::new(fields, self.original_query.unwrap_or_default());
        record.service_interest = service_interest;
        Ok(record)
    }
}

fn validate(fields: &ExtractedContact) -> Result<(), ContactError> {
    if let Some(name) = &fields.name {
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(ContactError::TooLong {
                field: ContactField::Name,
                max: NAME_MAX_CHARS,
            });
        }
    }
    if let Some(email) = &fields.email {
        if !is_valid_email(email) {
            return Err(ContactError::InvalidEmail(email.clone()));
        }
    }
    if let Some(phone) = &fields.phone {
        if phone.chars().filter(char::is_ascii_digit).count() < PHONE_MIN_DIGITS {
            return Err(ContactError::InvalidPhone(phone.clone()));
        }
    }
    if let Some(description) = &fields.description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(ContactError::TooLong {
                field: ContactField::Description,
                max: DESCRIPTION_MAX_CHARS,
            });
        }
    }
    Ok(())
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_EXACT.as_ref().is_some_and(|re| re.is_match(value))
}

/// Listing filter for stored contacts. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactQuery {
    pub page: usize,
    pub limit: usize,
    pub status: Option<ContactStatus>,
}

impl Default for ContactQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

impl<T> Page<T> {
    /// Slices an already ordered list into the requested page.
    #[must_use]
    pub fn paginate(items: Vec<T>, page: usize, limit: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total = items.len();
        let pages = total.div_ceil(limit);
        let items = items
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();
        Self {
            items,
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_trims_and_drops_blank_values() {
        let mut contact = ExtractedContact::default();
        contact.set(ContactField::Name, "  Aarya ");
        contact.set(ContactField::Phone, "   ");
        assert_eq!(contact.name.as_deref(), Some("Aarya"));
        assert!(contact.phone.is_none());
        assert_eq!(contact.present_fields(), vec![ContactField::Name]);
    }

    #[test]
    fn fill_keeps_first_value() {
        let mut contact = ExtractedContact::default();
        assert!(contact.fill(ContactField::Email, "a@b.io"));
        assert!(!contact.fill(ContactField::Email, "c@d.io"));
        assert_eq!(contact.email.as_deref(), Some("a@b.io"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extracted_contact_serializes_only_present_fields() {
        let mut contact = ExtractedContact::default();
        contact.set(ContactField::Email, "john@example.com");
        let json = serde_json::to_string(&contact).expect("contact should serialize");
        assert_eq!(json, r#"{"email":"john@example.com"}"#);
    }

    #[test]
    fn empty_submission_is_rejected() {
        let submission = ContactSubmission {
            name: Some("   ".to_string()),
            ..ContactSubmission::default()
        };
        assert!(matches!(submission.into_record(), Err(ContactError::Empty)));
    }

    #[test]
    fn submission_validates_email_and_phone() {
        let bad_email = ContactSubmission {
            email: Some("not-an-email".to_string()),
            ..ContactSubmission::default()
        };
        assert!(matches!(
            bad_email.into_record(),
            Err(ContactError::InvalidEmail(_))
        ));

        let bad_phone = ContactSubmission {
            phone: Some("+1-2".to_string()),
            ..ContactSubmission::default()
        };
        assert!(matches!(
            bad_phone.into_record(),
            Err(ContactError::InvalidPhone(_))
        ));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn submission_builds_record_with_lowercased_email() {
        let submission = ContactSubmission {
            name: Some(" Jane ".to_string()),
            email: Some("Jane@Example.COM".to_string()),
            service_interest: Some("Plumbing Services".to_string()),
            ..ContactSubmission::default()
        };
        let record = submission.into_record().expect("valid submission");
        assert_eq!(record.fields.name.as_deref(), Some("Jane"));
        assert_eq!(record.fields.email.as_deref(), Some("jane@example.com"));
        assert_eq!(record.service_interest.as_deref(), Some("Plumbing Services"));
        assert_eq!(record.status, ContactStatus::New);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Contacted".parse::<ContactStatus>().ok(), Some(ContactStatus::Contacted));
        assert!("archived".parse::<ContactStatus>().is_err());
    }

    #[test]
    fn paginate_reports_totals() {
        let page = Page::paginate((1..=23).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total, 23);
        assert_eq!(page.pages, 3);

        let empty = Page::paginate(Vec::<u8>::new(), 0, 0);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.pages, 0);
    }
}
