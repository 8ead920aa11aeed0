use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// Image shown for properties registered without a photo.
pub const DEFAULT_PHOTO_URL: &str = "https://images.unsplash.com/photo-1568605114967-8130f3a36994?auto=format&fit=crop&w=1000&q=80";

/// A file embedded in the ledger as a data URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub data: String,
}

/// A rental property as persisted by the ledger store.
///
/// Records are immutable once created; the store only appends and removes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub address: String,
    pub tenant_name: String,
    pub price: f64,
    pub increase_rate: f64,
    pub increase_frequency: u32,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    pub rent_due_day: u32,
    #[serde(default = "default_photo_url")]
    pub photo_url: String,
    #[serde(default)]
    pub contract: Option<Attachment>,
}

fn default_photo_url() -> String {
    DEFAULT_PHOTO_URL.to_string()
}

impl Property {
    /// Validates `draft` and assigns a fresh id and creation timestamp.
    pub fn from_draft(draft: PropertyDraft) -> Result<Self> {
        draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            address: draft.address.trim().to_string(),
            tenant_name: draft.tenant_name.trim().to_string(),
            price: draft.price,
            increase_rate: draft.increase_rate,
            increase_frequency: draft.increase_frequency,
            contract_start_date: draft.contract_start_date,
            contract_end_date: draft.contract_end_date,
            rent_due_day: draft.rent_due_day,
            photo_url: draft.photo_url.unwrap_or_else(default_photo_url),
            contract: draft.contract,
        })
    }

    /// Short form of the id used by the shell.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn escalation_label(&self) -> String {
        format!(
            "{}% every {} month{}",
            self.increase_rate,
            self.increase_frequency,
            if self.increase_frequency == 1 { "" } else { "s" }
        )
    }
}

/// Input collected when registering a property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub address: String,
    pub tenant_name: String,
    pub price: f64,
    pub increase_rate: f64,
    pub increase_frequency: u32,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    pub rent_due_day: u32,
    pub photo_url: Option<String>,
    pub contract: Option<Attachment>,
}

impl PropertyDraft {
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(LedgerError::invalid("address is required"));
        }
        if self.tenant_name.trim().is_empty() {
            return Err(LedgerError::invalid("tenant name is required"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(LedgerError::invalid(format!(
                "price must be greater than 0, got {}",
                self.price
            )));
        }
        if !self.increase_rate.is_finite() || self.increase_rate < 0.0 {
            return Err(LedgerError::invalid(format!(
                "increase rate must be 0 or greater, got {}",
                self.increase_rate
            )));
        }
        if self.increase_frequency == 0 {
            return Err(LedgerError::invalid(
                "increase frequency must be at least 1 month",
            ));
        }
        if self.contract_start_date > self.contract_end_date {
            return Err(LedgerError::invalid(format!(
                "contract ends ({}) before it starts ({})",
                self.contract_end_date, self.contract_start_date
            )));
        }
        if !(1..=31).contains(&self.rent_due_day) {
            return Err(LedgerError::invalid(format!(
                "rent due day must be between 1 and 31, got {}",
                self.rent_due_day
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_draft() -> PropertyDraft {
        PropertyDraft {
            address: "12 Harbour Lane".into(),
            tenant_name: "R. Okafor".into(),
            price: 1000.0,
            increase_rate: 10.0,
            increase_frequency: 6,
            contract_start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            contract_end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            rent_due_day: 5,
            photo_url: None,
            contract: None,
        }
    }

    pub(crate) fn sample_property() -> Property {
        Property::from_draft(sample_draft()).expect("sample draft is valid")
    }

    #[test]
    fn from_draft_assigns_identity_and_defaults() {
        let property = sample_property();
        assert_eq!(property.photo_url, DEFAULT_PHOTO_URL);
        assert!(property.contract.is_none());
        assert_eq!(property.short_id().len(), 8);
        assert_ne!(property.id, sample_property().id);
    }

    #[test]
    fn draft_validation_rejects_bad_terms() {
        let cases: Vec<(&str, fn(&mut PropertyDraft))> = vec![
            ("blank address", |d: &mut PropertyDraft| d.address = "  ".into()),
            ("blank tenant", |d: &mut PropertyDraft| d.tenant_name = String::new()),
            ("zero price", |d: &mut PropertyDraft| d.price = 0.0),
            ("negative rate", |d: &mut PropertyDraft| d.increase_rate = -5.0),
            ("zero frequency", |d: &mut PropertyDraft| d.increase_frequency = 0),
            ("due day 0", |d: &mut PropertyDraft| d.rent_due_day = 0),
            ("due day 32", |d: &mut PropertyDraft| d.rent_due_day = 32),
            ("inverted window", |d: &mut PropertyDraft| {
                d.contract_end_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
            }),
        ];
        for (label, mutate) in cases {
            let mut draft = sample_draft();
            mutate(&mut draft);
            let err = Property::from_draft(draft).expect_err(label);
            assert!(matches!(err, LedgerError::InvalidArgument(_)), "{label}: {err}");
        }
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let property = sample_property();
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["tenantName"], "R. Okafor");
        assert_eq!(json["contractStartDate"], "2024-01-15");
        assert_eq!(json["increaseFrequency"], 6);
        assert!(json["contract"].is_null());
    }

    #[test]
    fn missing_photo_falls_back_to_placeholder() {
        let mut json = serde_json::to_value(sample_property()).unwrap();
        json.as_object_mut().unwrap().remove("photoUrl");
        let property: Property = serde_json::from_value(json).unwrap();
        assert_eq!(property.photo_url, DEFAULT_PHOTO_URL);
    }

    #[test]
    fn escalation_label_pluralizes() {
        let mut property = sample_property();
        assert_eq!(property.escalation_label(), "10% every 6 months");
        property.increase_frequency = 1;
        property.increase_rate = 2.5;
        assert_eq!(property.escalation_label(), "2.5% every 1 month");
    }
}
