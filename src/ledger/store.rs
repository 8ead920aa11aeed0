use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    session::{Theme, User},
    summary::{projected_income, FinanceSummary},
    Property, PropertyDraft,
};
use crate::errors::{LedgerError, Result};
use crate::storage::KeyValueStore;

pub const USER_KEY: &str = "rental_app_user";
pub const PROPERTIES_KEY: &str = "rental_app_properties";
pub const THEME_KEY: &str = "theme";

/// Session, property list and theme preference over a key-value backend.
///
/// Each call reads the backend afresh; callers hold no cached copies.
pub struct LedgerStore {
    backend: Box<dyn KeyValueStore>,
}

impl LedgerStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = User::login(username, password)
            .inspect_err(|_| warn!("login rejected: blank credentials"))?;
        self.backend.set(USER_KEY, &serde_json::to_string(&user)?)?;
        info!(user = %user.username, "logged in");
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        self.backend.remove(USER_KEY)?;
        info!("logged out");
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        match self.backend.get(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// The logged-in user, or [`LedgerError::NotLoggedIn`].
    pub fn require_user(&self) -> Result<User> {
        self.current_user()?.ok_or(LedgerError::NotLoggedIn)
    }

    pub fn list_properties(&self) -> Result<Vec<Property>> {
        let properties: Vec<Property> = match self.backend.get(PROPERTIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        debug!(count = properties.len(), "loaded properties");
        Ok(properties)
    }

    pub fn get_property(&self, id: Uuid) -> Result<Property> {
        self.list_properties()?
            .into_iter()
            .find(|property| property.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("property {}", id)))
    }

    /// Validates and appends a new property, returning the stored record.
    pub fn add_property(&self, draft: PropertyDraft) -> Result<Property> {
        let property = Property::from_draft(draft)?;
        let mut properties = self.list_properties()?;
        properties.push(property.clone());
        self.write_properties(&properties)?;
        info!(id = %property.id, address = %property.address, "property added");
        Ok(property)
    }

    /// Removes the property with `id`; returns whether one was removed.
    pub fn delete_property(&self, id: Uuid) -> Result<bool> {
        let mut properties = self.list_properties()?;
        let before = properties.len();
        properties.retain(|property| property.id != id);
        let removed = properties.len() != before;
        if removed {
            self.write_properties(&properties)?;
            info!(%id, "property deleted");
        }
        Ok(removed)
    }

    pub fn finance_summary(&self) -> Result<FinanceSummary> {
        Ok(FinanceSummary::from_properties(&self.list_properties()?))
    }

    pub fn projected_income(&self, date: NaiveDate) -> Result<f64> {
        projected_income(&self.list_properties()?, date)
    }

    pub fn theme(&self) -> Result<Theme> {
        Ok(Theme::from_stored(self.backend.get(THEME_KEY)?.as_deref()))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.backend.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme()?.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    fn write_properties(&self, properties: &[Property]) -> Result<()> {
        self.backend.set(PROPERTIES_KEY, &serde_json::to_string(properties)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::property::tests::sample_draft;
    use crate::storage::MemoryStore;

    fn store() -> LedgerStore {
        LedgerStore::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn session_lifecycle() {
        let store = store();
        assert!(store.current_user().unwrap().is_none());
        assert!(matches!(store.require_user(), Err(LedgerError::NotLoggedIn)));

        store.login("admin", "admin").unwrap();
        assert_eq!(store.require_user().unwrap().name, "admin");

        store.logout().unwrap();
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn failed_login_keeps_previous_session_absent() {
        let store = store();
        assert!(store.login("", "").is_err());
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn add_list_get_delete() {
        let store = store();
        assert!(store.list_properties().unwrap().is_empty());

        let first = store.add_property(sample_draft()).unwrap();
        let mut draft = sample_draft();
        draft.address = "4 Mill Road".into();
        let second = store.add_property(draft).unwrap();

        let listed = store.list_properties().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], first);
        assert_eq!(store.get_property(second.id).unwrap().address, "4 Mill Road");

        assert!(store.delete_property(first.id).unwrap());
        assert!(!store.delete_property(first.id).unwrap());
        assert_eq!(store.list_properties().unwrap(), vec![second]);
    }

    #[test]
    fn missing_property_is_not_found() {
        let store = store();
        store.add_property(sample_draft()).unwrap();
        let err = store.get_property(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)), "{err}");
    }

    #[test]
    fn invalid_draft_is_not_persisted() {
        let store = store();
        let mut draft = sample_draft();
        draft.increase_frequency = 0;
        assert!(store.add_property(draft).is_err());
        assert!(store.list_properties().unwrap().is_empty());
    }

    #[test]
    fn theme_defaults_dark_and_toggles() {
        let store = store();
        assert_eq!(store.theme().unwrap(), Theme::Dark);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(store.theme().unwrap(), Theme::Light);
        store.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn finance_summary_reflects_store() {
        let store = store();
        store.add_property(sample_draft()).unwrap();
        let mut draft = sample_draft();
        draft.price = 500.0;
        store.add_property(draft).unwrap();
        let summary = store.finance_summary().unwrap();
        assert_eq!(summary.property_count, 2);
        assert_eq!(summary.total_income, 1500.0);
    }
}
