//! Property records, the mock session and the key-value backed ledger store.

pub mod attachment;
pub mod property;
pub mod session;
pub mod store;
pub mod summary;

pub use property::{Attachment, Property, PropertyDraft, DEFAULT_PHOTO_URL};
pub use session::{Theme, User};
pub use store::LedgerStore;
pub use summary::{FinanceSummary, IncomeLine};
