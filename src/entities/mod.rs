pub mod accounts;
pub mod ledger_entries;
pub mod promotions;
pub mod spin_records;

pub use accounts as account_entity;
pub use ledger_entries as ledger_entry_entity;
pub use promotions as promotion_entity;
pub use spin_records as spin_record_entity;
