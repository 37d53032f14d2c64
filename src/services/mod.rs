pub mod account_service;
pub mod admin_service;
pub mod draw_service;
pub mod ledger_service;
pub mod promotion_service;
pub mod spin_log_service;

pub use account_service::*;
pub use admin_service::*;
pub use draw_service::*;
pub use ledger_service::*;
pub use promotion_service::*;
pub use spin_log_service::*;
