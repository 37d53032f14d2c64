pub mod account;
pub mod admin;
pub mod common;
pub mod draw;
pub mod pagination;
pub mod points;
pub mod promotion;

pub use account::*;
pub use admin::*;
pub use common::*;
pub use draw::*;
pub use pagination::*;
pub use points::*;
pub use promotion::*;
