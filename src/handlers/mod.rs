pub mod account;
pub mod admin;
pub mod draw;
pub mod health;
pub mod points;
pub mod promotion;

pub use account::account_config;
pub use admin::admin_config;
pub use draw::draw_config;
pub use health::health;
pub use points::points_config;
pub use promotion::promotion_config;
