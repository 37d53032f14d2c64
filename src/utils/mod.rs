pub mod color;
pub mod jwt;
pub mod password;
pub mod weighted;

pub use color::*;
pub use jwt::*;
pub use password::*;
