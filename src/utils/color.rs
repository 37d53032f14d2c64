use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"))
}

/// 验证转盘扇区颜色 (#RRGGBB)
pub fn validate_hex_color(color: &str) -> AppResult<()> {
    if !hex_color_regex().is_match(color) {
        return Err(AppError::ValidationError(format!(
            "Invalid color '{color}', expected #RRGGBB"
        )));
    }
    Ok(())
}

/// 统一为大写，保证同一颜色只有一种写法
pub fn normalize_hex_color(color: &str) -> String {
    color.trim().to_ascii_uppercase()
}
