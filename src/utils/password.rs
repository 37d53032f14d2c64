use crate::error::{AppError, AppResult};
use bcrypt::{hash, verify};

/// 验证密码强度
pub fn validate_password(password: &str) -> AppResult<()> {
    if !(6..=128).contains(&password.chars().count()) {
        return Err(AppError::ValidationError(
            "Password must be between 6 and 128 characters".to_string(),
        ));
    }
    if password.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Password must not be blank".to_string(),
        ));
    }
    Ok(())
}

/// 对密码进行加盐哈希 (bcrypt 自带随机盐)
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    hash(password, cost).map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// 验证密码；bcrypt 内部使用常量时间比较
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))
}

/// 常量时间比较两个字节串，长度不同直接返回 false（长度本身不视为秘密）
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// 校验配置中的口令：以 "$2" 开头视为 bcrypt 哈希，否则按明文常量时间比较
pub fn verify_configured_secret(candidate: &str, stored: &str) -> bool {
    if stored.starts_with("$2") {
        verify(candidate, stored).unwrap_or(false)
    } else {
        constant_time_eq(candidate.as_bytes(), stored.as_bytes())
    }
}
