//! 分页相关的数据结构

use serde::{Deserialize, Serialize};

/// 单页最大条数
pub const MAX_PAGE_SIZE: u64 = 100;
/// 数据库以 BIGINT 绑定 offset
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// offset/limit 分页窗口，limit 会被限制在 1..=MAX_PAGE_SIZE，offset 不超过 MAX_OFFSET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn new(offset: Option<u64>, limit: Option<u64>, default_limit: u64) -> Self {
        Self {
            offset: offset.unwrap_or(0).min(MAX_OFFSET),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn first(limit: Option<u64>, default_limit: u64) -> Self {
        Self::new(None, limit, default_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window() {
        let window = PageWindow::new(Some(20), Some(10), 10);
        assert_eq!(window.offset, 20);
        assert_eq!(window.limit, 10);
    }

    #[test]
    fn test_page_window_defaults() {
        let window = PageWindow::new(None, None, 10);
        assert_eq!(window.offset, 0);
        assert_eq!(window.limit, 10);
    }

    #[test]
    fn test_page_window_clamps_limit() {
        assert_eq!(PageWindow::first(Some(0), 20).limit, 1);
        assert_eq!(PageWindow::first(Some(500), 20).limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_window_clamps_offset() {
        let window = PageWindow::new(Some(u64::MAX), None, 10);
        assert_eq!(window.offset, MAX_OFFSET);
        assert!(i64::try_from(window.offset).is_ok());
    }
}
