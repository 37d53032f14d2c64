//! 按权重抽取
//!
//! 权重和 `T` 按给定顺序累加；`[0, T)` 被依次划分为与各元素权重等长的左闭右开区间，
//! 落点 `r` 所在区间对应的元素即为中奖结果。顺序必须与前端转盘扇区顺序一致。

use crate::entities::promotion_entity;
use crate::error::{AppError, AppResult};
use rand::Rng;

/// 可参与加权抽取的元素
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for promotion_entity::Model {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// 按固定顺序求权重和，同一集合多次计算结果一致
pub fn total_weight<T: Weighted>(items: &[T]) -> f64 {
    items.iter().fold(0.0, |acc, item| acc + item.weight())
}

/// 给定落点 `roll` 选出对应元素；`roll` 不在 `[0, T)` 内时返回 None。
/// 权重为 0 的元素区间宽度为 0，永远不会被选中。
pub fn pick_with_roll<T: Weighted>(items: &[T], roll: f64) -> Option<&T> {
    let total = total_weight(items);
    if !roll.is_finite() || roll < 0.0 || roll >= total {
        return None;
    }

    let mut acc = 0.0;
    for item in items {
        acc += item.weight();
        if roll < acc {
            return Some(item);
        }
    }
    None
}

/// 使用给定随机源抽取一个元素
pub fn pick_random<'a, T: Weighted, R: Rng + ?Sized>(
    items: &'a [T],
    rng: &mut R,
) -> AppResult<&'a T> {
    if items.is_empty() {
        return Err(AppError::NoPromotionsAvailable);
    }

    let total = total_weight(items);
    if !total.is_finite() || total <= 0.0 {
        return Err(AppError::InvalidState(format!(
            "Total weight of active promotions must be > 0 (got {total})"
        )));
    }

    let roll = rng.random_range(0.0..total);
    pick_with_roll(items, roll).ok_or_else(|| {
        AppError::InvalidState(format!("Roll {roll} fell outside [0, {total})"))
    })
}
