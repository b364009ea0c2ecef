//! # Descriptor 模块
//!
//! 单张图片的浮动动画描述，以及由方向和幅度推导出的运动向量。
//!
//! ## 设计原则
//!
//! - **已归一化**：所有数值字段均为有限数，不会出现 NaN
//! - **无副作用**：描述本身不执行任何渲染
//! - **引擎无关**：不包含任何 DOM 或 CSS 引擎的类型

use serde::{Deserialize, Serialize};

/// 各字段的默认值
///
/// 依赖序号的默认值通过函数计算，序号从 0 开始。
pub mod defaults {
    /// 默认浮动幅度（像素）
    pub const STRENGTH: f64 = 12.0;
    /// 每一项的深度递增（像素）
    pub const DEPTH_STEP: f64 = 15.0;
    /// 第 0 项的周期（秒）
    pub const BASE_DURATION: f64 = 6.0;
    /// 每一项的周期递增（秒）
    pub const DURATION_STEP: f64 = 1.5;
    /// `xy` 方向在每条轴上的分量系数
    pub const DIAGONAL_FACTOR: f64 = 0.7;

    pub fn depth(index: usize) -> f64 {
        index as f64 * DEPTH_STEP
    }

    pub fn duration(index: usize) -> f64 {
        BASE_DURATION + index as f64 * DURATION_STEP
    }

    pub fn delay(index: usize) -> f64 {
        // 写成减法，第 0 项得到 0 而不是 -0
        0.0 - index as f64
    }
}

/// 浮动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 水平浮动
    X,
    /// 竖直浮动
    #[default]
    Y,
    /// 斜向浮动（右上）
    Xy,
}

impl Direction {
    /// 从配置字面量解析方向
    ///
    /// 大小写敏感；空串或未知值降级为 `Y`，不视为错误。
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "x" => Self::X,
            "xy" => Self::Xy,
            _ => Self::Y,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Xy => "xy",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 运动向量
///
/// 半个浮动周期内的 (x, y) 像素位移。y 轴向下为正，所以向上浮动为负值。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionVector {
    pub x: f64,
    pub y: f64,
}

/// 由方向和幅度计算运动向量
///
/// | 方向 | 向量 |
/// |------|------|
/// | `x`  | `(s, 0)` |
/// | `xy` | `(0.7s, -0.7s)` |
/// | `y`  | `(0, -s)` |
pub fn motion_vector(direction: Direction, strength: f64) -> MotionVector {
    match direction {
        Direction::X => MotionVector {
            x: strength,
            y: 0.0,
        },
        Direction::Xy => MotionVector {
            x: strength * defaults::DIAGONAL_FACTOR,
            y: -strength * defaults::DIAGONAL_FACTOR,
        },
        Direction::Y => MotionVector {
            x: 0.0,
            y: -strength,
        },
    }
}

/// 动画描述
///
/// 每个可视项对应一个。由 [`crate::resolver::resolve`] 产生，
/// 每轮解析都完整重建，不做缓存和增量比较。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    /// 图片地址；缺省时该项没有可视内容，但仍然参与动画
    pub source: Option<String>,
    /// 浮动方向
    pub direction: Direction,
    /// 浮动幅度（像素，>= 0）
    pub strength: f64,
    /// z 轴偏移（像素）
    pub depth: f64,
    /// 周期（秒，> 0）
    pub duration: f64,
    /// 相位偏移（秒）
    pub delay: f64,
}

impl AnimationDescriptor {
    /// 第 `index` 项在没有任何字段时的描述
    pub fn with_defaults(index: usize) -> Self {
        Self {
            source: None,
            direction: Direction::Y,
            strength: defaults::STRENGTH,
            depth: defaults::depth(index),
            duration: defaults::duration(index),
            delay: defaults::delay(index),
        }
    }

    /// 运动向量
    pub fn motion(&self) -> MotionVector {
        motion_vector(self.direction, self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_motion_vector_x() {
        let v = motion_vector(Direction::X, 10.0);
        assert_close(v.x, 10.0);
        assert_close(v.y, 0.0);
    }

    #[test]
    fn test_motion_vector_xy() {
        let v = motion_vector(Direction::Xy, 10.0);
        assert_close(v.x, 7.0);
        assert_close(v.y, -7.0);
    }

    #[test]
    fn test_motion_vector_y_and_unknown() {
        let v = motion_vector(Direction::Y, 10.0);
        assert_close(v.x, 0.0);
        assert_close(v.y, -10.0);

        // 未知方向降级为 y
        let unknown = motion_vector(Direction::parse_lossy("diagonal"), 10.0);
        assert_eq!(unknown, v);
    }

    #[test]
    fn test_direction_parse_is_case_sensitive() {
        assert_eq!(Direction::parse_lossy("x"), Direction::X);
        assert_eq!(Direction::parse_lossy("xy"), Direction::Xy);
        assert_eq!(Direction::parse_lossy("y"), Direction::Y);
        assert_eq!(Direction::parse_lossy("X"), Direction::Y);
        assert_eq!(Direction::parse_lossy(""), Direction::Y);
    }

    #[test]
    fn test_index_defaults() {
        assert_close(defaults::depth(2), 30.0);
        assert_close(defaults::duration(1), 7.5);
        assert_close(defaults::delay(3), -3.0);

        let first = AnimationDescriptor::with_defaults(0);
        assert_close(first.strength, 12.0);
        assert_close(first.depth, 0.0);
        assert_close(first.duration, 6.0);
        assert_close(first.delay, 0.0);
    }

    #[test]
    fn test_direction_serde_lowercase() {
        let json = serde_json::to_string(&Direction::Xy).unwrap();
        assert_eq!(json, "\"xy\"");
        let back: Direction = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(back, Direction::X);
    }
}
