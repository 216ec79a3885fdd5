//! # Position 模块
//!
//! 定义角色立绘的位置与尺寸模型。
//!
//! ## 设计说明
//!
//! - 位置有两种表示：命名位置（如 `center`）或坐标对
//! - 坐标轴的值要么是归一化浮点数（0.0–1.0），要么是原样透传的字符串
//!   （如 `"120px"`、`"30%"`），由值的类型在使用时区分，存储时不做解释
//! - 核心层只负责携带这些值，具体解析（命名位置 → 坐标、归一化 → 百分比）
//!   由渲染层负责

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 命名位置
///
/// 预设的符号化摆放位置，由渲染层解析为具体坐标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedPosition {
    /// 左侧
    Left,
    /// 中央
    Center,
    /// 右侧
    Right,
    /// 远左
    FarLeft,
    /// 远右
    FarRight,
    /// 顶部
    Top,
    /// 底部
    Bottom,
    /// 左上
    TopLeft,
    /// 中上
    TopCenter,
    /// 右上
    TopRight,
    /// 左下
    BottomLeft,
    /// 中下
    BottomCenter,
    /// 右下
    BottomRight,
}

impl NamedPosition {
    /// 从字符串解析位置（便捷方法）
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_str(s).ok()
    }
}

impl FromStr for NamedPosition {
    type Err = ();

    /// 从字符串解析位置（不区分大小写，kebab-case）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "middle" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "far-left" => Ok(Self::FarLeft),
            "far-right" => Ok(Self::FarRight),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "top-left" => Ok(Self::TopLeft),
            "top-center" => Ok(Self::TopCenter),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-center" => Ok(Self::BottomCenter),
            "bottom-right" => Ok(Self::BottomRight),
            _ => Err(()),
        }
    }
}

/// 坐标轴的值
///
/// 每个轴只能是两种表示之一：
///
/// - `Norm`：归一化浮点数（0.0–1.0），渲染层按容器比例换算
/// - `Raw`：带单位的字符串（`px` / `%`），原样透传给渲染表面
///
/// `#[serde(untagged)]` 保证序列化格式直接由值类型区分（数字 vs 字符串），
/// 两种表示在同一个轴上互斥。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    /// 归一化浮点数
    Norm(f64),
    /// 原样透传的字符串（如 `"120px"`、`"30%"`）
    Raw(String),
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        Self::Norm(v)
    }
}

impl From<&str> for AxisValue {
    fn from(v: &str) -> Self {
        Self::Raw(v.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(v: String) -> Self {
        Self::Raw(v)
    }
}

/// 角色立绘位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Position {
    /// 命名位置
    Named(NamedPosition),
    /// 坐标对
    At {
        /// 横轴
        x: AxisValue,
        /// 纵轴
        y: AxisValue,
    },
}

impl Position {
    /// 创建坐标对位置
    pub fn at(x: impl Into<AxisValue>, y: impl Into<AxisValue>) -> Self {
        Self::At {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl From<NamedPosition> for Position {
    fn from(p: NamedPosition) -> Self {
        Self::Named(p)
    }
}

/// 角色立绘尺寸
///
/// 宽高均可选，各轴独立解析，规则与 [`AxisValue`] 相同。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// 宽度
    pub width: Option<AxisValue>,
    /// 高度
    pub height: Option<AxisValue>,
}

impl Size {
    /// 创建同时指定宽高的尺寸
    pub fn new(width: impl Into<AxisValue>, height: impl Into<AxisValue>) -> Self {
        Self {
            width: Some(width.into()),
            height: Some(height.into()),
        }
    }

    /// 只指定宽度
    pub fn width(width: impl Into<AxisValue>) -> Self {
        Self {
            width: Some(width.into()),
            height: None,
        }
    }

    /// 只指定高度
    pub fn height(height: impl Into<AxisValue>) -> Self {
        Self {
            width: None,
            height: Some(height.into()),
        }
    }
}
