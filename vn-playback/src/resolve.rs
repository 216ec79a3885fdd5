//! # Resolve 模块
//!
//! 渲染侧的位置/尺寸解析助手。
//!
//! 核心层只携带符号化的位置模型（命名位置、归一化坐标、原样字符串），
//! 本模块把它们换算成渲染实现可以直接使用的形式：
//! 命名位置 → 归一化锚点，轴值 → CSS 风格字符串。

use vn_engine::{AxisValue, NamedPosition, Position};

/// 命名位置对应的归一化锚点 `(x, y)`
///
/// 横轴 0.0 为最左、1.0 为最右；纵轴 0.0 为顶、1.0 为底。
/// 未指定纵向的名称默认落在底部（立绘站位习惯）。
pub fn named_anchor(position: NamedPosition) -> (f64, f64) {
    match position {
        NamedPosition::FarLeft => (0.05, 1.0),
        NamedPosition::Left => (0.2, 1.0),
        NamedPosition::Center => (0.5, 1.0),
        NamedPosition::Right => (0.8, 1.0),
        NamedPosition::FarRight => (0.95, 1.0),
        NamedPosition::Top => (0.5, 0.0),
        NamedPosition::Bottom => (0.5, 1.0),
        NamedPosition::TopLeft => (0.2, 0.0),
        NamedPosition::TopCenter => (0.5, 0.0),
        NamedPosition::TopRight => (0.8, 0.0),
        NamedPosition::BottomLeft => (0.2, 1.0),
        NamedPosition::BottomCenter => (0.5, 1.0),
        NamedPosition::BottomRight => (0.8, 1.0),
    }
}

/// 轴值 → CSS 风格字符串
///
/// 归一化浮点数换算为百分比（`0.5` → `"50%"`），字符串原样透传。
pub fn axis_to_css(value: &AxisValue) -> String {
    match value {
        AxisValue::Norm(v) => format!("{}%", v * 100.0),
        AxisValue::Raw(s) => s.clone(),
    }
}

/// 位置 → CSS 风格坐标对 `(x, y)`
pub fn position_to_css(position: &Position) -> (String, String) {
    match position {
        Position::Named(named) => {
            let (x, y) = named_anchor(*named);
            (format!("{}%", x * 100.0), format!("{}%", y * 100.0))
        }
        Position::At { x, y } => (axis_to_css(x), axis_to_css(y)),
    }
}
