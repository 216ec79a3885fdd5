//! # Surface 模块
//!
//! 渲染表面契约：播放控制器与具体渲染实现之间的唯一接口。
//!
//! ## 设计说明
//!
//! - 控制器只通过本 trait 触碰画面，自身不持有任何渲染状态；
//!   对话文字效果表现为控制器驱动的逐帧 `set_dialogue` 调用
//! - 角色视觉以句柄（`Handle`）标识：`ensure_character_visual` 对同名角色
//!   幂等，返回既有句柄
//! - 具体实现的构造期错误（如挂载点不存在）走 [`SurfaceError`]；
//!   播放期接口不返回错误，画不出来就是实现自己的事

use thiserror::Error;
use vn_engine::{Position, Size};

/// 渲染表面构造期错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// 挂载容器未找到
    #[error("渲染容器 '{selector}' 未找到")]
    ContainerNotFound {
        /// 定位容器用的选择器/标识
        selector: String,
    },
}

/// 渲染表面
///
/// 播放控制器操纵画面的全部词汇。实现方自行决定这些调用
/// 映射到 DOM、GPU 还是测试桩。
pub trait RenderSurface {
    /// 角色视觉句柄
    type Handle: Copy;

    /// 应用场景背景（路径已经过资源解析）
    fn apply_background(&mut self, url: &str);

    /// 确保角色视觉存在，返回其句柄
    ///
    /// 同名角色重复调用应返回同一句柄（幂等）。
    fn ensure_character_visual(&mut self, name: &str) -> Self::Handle;

    /// 摆放角色视觉
    fn position_visual(&mut self, handle: Self::Handle, position: &Position);

    /// 设置角色视觉尺寸
    fn size_visual(&mut self, handle: Self::Handle, size: &Size);

    /// 更换角色立绘（路径已经过资源解析）
    fn set_visual_image(&mut self, handle: Self::Handle, url: &str);

    /// 隐藏角色视觉
    fn hide_visual(&mut self, handle: Self::Handle);

    /// 绘制对话框的一帧
    fn set_dialogue(&mut self, speaker: &str, visible_text: &str, opacity: f32);

    /// 清空对话框
    fn clear_dialogue(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_names_selector() {
        let err = SurfaceError::ContainerNotFound {
            selector: "#stage".to_string(),
        };
        assert!(err.to_string().contains("#stage"));
    }
}
