//! # vn-playback
//!
//! 播放层：把 `vn-engine` 的场景动作日志变成逐帧演出。
//!
//! ## 设计原则
//!
//! - **轮询驱动**：宿主的帧循环调用 [`PlaybackController::update`]，
//!   输入层调用 [`PlaybackController::advance`]；控制器从不自转
//! - **渲染中立**：画面只通过 [`RenderSurface`] trait 触碰，
//!   DOM、GPU 或测试桩都只是一个实现
//! - **可取消**：对话文字效果是 [`Cancellable`] 操作，
//!   玩家点击跳过 = 成功的提前完成，不是错误
//! - 本层通过 `tracing` 记录播放过程；核心层保持完全静默

pub mod cancel;
pub mod config;
pub mod controller;
pub mod effect;
pub mod resolve;
pub mod surface;

pub use cancel::{Cancellable, OpState};
pub use config::PlaybackConfig;
pub use controller::{Phase, PlaybackController};
pub use effect::TextEffectOp;
pub use surface::{RenderSurface, SurfaceError};
