//! # vn-engine
//!
//! 视觉小说演出核心：纯逻辑、平台无关。
//!
//! ## 设计原则
//!
//! - **纯逻辑**：不做 IO、不做渲染、不依赖任何宿主环境。
//!   资源只以字符串路径/URL 出现，由上层（`vn-playback` 及宿主）解释
//! - **数据与推进分离**：Script / Scene / Character 是可序列化的数据模型，
//!   Engine 只负责导航与事件派发，播放节奏由上层控制
//! - **句柄而非引用**：角色以 [`CharacterId`] 句柄存取，
//!   场景间交叉引用全部走 id，整个 Script 可以整体克隆/序列化
//! - **显式错误**：约束违规（非法 id、未绑定场景）在违规点同步返回
//!   [`VnError`]；查找类接口返回 `Option`
//!
//! ## 分层
//!
//! ```text
//! ┌─────────────────────────────┐
//! │ vn-playback（播放控制器）     │  节奏、文字效果、渲染表面
//! ├─────────────────────────────┤
//! │ runtime（Engine + 事件）     │  场景导航、变量、派发
//! ├─────────────────────────────┤
//! │ 数据模型（Script / Scene /   │  可序列化、可克隆
//! │ Character / Action / State） │
//! └─────────────────────────────┘
//! ```

pub mod action;
pub mod character;
pub mod error;
pub mod position;
pub mod runtime;
pub mod scene;
pub mod script;
pub mod state;

pub use action::{Action, TextEffectKind};
pub use character::{Character, CharacterId};
pub use error::{VnError, VnResult};
pub use position::{AxisValue, NamedPosition, Position, Size};
pub use runtime::{Engine, EngineEvent, EventKind, Listener, ListenerId};
pub use scene::Scene;
pub use script::{Script, ShowOptions};
pub use state::{GameState, StateManager, VarValue};
