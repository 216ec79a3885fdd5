//! # Runtime 模块
//!
//! 运行时层：Engine 编排器与事件派发。
//! 数据模型（Script / Scene / Character）在 crate 顶层，
//! 本模块只负责"推进故事"这件事。

pub mod engine;
pub mod events;

pub use engine::Engine;
pub use events::{EngineEvent, EventKind, Listener, ListenerId, ListenerRegistry};
