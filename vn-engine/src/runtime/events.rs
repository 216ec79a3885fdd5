//! # Events 模块
//!
//! Engine 的发布/订阅抽象。
//!
//! ## 设计说明
//!
//! - 事件词汇表是封闭的和类型（[`EngineEvent`]），不支持任意字符串事件名
//! - 每种事件按注册顺序维护监听器有序集合；派发是同步的普通迭代，
//!   单线程模型下不需要任何并发原语
//! - 监听器身份是注册时返回的 [`ListenerId`]：`off` 未知 id 为 no-op，
//!   同一闭包注册两次就是两个监听器
//! - 监听器内的 panic 不被捕获，照常向派发调用点传播

use crate::state::VarValue;

/// 事件种类
///
/// 用于监听器注册时声明关注的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// 场景切换
    SceneChange,
    /// 变量变更
    VariableChange,
}

/// Engine 事件
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// 当前场景已切换
    SceneChange {
        /// 新场景 id
        scene_id: String,
    },

    /// 变量已写入
    VariableChange {
        /// 变量名
        key: String,
        /// 新值
        value: VarValue,
    },
}

impl EngineEvent {
    /// 事件所属种类
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SceneChange { .. } => EventKind::SceneChange,
            Self::VariableChange { .. } => EventKind::VariableChange,
        }
    }
}

/// 监听器标识
///
/// 注册时分配，单调递增，用于 `off`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// 监听器回调
pub type Listener = Box<dyn FnMut(&EngineEvent)>;

/// 监听器注册表
///
/// 按注册顺序存储 (id, 关注种类, 回调) 三元组。
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

impl ListenerRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册监听器，返回其标识
    pub fn on(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, listener));
        id
    }

    /// 注销监听器
    ///
    /// 返回是否确有移除；未知 id 为 no-op，从不报错。
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    /// 同步派发事件
    ///
    /// 按注册顺序调用所有关注该种类的监听器，全部调用完毕后才返回。
    pub fn emit(&mut self, event: &EngineEvent) {
        let kind = event.kind();
        for (_, k, listener) in self.listeners.iter_mut() {
            if *k == kind {
                listener(event);
            }
        }
    }

    /// 监听器数量
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.listeners.len())
            .finish()
    }
}
