//! # Cancel 模块
//!
//! 可取消操作的最小状态机。
//!
//! ## 设计说明
//!
//! - 状态只有三个：`Pending → Completed | Cancelled`，终态不可再变
//! - 取消语义是"成功的提前完成"，不是错误；取消已终结的操作是 no-op
//! - 清理回调只在取消路径上执行，且恰好一次，在 `cancel` 返回前同步完成；
//!   自然完成不触发清理

/// 操作状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpState {
    /// 进行中
    Pending,
    /// 自然完成（终态）
    Completed,
    /// 被取消（终态）
    Cancelled,
}

/// 可取消操作
///
/// 携带一个可选的清理回调，由取消路径恰好执行一次。
pub struct Cancellable {
    state: OpState,
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl Cancellable {
    /// 创建无清理回调的操作
    pub fn new() -> Self {
        Self {
            state: OpState::Pending,
            cleanup: None,
        }
    }

    /// 创建带清理回调的操作
    pub fn with_cleanup(cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            state: OpState::Pending,
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// 取消操作
    ///
    /// 仅在 `Pending` 时生效：同步执行清理回调后转入 `Cancelled`，
    /// 返回 `true`。已终结时什么都不做，返回 `false`（幂等）。
    pub fn cancel(&mut self) -> bool {
        if self.state != OpState::Pending {
            return false;
        }
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
        self.state = OpState::Cancelled;
        true
    }

    /// 标记自然完成
    ///
    /// 仅在 `Pending` 时生效，不执行清理回调。
    pub fn complete(&mut self) -> bool {
        if self.state != OpState::Pending {
            return false;
        }
        // 完成路径不清理，回调直接丢弃
        self.cleanup = None;
        self.state = OpState::Completed;
        true
    }

    /// 当前状态
    pub fn state(&self) -> OpState {
        self.state
    }

    /// 是否进行中
    pub fn is_pending(&self) -> bool {
        self.state == OpState::Pending
    }

    /// 是否已终结（完成或取消）
    pub fn is_done(&self) -> bool {
        self.state != OpState::Pending
    }

    /// 是否被取消
    pub fn is_cancelled(&self) -> bool {
        self.state == OpState::Cancelled
    }

    /// 是否自然完成
    pub fn is_completed(&self) -> bool {
        self.state == OpState::Completed
    }
}

impl Default for Cancellable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cancellable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cancellable")
            .field("state", &self.state)
            .field("has_cleanup", &self.cleanup.is_some())
            .finish()
    }
}
