//! # State 模块
//!
//! 定义游戏状态与状态管理器。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**
//! - 所有状态必须**可序列化**（存档/读档的最小单元就是 [`GameState`]）
//! - 状态管理器只做直接读写，不发通知——事件派发是上层 Engine 的职责

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 变量值
///
/// 变量表接受任意 JSON 兼容值（字符串、数字、布尔、嵌套映射/数组），
/// 直接复用 `serde_json::Value`，不做类型检查。
pub type VarValue = serde_json::Value;

/// 游戏状态
///
/// 存档/恢复的数据单元。本 crate 只定义形状，不规定序列化格式
/// （所有字段 JSON 兼容，derive 即得）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// 变量表
    pub variables: HashMap<String, VarValue>,
    /// 当前场景 id
    pub current_scene_id: Option<String>,
    /// 场景历史：每次场景切换前的旧 id，按时间顺序，允许重复
    pub scene_history: Vec<String>,
}

/// 状态管理器
///
/// 持有变量表、当前场景与场景历史。由创建它的 Engine 独占，
/// 不跨 Engine 共享。
#[derive(Debug, Clone, Default)]
pub struct StateManager {
    state: GameState,
}

impl StateManager {
    /// 创建空状态（无当前场景、无历史）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有状态恢复（读档）
    pub fn restore(state: GameState) -> Self {
        Self { state }
    }

    /// 设置变量（直接写入，不做类型检查，不发通知）
    pub fn set_variable(&mut self, key: impl Into<String>, value: VarValue) {
        self.state.variables.insert(key.into(), value);
    }

    /// 读取变量
    pub fn variable(&self, key: &str) -> Option<&VarValue> {
        self.state.variables.get(key)
    }

    /// 变量表
    pub fn variables(&self) -> &HashMap<String, VarValue> {
        &self.state.variables
    }

    /// 当前场景 id
    pub fn current_scene_id(&self) -> Option<&str> {
        self.state.current_scene_id.as_deref()
    }

    /// 切换当前场景
    ///
    /// 只要之前存在非空场景 id，就先把旧 id 推入历史再覆盖——
    /// 推入与否只取决于"之前是否有值"，与新旧 id 是否相同无关。
    /// 因此从 `None` 设置的第一个场景永远不会出现在历史中。
    pub fn set_current_scene(&mut self, id: impl Into<String>) {
        if let Some(prev) = self.state.current_scene_id.take() {
            self.state.scene_history.push(prev);
        }
        self.state.current_scene_id = Some(id.into());
    }

    /// 场景历史
    pub fn scene_history(&self) -> &[String] {
        &self.state.scene_history
    }

    /// 清空历史（不影响当前场景与变量）
    pub fn clear_history(&mut self) {
        self.state.scene_history.clear();
    }

    /// 状态快照
    ///
    /// 返回独立的拷贝，调用方修改快照不影响内部状态。
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_state() {
        let sm = StateManager::new();
        assert_eq!(sm.current_scene_id(), None);
        assert!(sm.scene_history().is_empty());
        assert!(sm.variables().is_empty());
    }

    #[test]
    fn test_first_scene_never_enters_history() {
        let mut sm = StateManager::new();

        sm.set_current_scene("s1");
        assert_eq!(sm.current_scene_id(), Some("s1"));
        assert!(sm.scene_history().is_empty());

        sm.set_current_scene("s2");
        assert_eq!(sm.current_scene_id(), Some("s2"));
        assert_eq!(sm.scene_history(), ["s1"]);
    }

    #[test]
    fn test_same_scene_still_pushes_history() {
        let mut sm = StateManager::new();
        sm.set_current_scene("s1");
        // 设置为相同 id：之前有非空值，依然推入
        sm.set_current_scene("s1");
        assert_eq!(sm.scene_history(), ["s1"]);
        assert_eq!(sm.current_scene_id(), Some("s1"));
    }

    #[test]
    fn test_history_allows_duplicates() {
        let mut sm = StateManager::new();
        sm.set_current_scene("a");
        sm.set_current_scene("b");
        sm.set_current_scene("a");
        sm.set_current_scene("b");
        assert_eq!(sm.scene_history(), ["a", "b", "a"]);
    }

    #[test]
    fn test_clear_history_only_touches_history() {
        let mut sm = StateManager::new();
        sm.set_variable("flag", json!(true));
        sm.set_current_scene("s1");
        sm.set_current_scene("s2");

        sm.clear_history();

        assert!(sm.scene_history().is_empty());
        assert_eq!(sm.current_scene_id(), Some("s2"));
        assert_eq!(sm.variable("flag"), Some(&json!(true)));
    }

    #[test]
    fn test_variables_accept_arbitrary_json() {
        let mut sm = StateManager::new();
        sm.set_variable("name", json!("Alice"));
        sm.set_variable("count", json!(3));
        sm.set_variable("nested", json!({ "a": [1, 2, 3] }));

        assert_eq!(sm.variable("count"), Some(&json!(3)));
        assert_eq!(sm.variable("missing"), None);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut sm = StateManager::new();
        sm.set_current_scene("s1");
        sm.set_variable("hp", json!(10));

        let mut snap = sm.snapshot();
        snap.variables.insert("hp".to_string(), json!(0));
        snap.scene_history.push("bogus".to_string());

        assert_eq!(sm.variable("hp"), Some(&json!(10)));
        assert!(sm.scene_history().is_empty());
    }

    #[test]
    fn test_state_serialization() {
        let mut sm = StateManager::new();
        sm.set_current_scene("s1");
        sm.set_current_scene("s2");
        sm.set_variable("route", json!("true-end"));

        let json = serde_json::to_string(&sm.snapshot()).unwrap();
        let loaded: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, sm.snapshot());

        let restored = StateManager::restore(loaded);
        assert_eq!(restored.current_scene_id(), Some("s2"));
        assert_eq!(restored.scene_history(), ["s1"]);
    }
}
