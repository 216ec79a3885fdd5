//! # Engine 模块
//!
//! 编排层：持有 Script 与状态管理器，负责场景导航、变量写入与事件派发。
//!
//! ## 执行模型
//!
//! Engine 本身不播放任何东西。它维护"当前场景"与变量表，
//! 并在状态变化时同步派发事件；播放交给订阅了场景切换的播放控制器
//! （见 `vn-playback`）。
//!
//! ```text
//! jump_to / next ──► StateManager（推历史、换场景）──► emit(SceneChange)
//! set_variable   ──► StateManager（写变量表）      ──► emit(VariableChange)
//! ```

use crate::error::{VnError, VnResult};
use crate::runtime::events::{EngineEvent, EventKind, Listener, ListenerId, ListenerRegistry};
use crate::scene::Scene;
use crate::script::Script;
use crate::state::{GameState, StateManager, VarValue};
use std::collections::HashMap;

/// 演出引擎
///
/// # 使用示例
///
/// ```ignore
/// let mut engine = Engine::new(script, "intro")?;
///
/// engine.on(EventKind::SceneChange, Box::new(|ev| { /* ... */ }));
/// engine.next();          // 推进到下一场
/// engine.jump_to("ch3")?; // 或按 id 跳转
/// ```
pub struct Engine {
    /// 故事脚本（Engine 不修改其内容）
    script: Script,
    /// 状态管理器（当前场景 + 变量 + 历史）
    state: StateManager,
    /// 监听器注册表
    listeners: ListenerRegistry,
    /// 场景切换计数（单调递增）
    ///
    /// 跳转到当前场景同一 id 也是一次真实切换（推历史、发事件），
    /// 仅凭 id 无法区分；轮询方比较该计数即可捕获同场景重播。
    transition_count: u64,
}

impl Engine {
    /// 创建新的 Engine
    ///
    /// 起始场景 id 必须存在于 Script 中，否则返回 [`VnError::SceneNotFound`]。
    /// 构造成功时立即派发一次 `SceneChange`，
    /// 使构造期间同步挂接的监听器无需单独的"立即渲染"调用。
    pub fn new(script: Script, start_scene_id: &str) -> VnResult<Self> {
        if script.scene(start_scene_id).is_none() {
            return Err(VnError::SceneNotFound {
                id: start_scene_id.to_string(),
            });
        }

        let mut engine = Self {
            script,
            state: StateManager::new(),
            listeners: ListenerRegistry::new(),
            transition_count: 1,
        };
        engine.state.set_current_scene(start_scene_id);
        engine.emit(EngineEvent::SceneChange {
            scene_id: start_scene_id.to_string(),
        });
        Ok(engine)
    }

    /// 从存档状态恢复 Engine
    ///
    /// `state.current_scene_id` 若存在，必须指向 Script 中的场景。
    pub fn restore(script: Script, state: GameState) -> VnResult<Self> {
        if let Some(id) = &state.current_scene_id {
            if script.scene(id).is_none() {
                return Err(VnError::SceneNotFound { id: id.clone() });
            }
        }
        Ok(Self {
            script,
            state: StateManager::restore(state),
            listeners: ListenerRegistry::new(),
            transition_count: 1,
        })
    }

    // ── 场景导航 ──

    /// 跳转到指定场景
    ///
    /// id 不存在时返回 [`VnError::SceneNotFound`]，状态与事件都不触发。
    /// 成功时更新当前场景（旧场景 id 推入历史）并派发 `SceneChange`。
    pub fn jump_to(&mut self, scene_id: &str) -> VnResult<()> {
        if self.script.scene(scene_id).is_none() {
            return Err(VnError::SceneNotFound {
                id: scene_id.to_string(),
            });
        }
        self.state.set_current_scene(scene_id);
        self.transition_count += 1;
        self.emit(EngineEvent::SceneChange {
            scene_id: scene_id.to_string(),
        });
        Ok(())
    }

    /// 场景切换计数
    ///
    /// 每次成功的场景切换（含跳转到同一 id）递增；
    /// 构造/恢复后初值为 1。轮询方据此判断是否需要重新采纳场景。
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    /// 推进到脚本中的下一场
    ///
    /// 以下情况返回 `false`（无副作用，不派发事件）：
    /// 没有当前场景、当前场景不在 Script 中、已是最后一场。
    /// 否则委托 [`jump_to`](Self::jump_to) 并返回 `true`。
    pub fn next(&mut self) -> bool {
        let Some(current_id) = self.state.current_scene_id() else {
            return false;
        };
        let Some(index) = self.script.scene_position(current_id) else {
            return false;
        };
        let Some(next_scene) = self.script.scene_by_index(index + 1) else {
            return false;
        };

        let next_id = next_scene.id().to_string();
        // id 刚从 Script 里取出，jump_to 不会失败
        self.jump_to(&next_id).is_ok()
    }

    /// 当前场景 id
    pub fn current_scene_id(&self) -> Option<&str> {
        self.state.current_scene_id()
    }

    /// 当前场景
    pub fn current_scene(&self) -> Option<&Scene> {
        self.state
            .current_scene_id()
            .and_then(|id| self.script.scene(id))
    }

    // ── 变量 ──

    /// 写入变量并派发 `VariableChange`
    pub fn set_variable(&mut self, key: impl Into<String>, value: VarValue) {
        let key = key.into();
        self.state.set_variable(key.clone(), value.clone());
        self.emit(EngineEvent::VariableChange { key, value });
    }

    /// 读取变量
    pub fn variable(&self, key: &str) -> Option<&VarValue> {
        self.state.variable(key)
    }

    /// 全部变量
    pub fn variables(&self) -> &HashMap<String, VarValue> {
        self.state.variables()
    }

    // ── 事件 ──

    /// 注册监听器
    pub fn on(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        self.listeners.on(kind, listener)
    }

    /// 注销监听器（未知 id 为 no-op）
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.off(id)
    }

    /// 同步派发：所有匹配监听器按注册顺序调用完毕后才返回。
    /// 监听器 panic 不被捕获。
    fn emit(&mut self, event: EngineEvent) {
        self.listeners.emit(&event);
    }

    // ── 访问器 ──

    /// 故事脚本
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// 状态快照（存档用）
    pub fn state(&self) -> GameState {
        self.state.snapshot()
    }

    /// 场景历史
    pub fn scene_history(&self) -> &[String] {
        self.state.scene_history()
    }

    /// 清空场景历史
    pub fn clear_history(&mut self) {
        self.state.clear_history();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("current_scene", &self.state.current_scene_id())
            .field("scenes", &self.script.scene_count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_scene_script() -> Script {
        let mut script = Script::new();
        script
            .add_scene(Scene::new("intro").with_background("a.png"))
            .unwrap();
        script
            .add_scene(Scene::new("ch1").with_background("b.png"))
            .unwrap();
        script
    }

    #[test]
    fn test_engine_construction() {
        let engine = Engine::new(two_scene_script(), "intro").unwrap();
        assert_eq!(engine.current_scene().unwrap().id(), "intro");
        // 起始场景不进入历史
        assert!(engine.scene_history().is_empty());
    }

    #[test]
    fn test_engine_construction_unknown_scene() {
        let err = Engine::new(two_scene_script(), "missing").unwrap_err();
        assert!(matches!(err, VnError::SceneNotFound { ref id } if id == "missing"));
    }

    #[test]
    fn test_next_walks_insertion_order() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();

        assert!(engine.next());
        assert_eq!(engine.current_scene().unwrap().id(), "ch1");

        // 最后一场：no-op，场景不变
        assert!(!engine.next());
        assert_eq!(engine.current_scene().unwrap().id(), "ch1");
    }

    #[test]
    fn test_transition_count_increments_on_same_id_jump() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();
        assert_eq!(engine.transition_count(), 1);

        // 跳到同一 id：计数照常递增（id 不变也是一次真实切换）
        engine.jump_to("intro").unwrap();
        assert_eq!(engine.transition_count(), 2);
        assert_eq!(engine.scene_history(), ["intro"]);

        assert!(engine.next());
        assert_eq!(engine.transition_count(), 3);

        // 失败的跳转不计数
        assert!(engine.jump_to("missing").is_err());
        assert_eq!(engine.transition_count(), 3);
    }

    #[test]
    fn test_jump_to_pushes_history() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();
        engine.jump_to("ch1").unwrap();
        engine.jump_to("intro").unwrap();

        assert_eq!(engine.scene_history(), ["intro", "ch1"]);
    }

    #[test]
    fn test_jump_to_unknown_is_error_without_side_effect() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();
        let seen = Rc::new(RefCell::new(0));
        let seen2 = Rc::clone(&seen);
        engine.on(
            EventKind::SceneChange,
            Box::new(move |_| *seen2.borrow_mut() += 1),
        );

        assert!(engine.jump_to("missing").is_err());
        assert_eq!(engine.current_scene().unwrap().id(), "intro");
        assert!(engine.scene_history().is_empty());
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn test_scene_change_event_payload() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        engine.on(
            EventKind::SceneChange,
            Box::new(move |ev| {
                if let EngineEvent::SceneChange { scene_id } = ev {
                    seen2.borrow_mut().push(scene_id.clone());
                }
            }),
        );

        engine.next();
        engine.jump_to("intro").unwrap();
        assert_eq!(*seen.borrow(), ["ch1", "intro"]);
    }

    #[test]
    fn test_variable_change_event() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        engine.on(
            EventKind::VariableChange,
            Box::new(move |ev| {
                if let EngineEvent::VariableChange { key, value } = ev {
                    seen2.borrow_mut().push((key.clone(), value.clone()));
                }
            }),
        );

        engine.set_variable("affection", json!(5));
        assert_eq!(engine.variable("affection"), Some(&json!(5)));
        assert_eq!(*seen.borrow(), [("affection".to_string(), json!(5))]);
    }

    #[test]
    fn test_off_stops_delivery() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();
        let hits = Rc::new(RefCell::new(0));
        let hits2 = Rc::clone(&hits);
        let id = engine.on(
            EventKind::SceneChange,
            Box::new(move |_| *hits2.borrow_mut() += 1),
        );

        engine.next();
        assert_eq!(*hits.borrow(), 1);

        assert!(engine.off(id));
        engine.jump_to("intro").unwrap();
        assert_eq!(*hits.borrow(), 1);
        // 再次 off 为 no-op
        assert!(!engine.off(id));
    }

    #[test]
    fn test_restore_from_saved_state() {
        let mut engine = Engine::new(two_scene_script(), "intro").unwrap();
        engine.next();
        engine.set_variable("route", json!("b"));
        let saved = engine.state();

        let restored = Engine::restore(two_scene_script(), saved).unwrap();
        assert_eq!(restored.current_scene_id(), Some("ch1"));
        assert_eq!(restored.scene_history(), ["intro"]);
        assert_eq!(restored.variable("route"), Some(&json!("b")));
    }

    #[test]
    fn test_restore_rejects_unknown_scene() {
        let state = GameState {
            current_scene_id: Some("gone".to_string()),
            ..GameState::default()
        };
        assert!(matches!(
            Engine::restore(two_scene_script(), state),
            Err(VnError::SceneNotFound { .. })
        ));
    }
}
