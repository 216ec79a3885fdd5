//! # Script 模块
//!
//! Script 是完整故事的容器：有序的场景列表、id→索引的查找表，
//! 以及持有全部角色的 cast 区域。
//!
//! ## 设计说明
//!
//! - 场景插入顺序定义"下一场"语义；id 在 Script 内全局唯一
//! - 角色以 arena 方式存储，跨引用一律使用 [`CharacterId`] 句柄
//!   并经由 Script 解析，避免 Scene 与 Character 的引用环
//! - 角色操作（`say` / `show` / `hide` / `set_image`）定义在 Script 上：
//!   句柄解析与"我的动作追加到哪个场景"的判定都需要所属容器

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::action::{Action, TextEffectKind};
use crate::character::{Character, CharacterId};
use crate::error::{VnError, VnResult};
use crate::position::{Position, Size};
use crate::scene::Scene;

/// `show` / `enter` 的可选覆盖项
///
/// 每一项的合并规则：优先取覆盖值，否则回退到角色存储值，再否则留空。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowOptions {
    /// 覆盖位置
    pub position: Option<Position>,
    /// 覆盖尺寸
    pub size: Option<Size>,
}

impl ShowOptions {
    /// 只覆盖位置
    pub fn at(position: impl Into<Position>) -> Self {
        Self {
            position: Some(position.into()),
            size: None,
        }
    }
}

/// 完整故事脚本
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// 场景列表（插入顺序即播放顺序）
    scenes: Vec<Scene>,
    /// 场景 id → 索引
    #[serde(skip)]
    scene_index: HashMap<String, usize>,
    /// 角色 arena
    cast: Vec<Character>,
}

impl Script {
    /// 创建空脚本
    pub fn new() -> Self {
        Self::default()
    }

    // ── 场景管理 ──

    /// 追加场景
    ///
    /// id 冲突时返回 [`VnError::DuplicateSceneId`]，Script 状态不变。
    pub fn add_scene(&mut self, scene: Scene) -> VnResult<()> {
        if self.scene_index.contains_key(scene.id()) {
            return Err(VnError::DuplicateSceneId {
                id: scene.id().to_string(),
            });
        }
        self.scene_index
            .insert(scene.id().to_string(), self.scenes.len());
        self.scenes.push(scene);
        Ok(())
    }

    /// 按 id 查找场景
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scene_position(id).map(|i| &self.scenes[i])
    }

    /// 按插入序号查找场景
    pub fn scene_by_index(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// 查找场景的插入序号
    pub fn scene_position(&self, id: &str) -> Option<usize> {
        if let Some(&i) = self.scene_index.get(id) {
            return Some(i);
        }
        // 反序列化后索引为空，回退线性查找并不重建（Script 反序列化场景极少）
        self.scenes.iter().position(|s| s.id() == id)
    }

    /// 场景列表
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// 场景数量
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    // ── 角色管理 ──

    /// 登记角色，返回句柄
    pub fn add_character(&mut self, character: Character) -> CharacterId {
        let id = CharacterId::from_index(self.cast.len());
        self.cast.push(character);
        id
    }

    /// 按句柄查找角色
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.cast.get(id.index())
    }

    /// 按句柄查找角色（可变）
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.cast.get_mut(id.index())
    }

    /// cast 区域
    pub fn cast(&self) -> &[Character] {
        &self.cast
    }

    fn require_character(&self, id: CharacterId) -> VnResult<&Character> {
        self.character(id).ok_or(VnError::CharacterNotFound { id })
    }

    /// 解析角色当前绑定的场景索引
    ///
    /// 未绑定时返回 [`VnError::NotInScene`]。
    fn bound_scene_index(&self, id: CharacterId) -> VnResult<usize> {
        let character = self.require_character(id)?;
        let scene_id = character.scene().ok_or_else(|| VnError::NotInScene {
            name: character.name().to_string(),
        })?;
        // enter 只允许绑定已存在的场景，场景又不可移除，因此必然能解析
        self.scene_position(scene_id)
            .ok_or_else(|| VnError::SceneNotFound {
                id: scene_id.to_string(),
            })
    }

    // ── 角色操作 ──

    /// 让角色加入场景（对应创作 API 的 `scene.add(character)`）
    ///
    /// 登记成员关系、绑定角色的场景句柄，并立即追加一条 `Show` 动作：
    /// 加入即可见，除非之后显式 `hide`。
    /// 位置与尺寸按"覆盖值 ?? 存储值"合并。
    pub fn enter(
        &mut self,
        scene_id: &str,
        character: CharacterId,
        options: ShowOptions,
    ) -> VnResult<()> {
        let scene_idx = self
            .scene_position(scene_id)
            .ok_or_else(|| VnError::SceneNotFound {
                id: scene_id.to_string(),
            })?;

        let ch = self
            .cast
            .get_mut(character.index())
            .ok_or(VnError::CharacterNotFound { id: character })?;
        ch.bind_scene(scene_id);
        let position = options.position.or_else(|| ch.position().cloned());
        let size = options.size.or_else(|| ch.size().cloned());

        let scene = &mut self.scenes[scene_idx];
        scene.add_member(character);
        scene.add_action(Action::Show {
            character,
            position,
            size,
        });
        Ok(())
    }

    /// 角色说话，使用默认文字效果（打字机）
    pub fn say(&mut self, character: CharacterId, text: impl Into<String>) -> VnResult<()> {
        self.say_with(character, text, TextEffectKind::default())
    }

    /// 角色说话，指定文字效果
    pub fn say_with(
        &mut self,
        character: CharacterId,
        text: impl Into<String>,
        effect: TextEffectKind,
    ) -> VnResult<()> {
        let scene_idx = self.bound_scene_index(character)?;
        self.scenes[scene_idx].add_action(Action::Dialogue {
            character,
            text: text.into(),
            effect,
        });
        Ok(())
    }

    /// 显示角色
    ///
    /// 位置与尺寸按"覆盖值 ?? 存储值"合并后记录在动作中。
    pub fn show(&mut self, character: CharacterId, options: ShowOptions) -> VnResult<()> {
        let scene_idx = self.bound_scene_index(character)?;
        let ch = &self.cast[character.index()];
        let position = options.position.or_else(|| ch.position().cloned());
        let size = options.size.or_else(|| ch.size().cloned());
        self.scenes[scene_idx].add_action(Action::Show {
            character,
            position,
            size,
        });
        Ok(())
    }

    /// 隐藏角色
    pub fn hide(&mut self, character: CharacterId) -> VnResult<()> {
        let scene_idx = self.bound_scene_index(character)?;
        self.scenes[scene_idx].add_action(Action::Hide { character });
        Ok(())
    }

    /// 更换角色立绘
    ///
    /// 更新角色存储的立绘；若角色已绑定场景，同时追加一条 `SetImage` 动作，
    /// 让外观变化进入可重放的动作日志（带副作用的 setter，非纯存储）。
    pub fn set_image(&mut self, character: CharacterId, image: impl Into<String>) -> VnResult<()> {
        let image = image.into();
        let ch = self
            .cast
            .get_mut(character.index())
            .ok_or(VnError::CharacterNotFound { id: character })?;
        ch.store_image(image.clone());

        if ch.in_scene() {
            let scene_idx = self.bound_scene_index(character)?;
            self.scenes[scene_idx].add_action(Action::SetImage { character, image });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::NamedPosition;

    fn script_with_scene(id: &str) -> Script {
        let mut script = Script::new();
        script.add_scene(Scene::new(id)).unwrap();
        script
    }

    #[test]
    fn test_add_scene_round_trip() {
        let mut script = Script::new();
        script
            .add_scene(Scene::new("intro").with_background("a.png"))
            .unwrap();
        script
            .add_scene(Scene::new("ch1").with_background("b.png"))
            .unwrap();

        assert_eq!(script.scene("intro").unwrap().id(), "intro");
        assert_eq!(script.scene_position("intro"), Some(0));
        assert_eq!(script.scene_position("ch1"), Some(1));
        assert_eq!(script.scene_by_index(1).unwrap().id(), "ch1");
        assert_eq!(script.scene("missing"), None);
        assert_eq!(script.scene_position("missing"), None);
        assert!(script.scene_by_index(2).is_none());
    }

    #[test]
    fn test_duplicate_scene_id_rejected() {
        let mut script = script_with_scene("dup");
        let err = script.add_scene(Scene::new("dup")).unwrap_err();

        assert!(matches!(err, VnError::DuplicateSceneId { ref id } if id == "dup"));
        assert!(err.to_string().contains("dup"));
        // 先前状态不受影响
        assert_eq!(script.scene_count(), 1);
    }

    #[test]
    fn test_say_before_enter_fails() {
        let mut script = script_with_scene("s1");
        let alice = script.add_character(Character::new("Alice"));

        let err = script.say(alice, "hi").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Alice"));
        assert!(msg.contains("Scene"));

        assert!(matches!(
            script.show(alice, ShowOptions::default()),
            Err(VnError::NotInScene { .. })
        ));
        assert!(matches!(script.hide(alice), Err(VnError::NotInScene { .. })));
    }

    #[test]
    fn test_enter_auto_shows_then_say() {
        let mut script = script_with_scene("s1");
        let alice = script.add_character(Character::new("Alice"));

        script.enter("s1", alice, ShowOptions::default()).unwrap();
        script.say(alice, "Hello").unwrap();

        let scene = script.scene("s1").unwrap();
        assert_eq!(scene.len(), 2);
        assert!(scene.is_member(alice));
        assert!(matches!(
            scene.action(0),
            Some(Action::Show { character, .. }) if *character == alice
        ));
        assert!(matches!(
            scene.action(1),
            Some(Action::Dialogue { text, .. }) if text == "Hello"
        ));
    }

    #[test]
    fn test_enter_unknown_scene() {
        let mut script = Script::new();
        let alice = script.add_character(Character::new("Alice"));

        let err = script
            .enter("nowhere", alice, ShowOptions::default())
            .unwrap_err();
        assert!(matches!(err, VnError::SceneNotFound { ref id } if id == "nowhere"));
    }

    #[test]
    fn test_show_option_merge() {
        let mut script = script_with_scene("s1");
        let alice = script.add_character(
            Character::new("Alice")
                .with_position(NamedPosition::Left)
                .with_size(Size::width(0.3)),
        );
        script
            .enter("s1", alice, ShowOptions::at(NamedPosition::Center))
            .unwrap();
        script.show(alice, ShowOptions::default()).unwrap();

        let scene = script.scene("s1").unwrap();

        // enter：覆盖值优先
        assert!(matches!(
            scene.action(0),
            Some(Action::Show { position: Some(Position::Named(NamedPosition::Center)), size: Some(_), .. })
        ));
        // show：无覆盖时回退到存储值
        assert!(matches!(
            scene.action(1),
            Some(Action::Show { position: Some(Position::Named(NamedPosition::Left)), size: Some(_), .. })
        ));
    }

    #[test]
    fn test_set_image_side_effect() {
        let mut script = script_with_scene("s1");
        let alice = script.add_character(Character::new("Alice").with_image("a.png"));

        // 未绑定场景：只更新存储，不追加动作
        script.set_image(alice, "a_sad.png").unwrap();
        assert_eq!(script.character(alice).unwrap().image(), Some("a_sad.png"));
        assert!(script.scene("s1").unwrap().is_empty());

        // 绑定后：更新存储并追加 SetImage 动作
        script.enter("s1", alice, ShowOptions::default()).unwrap();
        script.set_image(alice, "a_happy.png").unwrap();

        let scene = script.scene("s1").unwrap();
        assert_eq!(scene.len(), 2); // Show + SetImage
        assert!(matches!(
            scene.action(1),
            Some(Action::SetImage { image, .. }) if image == "a_happy.png"
        ));
        assert_eq!(
            script.character(alice).unwrap().image(),
            Some("a_happy.png")
        );
    }

    #[test]
    fn test_dangling_character_handle() {
        let mut script = script_with_scene("s1");
        let ghost = CharacterId::from_index(99);

        assert!(matches!(
            script.say(ghost, "boo"),
            Err(VnError::CharacterNotFound { .. })
        ));
        assert!(matches!(
            script.enter("s1", ghost, ShowOptions::default()),
            Err(VnError::CharacterNotFound { .. })
        ));
    }

    #[test]
    fn test_script_serialization_keeps_lookup() {
        let mut script = Script::new();
        script.add_scene(Scene::new("intro")).unwrap();
        script.add_scene(Scene::new("ch1")).unwrap();
        let alice = script.add_character(Character::new("Alice"));
        script.enter("ch1", alice, ShowOptions::default()).unwrap();

        let json = serde_json::to_string(&script).unwrap();
        let loaded: Script = serde_json::from_str(&json).unwrap();

        // scene_index 被跳过序列化，查找回退到线性扫描
        assert_eq!(loaded.scene_position("ch1"), Some(1));
        assert_eq!(loaded.scene("ch1").unwrap().len(), 1);
        assert_eq!(loaded.cast().len(), 1);
    }
}
