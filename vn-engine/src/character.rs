//! # Character 模块
//!
//! 定义角色实体与角色句柄。
//!
//! ## 设计说明
//!
//! - 角色存放在 [`Script`](crate::Script) 的 cast 区域中，
//!   外部通过 [`CharacterId`] 句柄引用，避免 Scene 与 Character 之间的引用环
//! - 角色对当前场景的引用是一个弱句柄（场景 id），
//!   只用于回答"我的动作追加到哪个队列"，不构成所有权关系
//! - 名称不要求唯一，仅用于展示与渲染层绑定

use serde::{Deserialize, Serialize};

use crate::position::{Position, Size};

/// 角色句柄
///
/// 指向所属 [`Script`](crate::Script) cast 区域的索引。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(usize);

impl CharacterId {
    /// 由裸索引构造句柄（测试与内部使用）
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// 返回底层索引
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 角色实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// 角色名称（展示用）
    name: String,
    /// 当前立绘 URL
    image: Option<String>,
    /// 存储的默认位置
    position: Option<Position>,
    /// 存储的默认尺寸
    size: Option<Size>,
    /// 当前绑定的场景 id（弱句柄，由所属 Script 解析）
    scene: Option<String>,
}

impl Character {
    /// 创建新角色
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
            position: None,
            size: None,
            scene: None,
        }
    }

    /// 设置初始立绘
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// 设置默认位置
    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// 设置默认尺寸
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// 角色名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 当前立绘 URL
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// 存储的默认位置
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// 设置默认位置（纯存储，无副作用，不校验值的形状）
    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    /// 存储的默认尺寸
    pub fn size(&self) -> Option<&Size> {
        self.size.as_ref()
    }

    /// 设置默认尺寸（纯存储，无副作用）
    pub fn set_size(&mut self, size: Option<Size>) {
        self.size = size;
    }

    /// 当前绑定的场景 id
    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    /// 是否已绑定场景
    pub fn in_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// 绑定到场景（由 `Script::enter` 调用）
    pub(crate) fn bind_scene(&mut self, scene_id: impl Into<String>) {
        self.scene = Some(scene_id.into());
    }

    /// 解除场景绑定，角色失去播放能力
    pub fn detach(&mut self) {
        self.scene = None;
    }

    /// 直接更新存储的立绘（不经过动作日志）
    ///
    /// 带副作用的版本见 [`Script::set_image`](crate::Script::set_image)，
    /// 它在角色绑定场景时会同时追加 `SetImage` 动作。
    pub(crate) fn store_image(&mut self, image: impl Into<String>) {
        self.image = Some(image.into());
    }
}
