//! # Scene 模块
//!
//! 定义场景：一段有标识、有序的动作日志，外加展示选项。
//!
//! ## 设计说明
//!
//! - 场景 id 构造后不可变，在所属 Script 内全局唯一
//! - 动作日志只追加；`add_action` 不校验引用的角色是否为场景成员，
//!   这是刻意的宽松策略（支持高级/手工构造），
//!   防御责任转移到播放层
//! - 成员集合只用于成员关系判定，不保证遍历顺序

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::action::Action;
use crate::character::CharacterId;

/// 场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 场景 id（构造后不可变）
    id: String,
    /// 背景图 URL（可选）
    background: Option<String>,
    /// 动作日志（只追加）
    actions: Vec<Action>,
    /// 成员角色集合
    members: HashSet<CharacterId>,
}

impl Scene {
    /// 创建新场景
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            background: None,
            actions: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// 设置背景图
    pub fn with_background(mut self, url: impl Into<String>) -> Self {
        self.background = Some(url.into());
        self
    }

    /// 场景 id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 背景图 URL
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// 无条件追加一条动作
    ///
    /// 不校验动作引用的角色是否为场景成员。
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// 动作日志（借用视图）
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// 动作日志快照（防御性拷贝）
    ///
    /// 调用方修改返回值不影响底层日志，
    /// 适用于一边遍历一边继续追加的构建期场景。
    pub fn actions_snapshot(&self) -> Vec<Action> {
        self.actions.clone()
    }

    /// 按索引取动作
    pub fn action(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    /// 动作数量
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// 动作日志是否为空
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// 判断角色是否为场景成员
    pub fn is_member(&self, character: CharacterId) -> bool {
        self.members.contains(&character)
    }

    /// 成员集合
    pub fn members(&self) -> &HashSet<CharacterId> {
        &self.members
    }

    /// 登记成员（由 `Script::enter` 调用）
    pub(crate) fn add_member(&mut self, character: CharacterId) {
        self.members.insert(character);
    }
}
