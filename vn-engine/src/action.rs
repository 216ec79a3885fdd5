//! # Action 模块
//!
//! 定义场景动作日志中的动作类型。
//!
//! ## 设计原则
//!
//! - **和类型建模**：每种动作只携带自己必需的字段，
//!   结构性非法的动作在类型层面不可表示
//! - **只追加**：动作一旦追加到场景即不可变，播放器可以安全地
//!   按索引遍历，而不担心已消费的动作被修改
//! - 动作通过 [`CharacterId`] 引用角色，句柄由所属 [`Script`](crate::Script) 解析

use serde::{Deserialize, Serialize};

use crate::character::CharacterId;
use crate::position::{Position, Size};

/// 对话文字效果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEffectKind {
    /// 淡入显示
    Fade,
    /// 打字机逐字显示
    #[default]
    Typewriter,
    /// 无效果，立即显示全文
    None,
}

/// 场景动作
///
/// 场景播放的一个步骤。由角色操作（`say` / `show` / `hide` / 换立绘）
/// 追加到所属场景的动作日志中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// 对话
    Dialogue {
        /// 说话角色
        character: CharacterId,
        /// 对话内容
        text: String,
        /// 文字效果
        effect: TextEffectKind,
    },

    /// 显示角色
    Show {
        /// 目标角色
        character: CharacterId,
        /// 显示位置（追加时已合并过覆盖值与角色存储值）
        position: Option<Position>,
        /// 显示尺寸（同上）
        size: Option<Size>,
    },

    /// 隐藏角色
    Hide {
        /// 目标角色
        character: CharacterId,
    },

    /// 更换角色立绘
    SetImage {
        /// 目标角色
        character: CharacterId,
        /// 新立绘 URL
        image: String,
    },
}

impl Action {
    /// 返回产生此动作的角色句柄
    pub fn character(&self) -> CharacterId {
        match self {
            Self::Dialogue { character, .. }
            | Self::Show { character, .. }
            | Self::Hide { character }
            | Self::SetImage { character, .. } => *character,
        }
    }

    /// 判断动作是否阻塞播放
    ///
    /// 只有对话需要等待外部推进信号，其余动作立即生效并继续。
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Dialogue { .. })
    }
}
