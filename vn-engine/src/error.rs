//! # Error 模块
//!
//! 定义 vn-engine 中使用的错误类型。
//!
//! ## 设计原则
//!
//! - 所有错误都属于"程序员错误"类（非法 id、未绑定场景等），
//!   在违规点同步抛出，不做重试
//! - 错误消息必须指明出错的 id / 名称，便于创作期定位
//! - 查找类接口（`scene` / `scene_by_index` / `scene_position` / `next`）
//!   返回哨兵值（`Option` / `bool`），不抛错

use thiserror::Error;

use crate::character::CharacterId;

/// vn-engine 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VnError {
    /// 场景未找到
    ///
    /// 由 Engine 构造、`jump_to`、`Script::enter` 等
    /// 要求场景 id 必须存在的操作抛出。
    #[error("Scene '{id}' 未找到")]
    SceneNotFound {
        /// 出错的场景 id
        id: String,
    },

    /// 角色未绑定场景
    ///
    /// 角色操作（`say` / `show` / `hide`）要求角色已加入某个场景。
    /// 调用方先通过 `Script::enter` 加入场景即可恢复。
    #[error("角色 '{name}' 尚未加入任何 Scene，无法执行该操作")]
    NotInScene {
        /// 角色名称
        name: String,
    },

    /// 场景 id 冲突
    ///
    /// `Script::add_scene` 插入重复 id 时抛出，Script 先前状态不受影响。
    #[error("Scene id '{id}' 已存在")]
    DuplicateSceneId {
        /// 冲突的场景 id
        id: String,
    },

    /// 角色句柄无效
    ///
    /// 句柄未指向所属 Script cast 区域中的任何角色。
    #[error("角色句柄 {id} 无效")]
    CharacterNotFound {
        /// 失效的句柄
        id: CharacterId,
    },
}

/// Result 类型别名
pub type VnResult<T> = Result<T, VnError>;
