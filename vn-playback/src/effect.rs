//! # Effect 模块
//!
//! 对话文字效果：打字机逐字显示与淡入。
//!
//! ## 设计说明
//!
//! - 效果由宿主帧循环通过 `advance(dt)` 驱动，本身不持有计时器
//! - 逐字显示按 `char` 计数，多字节文字（中文、emoji）不会被截断
//! - 取消（玩家点击跳过）通过内嵌的 [`Cancellable`] 表达：
//!   首次取消把视觉状态强制推到终态（全文可见、不透明度 1），
//!   之后 `advance` 不再产生任何进度

use vn_engine::TextEffectKind;

use crate::cancel::{Cancellable, OpState};

/// 进行中的对话文字效果
#[derive(Debug)]
pub struct TextEffectOp {
    /// 说话角色名（展示用）
    speaker: String,
    /// 全文（按字符切分）
    chars: Vec<char>,
    /// 效果种类
    kind: TextEffectKind,
    /// 打字机速度（字符/秒）
    speed: f32,
    /// 淡入时长（秒）
    duration: f32,
    /// 已经过时间（秒）
    elapsed: f32,
    /// 当前可见字符数
    visible: usize,
    /// 当前不透明度（0.0–1.0）
    opacity: f32,
    op: Cancellable,
}

impl TextEffectOp {
    /// 创建新效果
    ///
    /// `TextEffectKind::None` 在构造时即完成（全文可见）。
    pub fn new(
        speaker: impl Into<String>,
        text: &str,
        kind: TextEffectKind,
        speed: f32,
        duration: f32,
    ) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut effect = Self {
            speaker: speaker.into(),
            chars,
            kind,
            speed,
            duration,
            elapsed: 0.0,
            visible: 0,
            opacity: 0.0,
            op: Cancellable::new(),
        };
        match kind {
            TextEffectKind::None => {
                effect.finish_visuals();
                effect.op.complete();
            }
            TextEffectKind::Typewriter => {
                // 打字机从 0 个字符开始，不透明度恒为 1
                effect.opacity = 1.0;
            }
            TextEffectKind::Fade => {
                // 淡入从全文 + 不透明度 0 开始
                effect.visible = effect.chars.len();
            }
        }
        effect
    }

    /// 推进效果
    ///
    /// 返回效果是否仍在进行中。已终结时为 no-op，返回 `false`。
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.op.is_done() {
            return false;
        }
        self.elapsed += dt;

        match self.kind {
            TextEffectKind::Typewriter => {
                let revealed = (self.elapsed * self.speed).floor() as usize;
                self.visible = revealed.min(self.chars.len());
                if self.visible == self.chars.len() {
                    self.op.complete();
                }
            }
            TextEffectKind::Fade => {
                if self.duration <= 0.0 || self.elapsed >= self.duration {
                    self.opacity = 1.0;
                    self.op.complete();
                } else {
                    self.opacity = self.elapsed / self.duration;
                }
            }
            TextEffectKind::None => {}
        }

        self.op.is_pending()
    }

    /// 取消效果（玩家跳过）
    ///
    /// 首次取消强制终态视觉（全文、不透明度 1），返回 `true`；
    /// 已终结时 no-op，返回 `false`。
    pub fn cancel(&mut self) -> bool {
        if !self.op.cancel() {
            return false;
        }
        self.finish_visuals();
        true
    }

    fn finish_visuals(&mut self) {
        self.visible = self.chars.len();
        self.opacity = 1.0;
    }

    /// 当前应展示的文字
    pub fn visible_text(&self) -> String {
        self.chars[..self.visible].iter().collect()
    }

    /// 当前不透明度
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// 说话角色名
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// 效果是否已终结（完成或取消）
    pub fn is_done(&self) -> bool {
        self.op.is_done()
    }

    /// 操作状态
    pub fn state(&self) -> OpState {
        self.op.state()
    }
}
