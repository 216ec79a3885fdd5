//! # Controller 模块
//!
//! 播放控制器：把场景的动作日志变成画面上的演出。
//!
//! ## 执行模型
//!
//! 控制器由宿主轮询驱动，三个入口都会先与 Engine 的当前场景对齐：
//!
//! ```text
//! attach  ──► 采纳当前场景，从头处理
//! update  ──► 推进进行中的文字效果，画一帧
//! advance ──► 外部推进信号（点击/按键）
//! ```
//!
//! 处理循环同步消费非阻塞动作（Show / Hide / SetImage），
//! 遇到对话则启动文字效果并交还控制权。推进信号是两段式的：
//! 效果进行中 → 取消（直接显示全文），停在原地；
//! 效果已结束 → 消费下一条动作。
//! 场景动作耗尽时尝试 `engine.next()`，失败则进入终态 `SceneExhausted`。

use std::collections::HashMap;
use tracing::{debug, trace, warn};

use vn_engine::{Action, CharacterId, Engine};

use crate::config::PlaybackConfig;
use crate::effect::TextEffectOp;
use crate::surface::RenderSurface;

/// 播放阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 未采纳任何场景
    Idle,
    /// 对话文字效果进行中
    Processing,
    /// 对话显示完毕，等待外部推进信号
    WaitingForAdvance,
    /// 剧本播放完毕（终态，后续信号一律忽略）
    SceneExhausted,
}

/// 播放控制器
///
/// 独占渲染表面；自身不持有 Engine，而是在每次调用时借入，
/// 借用规则天然保证"同一时刻只有一个推进者"。
pub struct PlaybackController<S: RenderSurface> {
    surface: S,
    config: PlaybackConfig,
    /// 正在播放的场景 id
    active_scene: Option<String>,
    /// 已采纳的 Engine 场景切换计数
    ///
    /// 对齐检查比较计数而非 id：跳转到同一 id 也是一次真实切换，
    /// 必须从头重播场景。
    seen_transition: u64,
    /// 场景内动作游标
    index: usize,
    phase: Phase,
    /// 进行中（或刚结束）的对话效果
    in_flight: Option<TextEffectOp>,
    /// 角色 → 渲染句柄
    visuals: HashMap<CharacterId, S::Handle>,
}

impl<S: RenderSurface> PlaybackController<S> {
    /// 使用默认配置创建控制器
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, PlaybackConfig::default())
    }

    /// 使用指定配置创建控制器
    pub fn with_config(surface: S, config: PlaybackConfig) -> Self {
        Self {
            surface,
            config,
            active_scene: None,
            seen_transition: 0,
            index: 0,
            phase: Phase::Idle,
            in_flight: None,
            visuals: HashMap::new(),
        }
    }

    /// 采纳 Engine 的当前场景并开始播放
    pub fn attach(&mut self, engine: &mut Engine) {
        self.adopt(engine);
        self.process(engine);
    }

    /// 推进进行中的文字效果（宿主帧循环调用）
    ///
    /// Engine 的场景在两帧之间变了（如外部 `jump_to`）则先采纳新场景。
    pub fn update(&mut self, dt: f32, engine: &mut Engine) {
        if self.sync(engine) {
            self.process(engine);
            return;
        }
        let Some(effect) = self.in_flight.as_mut() else {
            return;
        };
        if effect.is_done() {
            return;
        }

        effect.advance(dt);
        let text = effect.visible_text();
        let opacity = effect.opacity();
        self.surface.set_dialogue(effect.speaker(), &text, opacity);
        if effect.is_done() {
            self.phase = Phase::WaitingForAdvance;
        }
    }

    /// 外部推进信号（点击/按键）
    ///
    /// 两段式语义：效果进行中先取消（全文立即可见），不消费动作；
    /// 等待中才消费下一条动作。终态与未采纳场景时信号被忽略。
    pub fn advance(&mut self, engine: &mut Engine) {
        if self.sync(engine) {
            self.process(engine);
            return;
        }

        match self.phase {
            Phase::Idle => {
                trace!("推进信号忽略：尚未采纳场景");
            }
            Phase::SceneExhausted => {
                trace!("推进信号忽略：剧本已播放完毕");
            }
            Phase::Processing => {
                if let Some(effect) = self.in_flight.as_mut() {
                    if effect.cancel() {
                        let text = effect.visible_text();
                        let opacity = effect.opacity();
                        self.surface.set_dialogue(effect.speaker(), &text, opacity);
                        self.phase = Phase::WaitingForAdvance;
                        return;
                    }
                }
                trace!("推进信号丢弃：处理中但无进行中的效果");
            }
            Phase::WaitingForAdvance => {
                self.in_flight = None;
                self.index += 1;
                self.process(engine);
            }
        }
    }

    /// 当前播放阶段
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 当前动作游标
    pub fn cursor(&self) -> usize {
        self.index
    }

    /// 正在播放的场景 id
    pub fn active_scene(&self) -> Option<&str> {
        self.active_scene.as_deref()
    }

    /// 渲染表面（测试与宿主检视用）
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// 与 Engine 当前场景对齐，返回是否采纳了新场景
    ///
    /// 比较切换计数而非场景 id：`jump_to` 到正在播放的同一场景
    /// 也会推进计数，重播同样要发生。
    fn sync(&mut self, engine: &Engine) -> bool {
        if self.seen_transition == engine.transition_count() {
            return false;
        }
        self.adopt(engine);
        true
    }

    /// 采纳 Engine 的当前场景：重置游标与视觉绑定，应用新背景
    fn adopt(&mut self, engine: &Engine) {
        for (_, handle) in std::mem::take(&mut self.visuals) {
            self.surface.hide_visual(handle);
        }
        self.surface.clear_dialogue();
        self.in_flight = None;
        self.index = 0;
        self.phase = Phase::Idle;
        self.active_scene = engine.current_scene_id().map(String::from);
        self.seen_transition = engine.transition_count();

        if let Some(scene) = engine.current_scene() {
            debug!(scene = %scene.id(), "采纳场景");
            if let Some(bg) = scene.background() {
                let url = self.config.resolve_asset(bg);
                self.surface.apply_background(&url);
            }
        }
    }

    /// 从当前游标起处理动作，直到阻塞或场景耗尽
    fn process(&mut self, engine: &mut Engine) {
        loop {
            let Some(scene_id) = self.active_scene.clone() else {
                self.phase = Phase::Idle;
                return;
            };
            let action = match engine.script().scene(&scene_id) {
                Some(scene) => scene.action(self.index).cloned(),
                None => {
                    warn!(scene = %scene_id, "当前场景不在脚本中，停止播放");
                    self.phase = Phase::Idle;
                    return;
                }
            };

            let Some(action) = action else {
                // 场景耗尽：尝试推进到下一场，失败即剧本播放完毕
                if engine.next() {
                    self.adopt(engine);
                    continue;
                }
                debug!(scene = %scene_id, "剧本播放完毕");
                self.surface.clear_dialogue();
                self.phase = Phase::SceneExhausted;
                return;
            };

            // 句柄解析失败的动作跳过不播放，游标照常前进，队列永不卡死
            let Some(ch) = engine.script().character(action.character()) else {
                warn!(
                    scene = %scene_id,
                    index = self.index,
                    handle = %action.character(),
                    "动作引用的角色句柄无效，跳过"
                );
                self.index += 1;
                continue;
            };
            let name = ch.name().to_string();
            let stored_image = ch.image().map(String::from);

            trace!(scene = %scene_id, index = self.index, ?action, "派发动作");
            match action {
                Action::Dialogue { text, effect, .. } => {
                    let op = TextEffectOp::new(
                        name,
                        &text,
                        effect,
                        self.config.typewriter_speed,
                        self.config.fade_duration,
                    );
                    let frame = op.visible_text();
                    self.surface.set_dialogue(op.speaker(), &frame, op.opacity());
                    // 无效果的对话构造即完成，直接进入等待
                    self.phase = if op.is_done() {
                        Phase::WaitingForAdvance
                    } else {
                        Phase::Processing
                    };
                    self.in_flight = Some(op);
                    return;
                }
                Action::Show {
                    character,
                    position,
                    size,
                } => {
                    let handle = self.surface.ensure_character_visual(&name);
                    self.visuals.insert(character, handle);
                    if let Some(image) = &stored_image {
                        let url = self.config.resolve_asset(image);
                        self.surface.set_visual_image(handle, &url);
                    }
                    if let Some(position) = &position {
                        self.surface.position_visual(handle, position);
                    }
                    if let Some(size) = &size {
                        self.surface.size_visual(handle, size);
                    }
                }
                Action::Hide { character } => {
                    if let Some(handle) = self.visuals.get(&character).copied() {
                        self.surface.hide_visual(handle);
                    } else {
                        trace!(%character, "hide 忽略：角色从未显示");
                    }
                }
                Action::SetImage { character, image } => {
                    let handle = match self.visuals.get(&character).copied() {
                        Some(handle) => handle,
                        None => {
                            let handle = self.surface.ensure_character_visual(&name);
                            self.visuals.insert(character, handle);
                            handle
                        }
                    };
                    let url = self.config.resolve_asset(&image);
                    self.surface.set_visual_image(handle, &url);
                }
            }
            self.index += 1;
        }
    }
}
