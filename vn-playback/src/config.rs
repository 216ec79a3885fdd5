//! # Config 模块
//!
//! 播放层配置：文字效果节奏与资源路径解析。

/// 播放配置
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// 打字机速度（字符/秒）
    pub typewriter_speed: f32,
    /// 淡入时长（秒）
    pub fade_duration: f32,
    /// 资源目录前缀
    pub assets_directory: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            typewriter_speed: 50.0,
            fade_duration: 0.4,
            assets_directory: "assets/".to_string(),
        }
    }
}

impl PlaybackConfig {
    /// 解析资源路径
    ///
    /// 绝对路径（以 `/` 开头）和带 scheme 的 URL（含 `://`）原样返回，
    /// 其余视为相对路径，加上 `assets_directory` 前缀。
    pub fn resolve_asset(&self, path: &str) -> String {
        if path.starts_with('/') || path.contains("://") {
            return path.to_string();
        }
        format!("{}{}", self.assets_directory, path)
    }
}
