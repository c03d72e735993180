use std::fmt;
use std::num::NonZeroU32;

pub const DEFAULT_MIN_HEIGHT: u32 = 2160;
pub const DEFAULT_CONTAINER: &str = "mp4";

// 流的编码类型（由 vcodec / acodec 推导）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    Video, // 含视频轨
    Audio, // 纯音频
    None,  // 既无视频也无音频（如故事板）
}

impl CodecKind {
    /// 按 yt-dlp 的约定推导：字段缺失或为 "none" 都视为没有该轨道
    pub fn from_codecs(vcodec: Option<&str>, acodec: Option<&str>) -> Self {
        let present = |c: Option<&str>| c.is_some_and(|c| !c.is_empty() && c != "none");

        if present(vcodec) {
            CodecKind::Video
        } else if present(acodec) {
            CodecKind::Audio
        } else {
            CodecKind::None
        }
    }
}

/// 单个可下载的编码格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEncoding {
    pub codec_kind: CodecKind,
    pub container: String, // 扩展名，如 mp4 / webm
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub format_id: String,
}

impl StreamEncoding {
    pub fn is_video(&self) -> bool {
        self.codec_kind == CodecKind::Video
    }

    /// 显示用的分辨率，宽度缺失时用 `?` 代替
    pub fn resolution_label(&self) -> Option<String> {
        let height = self.height?;
        let width = self
            .width
            .map(|w| w.to_string())
            .unwrap_or_else(|| "?".to_string());
        Some(format!("{}p ({}x{})", height, width, height))
    }
}

/// 一个 URL 对应的视频信息
#[derive(Debug, Clone, Default)]
pub struct VideoInfo {
    pub title: String,
    pub formats: Vec<StreamEncoding>,
}

// --------------------------------------------------------------------

/// 选择目标：最低高度 + 优先容器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTarget {
    pub min_height: NonZeroU32,
    pub preferred_container: String,
}

impl SelectionTarget {
    pub fn new(min_height: NonZeroU32, preferred_container: impl Into<String>) -> Self {
        Self {
            min_height,
            preferred_container: preferred_container.into(),
        }
    }
}

impl Default for SelectionTarget {
    fn default() -> Self {
        Self {
            min_height: NonZeroU32::new(DEFAULT_MIN_HEIGHT).unwrap_or(NonZeroU32::MIN),
            preferred_container: DEFAULT_CONTAINER.to_string(),
        }
    }
}

/// 交给媒体源的下载指令，由媒体源自己翻译成具体的格式表达式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    // 容器 + 高度过滤的最佳视频，配最佳音频，逐级回退
    BestFiltered { container: String, min_height: u32 },
    // 指定 format_id 的视频 + 最佳音频
    ExactPlusAudio { format_id: String },
    // 媒体源自己决定的最佳格式
    GenericBest,
}

/// 命中的优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Preferred,    // 优先容器且达到目标高度
    AnyContainer, // 任意容器且达到目标高度
    Fallback,     // 可用的最高分辨率
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preferred => write!(f, "优先容器"),
            Self::AnyContainer => write!(f, "任意容器"),
            Self::Fallback => write!(f, "最高可用分辨率"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub chosen: Option<StreamEncoding>,
    pub tier: Option<Tier>,
    pub directive: Directive,
}

impl SelectionResult {
    pub fn generic_best() -> Self {
        Self {
            chosen: None,
            tier: None,
            directive: Directive::GenericBest,
        }
    }

    /// 选中的流是否低于目标高度（只有回退档位才可能出现）
    pub fn below_target(&self, min_height: u32) -> Option<u32> {
        self.chosen
            .as_ref()
            .and_then(|c| c.height)
            .filter(|h| *h < min_height)
    }
}
