use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::error::ConfigError;
use crate::parser::models::{DEFAULT_CONTAINER, DEFAULT_MIN_HEIGHT, SelectionTarget};

pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "./downloads";

/// 下载设置，YAML 中缺少的字段使用默认值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub min_height: u32,             // 作为 4K 的判定标准
    pub preferred_container: String, // 选择视频流时优先的容器
    pub merge_output_format: String, // 最终输出的容器
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            min_height: DEFAULT_MIN_HEIGHT,
            preferred_container: DEFAULT_CONTAINER.to_string(),
            merge_output_format: DEFAULT_CONTAINER.to_string(),
        }
    }
}

/// 命令行上对设置的覆盖
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub output_dir: Option<PathBuf>,
    pub min_height: Option<u32>,
    pub preferred_container: Option<String>,
    pub merge_output_format: Option<String>,
}

impl Settings {
    /// 读取设置文件，文件不存在时使用默认设置
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("未找到设置文件，使用默认设置: {}", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings = Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        info!("已读取设置文件: {}", path.display());
        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // 空文件等同于没有任何覆盖
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Option<Self> = serde_yaml::from_str(content)?;
        Ok(settings.unwrap_or_default())
    }

    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(min_height) = overrides.min_height {
            self.min_height = min_height;
        }
        if let Some(container) = overrides.preferred_container {
            self.preferred_container = container;
        }
        if let Some(format) = overrides.merge_output_format {
            self.merge_output_format = format;
        }
        self.normalized()
    }

    /// 去掉容器名两侧的空白，后续直接按原样交给 yt-dlp
    pub fn normalized(mut self) -> Self {
        self.preferred_container = self.preferred_container.trim().to_string();
        self.merge_output_format = self.merge_output_format.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_height == 0 {
            return Err(ConfigError::Invalid("min_height 必须是正整数".to_string()));
        }
        if self.preferred_container.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "preferred_container 不能为空".to_string(),
            ));
        }
        if self.merge_output_format.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "merge_output_format 不能为空".to_string(),
            ));
        }
        Ok(())
    }

    pub fn selection_target(&self) -> Result<SelectionTarget, ConfigError> {
        let min_height = NonZeroU32::new(self.min_height)
            .ok_or_else(|| ConfigError::Invalid("min_height 必须是正整数".to_string()))?;
        Ok(SelectionTarget::new(
            min_height,
            self.preferred_container.trim(),
        ))
    }

    /// yt-dlp 的输出模板：<output_dir>/<标题>.<扩展名>
    pub fn output_template(&self) -> String {
        self.output_dir
            .join("%(title)s.%(ext)s")
            .to_string_lossy()
            .into_owned()
    }
}
