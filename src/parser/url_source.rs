use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::error::ConfigError;

/// URL 来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    Single(String),    // 命令行直接给出的单个 URL
    LineFile(PathBuf), // 每行一个 URL 的文本文件
    YamlFile(PathBuf), // 列表或 {urls: [...]} 形式的 YAML
}

impl UrlSource {
    /// 按优先级挑选来源：单个 URL > 文本文件 > YAML 文件
    pub fn from_cli(
        url: Option<&str>,
        url_file: Option<&Path>,
        url_yaml: Option<&Path>,
    ) -> Option<Self> {
        // 空白的 URL 视为未指定
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(Self::Single(url.to_string()))
        } else if let Some(path) = url_file {
            Some(Self::LineFile(path.to_path_buf()))
        } else {
            url_yaml.map(|path| Self::YamlFile(path.to_path_buf()))
        }
    }

    pub async fn load(&self) -> Result<Vec<String>, ConfigError> {
        let urls = match self {
            Self::Single(url) => vec![url.clone()],
            Self::LineFile(path) => parse_line_list(&read_source(path).await?),
            Self::YamlFile(path) => parse_yaml_list(&read_source(path).await?)?,
        };

        debug!("从 {:?} 读取到 {} 个 URL", self, urls.len());
        Ok(urls)
    }
}

async fn read_source(path: &Path) -> Result<String, ConfigError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// 解析每行一个 URL 的文本，忽略空行和 `#` 开头的注释行
pub fn parse_line_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// 解析 YAML 形式的 URL 列表
///
/// 支持两种形式：
/// - 直接是一个列表
/// - 一个包含 `urls` 键的映射（缺少该键时视为空列表）
pub fn parse_yaml_list(content: &str) -> Result<Vec<String>, ConfigError> {
    let data: Value = serde_yaml::from_str(content)
        .map_err(|e| ConfigError::MalformedUrlList(e.to_string()))?;

    let items = match data {
        Value::Sequence(items) => items,
        Value::Mapping(map) => match map.get("urls") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items.clone(),
            Some(_) => {
                return Err(ConfigError::MalformedUrlList(
                    "urls 必须是列表".to_string(),
                ));
            }
        },
        _ => {
            return Err(ConfigError::MalformedUrlList(
                "顶层既不是列表也不是映射".to_string(),
            ));
        }
    };

    let mut urls = Vec::with_capacity(items.len());
    for item in items {
        let url = match item {
            Value::Null => continue,
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(ConfigError::MalformedUrlList(format!(
                    "无法识别的条目: {:?}",
                    other
                )));
            }
        };
        if !url.is_empty() {
            urls.push(url);
        }
    }

    Ok(urls)
}
