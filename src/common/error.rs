use std::path::PathBuf;
use thiserror::Error;

/// 配置类错误：设置文件或 URL 列表有问题，整批任务开始前就会终止
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("文件不存在: {0}")]
    NotFound(PathBuf),

    #[error("读取文件失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML 解析失败 {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("URL 列表格式错误: {0}（请使用列表或 {{urls: [...]}} 形式）")]
    MalformedUrlList(String),

    #[error("无效的配置: {0}")]
    Invalid(String),
}
