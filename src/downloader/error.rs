use std::process::ExitStatus;
use thiserror::Error;

/// 获取视频信息失败，只影响当前 URL
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("无法启动 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("解析视频信息失败: {0}")]
    Extractor(String),

    #[error("视频信息不是有效的 JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// 下载或转码失败，只影响当前 URL
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("无法启动 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("下载进程异常退出: {0}")]
    Failed(ExitStatus),
}
