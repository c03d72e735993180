use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

use super::error::{LookupError, TransferError};
use super::models::TransferRequest;
use super::MediaSource;
use crate::parser::models::{CodecKind, Directive, StreamEncoding, VideoInfo};

const UNKNOWN_TITLE: &str = "Unknown Title";

/// 调用 yt-dlp 可执行文件的媒体源
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    ffmpeg_location: Option<PathBuf>,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ffmpeg_location: None,
        }
    }

    /// 支持通过 YTDLP_PATH / FFMPEG_PATH 环境变量指定可执行文件
    pub fn from_env() -> Self {
        let program = std::env::var_os("YTDLP_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("yt-dlp"));
        let ffmpeg_location = std::env::var_os("FFMPEG_PATH").map(PathBuf::from);
        Self {
            program,
            ffmpeg_location,
        }
    }

    pub fn with_ffmpeg_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_location = Some(path.into());
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// 检查 yt-dlp 是否可用，返回版本号
    pub async fn check_available(&self) -> Option<String> {
        debug!("检查系统中是否安装了 yt-dlp...");
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn catalog_args(&self, url: &str) -> Vec<OsString> {
        ["--dump-json", "--skip-download", "--no-playlist", "--no-warnings", url]
            .into_iter()
            .map(OsString::from)
            .collect()
    }

    pub fn transfer_args(&self, url: &str, request: &TransferRequest) -> Vec<OsString> {
        let container = request.container_format.as_str();
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            format_expression(&request.directive).into(),
            "--merge-output-format".into(),
            container.into(),
            // 合并后再统一转成目标容器
            "--recode-video".into(),
            container.into(),
            "-o".into(),
            request.output_template.as_str().into(),
            "--no-playlist".into(),
        ];

        if let Some(ffmpeg) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(ffmpeg.as_os_str().to_owned());
        }

        args.push(url.into());
        args
    }
}

#[async_trait]
impl MediaSource for YtDlp {
    async fn get_catalog(&self, url: &str) -> Result<VideoInfo, LookupError> {
        debug!("获取视频信息: {}", url);
        let output = Command::new(&self.program)
            .args(self.catalog_args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| LookupError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LookupError::Extractor(stderr.trim().to_string()));
        }

        let info = parse_video_info(&String::from_utf8_lossy(&output.stdout))?;
        debug!("{} 个可用格式: {:?}", info.formats.len(), info.formats);
        Ok(info)
    }

    async fn transfer(&self, url: &str, request: &TransferRequest) -> Result<(), TransferError> {
        info!("开始下载 {}", url);
        let status = Command::new(&self.program)
            .args(self.transfer_args(url, request))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| TransferError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !status.success() {
            error!("yt-dlp 下载失败 {}: {}", url, status);
            return Err(TransferError::Failed(status));
        }

        info!("下载成功 {}", url);
        Ok(())
    }
}

/// 把下载指令翻译成 yt-dlp 的 `-f` 表达式
pub fn format_expression(directive: &Directive) -> String {
    match directive {
        Directive::BestFiltered {
            container,
            min_height,
        } => format!("bestvideo[ext={container}][height>={min_height}]+bestaudio/best/best"),
        Directive::ExactPlusAudio { format_id } => format!("{format_id}+bestaudio/best"),
        Directive::GenericBest => "best".to_string(),
    }
}

#[derive(Deserialize)]
struct JsonDump {
    title: Option<String>,
    formats: Option<Vec<RawFormat>>,
}

#[derive(Deserialize)]
struct RawFormat {
    format_id: Option<String>,
    ext: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
    height: Option<u32>,
    width: Option<u32>,
}

impl RawFormat {
    // 没有 format_id 的格式无法被指定，直接丢弃
    fn normalize(self) -> Option<StreamEncoding> {
        let format_id = self.format_id.filter(|id| !id.is_empty())?;
        Some(StreamEncoding {
            codec_kind: CodecKind::from_codecs(self.vcodec.as_deref(), self.acodec.as_deref()),
            container: self.ext.unwrap_or_default(),
            height: self.height,
            width: self.width,
            format_id,
        })
    }
}

/// 解析 `--dump-json` 的输出
pub fn parse_video_info(stdout: &str) -> Result<VideoInfo, LookupError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| LookupError::Extractor("yt-dlp 没有输出任何视频信息".to_string()))?;

    let dump: JsonDump = serde_json::from_str(line)?;
    let formats = dump
        .formats
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawFormat::normalize)
        .collect();

    Ok(VideoInfo {
        title: dump
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        formats,
    })
}
