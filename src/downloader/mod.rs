use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::common::config::Settings;
use crate::common::error::ConfigError;
use crate::common::logger::PrettyLogger;
use crate::parser::models::VideoInfo;
use crate::parser::stream_selector::StreamSelector;
use crate::{log_error, log_info, log_success, log_warning};

use error::{LookupError, TransferError};
use models::{BatchReport, FailedUrl, FailureStage, TransferRequest};

pub mod error;
pub mod models;
pub mod ytdlp;

// 媒体源：负责解析视频信息和实际下载
#[async_trait]
pub trait MediaSource: Send + Sync {
    // 获取一个 URL 的可用格式列表
    async fn get_catalog(&self, url: &str) -> Result<VideoInfo, LookupError>;
    // 按指令下载并合并 / 转码
    async fn transfer(&self, url: &str, request: &TransferRequest) -> Result<(), TransferError>;
}

/// 逐个处理 URL 的批量下载器
pub struct BatchDownloader<S> {
    source: S,
    selector: StreamSelector,
    settings: Settings,
}

impl<S: MediaSource> BatchDownloader<S> {
    pub fn new(source: S, settings: Settings) -> Result<Self, ConfigError> {
        let settings = settings.normalized();
        settings.validate()?;
        let selector = StreamSelector::new(settings.selection_target()?);
        Ok(Self {
            source,
            selector,
            settings,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 依次下载所有 URL
    ///
    /// 单个 URL 的失败只会被记录，不会中断整批任务；
    /// `cancel` 被触发后立即停止，正在运行的下载进程随之结束。
    pub async fn run(
        &self,
        urls: &[String],
        cancel: &CancellationToken,
    ) -> crate::Result<BatchReport> {
        let mut report = BatchReport::default();

        if urls.is_empty() {
            log_warning!("没有指定任何 URL。");
            return Ok(report);
        }

        let output_dir = &self.settings.output_dir;
        tokio::fs::create_dir_all(output_dir).await?;

        let min_height = self.selector.target().min_height.get();
        PrettyLogger::file_info("保存目录", output_dir.display().to_string());
        log_info!("4K 目标: 优先下载 {}p 及以上", min_height);
        log_info!("待下载 URL 数: {}", urls.len());

        let total = urls.len();
        for (i, url) in urls.iter().enumerate() {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.process_one(url, i + 1, total) => Some(result),
            };

            match outcome {
                Some(Ok(())) => report.succeeded.push(url.clone()),
                Some(Err(failed)) => report.failed.push(failed),
                None => {
                    warn!("收到取消信号，剩余 {} 个 URL 未处理", total - i);
                    report.interrupted = true;
                    break;
                }
            }
        }

        info!(
            "批次结束: 成功 {}，失败 {}，中断 {}",
            report.succeeded.len(),
            report.failed.len(),
            report.interrupted
        );
        Ok(report)
    }

    async fn process_one(&self, url: &str, index: usize, total: usize) -> Result<(), FailedUrl> {
        let info = match self.source.get_catalog(url).await {
            Ok(info) => info,
            Err(e) => {
                log_error!("[{}/{}] 信息获取失败: {} ({})", index, total, url, e);
                return Err(FailedUrl {
                    url: url.to_string(),
                    stage: FailureStage::Lookup,
                    reason: e.to_string(),
                });
            }
        };

        let selection = self.selector.select(&info.formats);
        debug!(
            "[{}/{}] 选择结果: tier={:?}, directive={:?}",
            index, total, selection.tier, selection.directive
        );

        let min_height = self.selector.target().min_height.get();
        if let Some(height) = selection.below_target(min_height) {
            log_info!(
                "该视频最高分辨率为 {}p，不存在 {}p 及以上的格式，将按最高分辨率下载。",
                height,
                min_height
            );
        }

        PrettyLogger::video_info(index, total, &info.title);
        PrettyLogger::resolution(selection.chosen.as_ref());
        if let Some(tier) = selection.tier {
            info!("[{}/{}] 命中档位: {}", index, total, tier);
        }

        let request = TransferRequest {
            directive: selection.directive,
            output_template: self.settings.output_template(),
            container_format: self.settings.merge_output_format.clone(),
        };

        if let Err(e) = self.source.transfer(url, &request).await {
            log_error!("[{}/{}] 下载失败: {} ({})", index, total, url, e);
            return Err(FailedUrl {
                url: url.to_string(),
                stage: FailureStage::Transfer,
                reason: e.to_string(),
            });
        }

        log_success!("下载完成: {}", info.title);
        Ok(())
    }
}
