use crate::parser::models::Directive;

/// 交给媒体源执行的一次下载
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub directive: Directive,
    pub output_template: String,
    pub container_format: String, // 合并 / 转码后的容器
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Lookup,   // 获取视频信息
    Transfer, // 下载 / 转码
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUrl {
    pub url: String,
    pub stage: FailureStage,
    pub reason: String,
}

/// 一批 URL 的处理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedUrl>,
    pub interrupted: bool,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.interrupted
    }

    /// 总结中列出的失败项，没有失败时为空
    pub fn failure_lines(&self) -> Vec<String> {
        if self.failed.is_empty() {
            return Vec::new();
        }
        let mut lines = vec![format!("失败: {}", self.failed.len())];
        lines.extend(
            self.failed
                .iter()
                .map(|f| format!("  ✗ {} ({:?}): {}", f.url, f.stage, f.reason)),
        );
        lines
    }
}
