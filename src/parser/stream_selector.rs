use tracing::debug;

use super::models::{Directive, SelectionResult, SelectionTarget, StreamEncoding, Tier};

/// 4K 优先、逐级回退的格式选择器
#[derive(Debug, Clone, Default)]
pub struct StreamSelector {
    target: SelectionTarget,
}

impl StreamSelector {
    pub fn new(target: SelectionTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &SelectionTarget {
        &self.target
    }

    /// 根据目标选择要下载的流
    ///
    /// 1. 优先容器且高度 >= min_height
    /// 2. 容器不限且高度 >= min_height
    /// 3. 所有视频流中的最高分辨率（缺失高度按 0 计）
    ///
    /// 没有任何视频流时返回 `Directive::GenericBest`。
    pub fn select(&self, catalog: &[StreamEncoding]) -> SelectionResult {
        let min_height = self.target.min_height.get();
        let container = self.target.preferred_container.as_str();

        let videos: Vec<&StreamEncoding> = catalog.iter().filter(|s| s.is_video()).collect();
        debug!("可用格式 {} 个，其中视频流 {} 个", catalog.len(), videos.len());

        if videos.is_empty() {
            debug!("没有视频流，使用 best");
            return SelectionResult::generic_best();
        }

        let tall_enough = |s: &&&StreamEncoding| s.height.is_some_and(|h| h >= min_height);

        // 1) 优先容器 + 目标高度
        let preferred = highest(
            videos
                .iter()
                .filter(tall_enough)
                .filter(|s| s.container == container),
        );
        if let Some(best) = preferred {
            debug!("命中优先容器: format_id={} height={:?}", best.format_id, best.height);
            return SelectionResult {
                chosen: Some(best.clone()),
                tier: Some(Tier::Preferred),
                directive: Directive::BestFiltered {
                    container: container.to_string(),
                    min_height,
                },
            };
        }

        // 2) 容器不限 + 目标高度
        if let Some(best) = highest(videos.iter().filter(tall_enough)) {
            debug!(
                "命中任意容器: format_id={} ext={} height={:?}",
                best.format_id, best.container, best.height
            );
            return SelectionResult {
                chosen: Some(best.clone()),
                tier: Some(Tier::AnyContainer),
                directive: Directive::ExactPlusAudio {
                    format_id: best.format_id.clone(),
                },
            };
        }

        // 3) 只能退而求其次，取最高分辨率
        let best = highest(videos.iter()).unwrap_or(videos[0]);
        debug!(
            "目标高度 {} 不可用，回退到 format_id={} height={:?}",
            min_height, best.format_id, best.height
        );
        SelectionResult {
            chosen: Some(best.clone()),
            tier: Some(Tier::Fallback),
            directive: Directive::ExactPlusAudio {
                format_id: best.format_id.clone(),
            },
        }
    }
}

// 取高度最大的流，同高度时保留先出现的那个
fn highest<'a, 'b: 'a, I>(streams: I) -> Option<&'b StreamEncoding>
where
    I: Iterator<Item = &'a &'b StreamEncoding>,
{
    streams.copied().reduce(|best, s| {
        if s.height.unwrap_or(0) > best.height.unwrap_or(0) {
            s
        } else {
            best
        }
    })
}
