use std::num::NonZeroU32;

use dl4k::parser::models::{CodecKind, Directive, SelectionTarget, StreamEncoding, Tier};
use dl4k::parser::stream_selector::StreamSelector;

fn video(format_id: &str, container: &str, height: Option<u32>) -> StreamEncoding {
    StreamEncoding {
        codec_kind: CodecKind::Video,
        container: container.to_string(),
        height,
        width: height.map(|h| h * 16 / 9),
        format_id: format_id.to_string(),
    }
}

fn audio(format_id: &str) -> StreamEncoding {
    StreamEncoding {
        codec_kind: CodecKind::Audio,
        container: "m4a".to_string(),
        height: None,
        width: None,
        format_id: format_id.to_string(),
    }
}

fn create_test_selector(min_height: u32) -> StreamSelector {
    let min_height = NonZeroU32::new(min_height).expect("min_height > 0");
    StreamSelector::new(SelectionTarget::new(min_height, "mp4"))
}

#[test]
fn test_preferred_container_at_target() {
    let selector = create_test_selector(2160);
    let catalog = vec![
        video("137", "mp4", Some(1080)),
        video("401", "mp4", Some(2160)),
        audio("140"),
    ];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::Preferred));
    assert_eq!(result.chosen.as_ref().and_then(|c| c.height), Some(2160));
    assert_eq!(
        result.directive,
        Directive::BestFiltered {
            container: "mp4".to_string(),
            min_height: 2160,
        }
    );
}

#[test]
fn test_preferred_container_picks_highest_above_target() {
    // 8K 和 4K 都满足条件时选最高的
    let selector = create_test_selector(2160);
    let catalog = vec![
        video("401", "mp4", Some(2160)),
        video("571", "mp4", Some(4320)),
        video("313", "webm", Some(4320)),
    ];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::Preferred));
    let chosen = result.chosen.expect("应选中一个格式");
    assert_eq!(chosen.format_id, "571");
    assert_eq!(chosen.height, Some(4320));
}

#[test]
fn test_any_container_when_preferred_missing() {
    let selector = create_test_selector(2160);
    let catalog = vec![
        video("137", "mp4", Some(1080)),
        video("313", "webm", Some(2160)),
        audio("251"),
    ];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::AnyContainer));
    assert_eq!(
        result.directive,
        Directive::ExactPlusAudio {
            format_id: "313".to_string()
        }
    );
}

#[test]
fn test_fallback_to_highest_available() {
    let selector = create_test_selector(2160);
    let catalog = vec![video("271", "webm", Some(1440))];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::Fallback));
    assert_eq!(result.chosen.as_ref().and_then(|c| c.height), Some(1440));
    assert_eq!(result.below_target(2160), Some(1440));
    assert_eq!(
        result.directive,
        Directive::ExactPlusAudio {
            format_id: "271".to_string()
        }
    );
}

#[test]
fn test_fallback_treats_missing_height_as_zero() {
    let selector = create_test_selector(2160);
    let catalog = vec![
        video("hls-unknown", "mp4", None),
        video("136", "mp4", Some(720)),
        video("other", "mp4", None),
    ];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::Fallback));
    assert_eq!(result.chosen.expect("应选中一个格式").format_id, "136");
}

#[test]
fn test_fallback_with_only_heightless_video() {
    let selector = create_test_selector(2160);
    let catalog = vec![video("0", "mp4", None), audio("140")];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::Fallback));
    assert_eq!(result.chosen.as_ref().expect("应选中一个格式").format_id, "0");
    assert_eq!(result.below_target(2160), None);
}

#[test]
fn test_empty_catalog_uses_generic_best() {
    let selector = create_test_selector(2160);

    let result = selector.select(&[]);

    assert!(result.chosen.is_none());
    assert!(result.tier.is_none());
    assert_eq!(result.directive, Directive::GenericBest);
}

#[test]
fn test_audio_only_catalog_uses_generic_best() {
    let selector = create_test_selector(2160);
    let storyboard = StreamEncoding {
        codec_kind: CodecKind::None,
        container: "mhtml".to_string(),
        height: Some(90),
        width: Some(160),
        format_id: "sb0".to_string(),
    };
    let catalog = vec![audio("140"), audio("251"), storyboard];

    let result = selector.select(&catalog);

    assert!(result.chosen.is_none());
    assert_eq!(result.directive, Directive::GenericBest);
}

#[test]
fn test_tie_keeps_first_seen() {
    let selector = create_test_selector(2160);
    let catalog = vec![
        video("first", "webm", Some(2160)),
        video("second", "webm", Some(2160)),
    ];

    let result = selector.select(&catalog);

    assert_eq!(result.chosen.expect("应选中一个格式").format_id, "first");
}

#[test]
fn test_any_container_picks_highest_candidate() {
    // 没有 mp4 时，在其他容器里取最高的那个
    let selector = create_test_selector(2160);
    let catalog = vec![
        video("313", "webm", Some(2160)),
        video("272", "webm", Some(4320)),
        video("137", "mp4", Some(1080)),
        audio("251"),
    ];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::AnyContainer));
    assert_eq!(
        result.directive,
        Directive::ExactPlusAudio {
            format_id: "272".to_string(),
        }
    );
}

#[test]
fn test_heightless_entry_never_meets_target() {
    let selector = create_test_selector(1);
    let catalog = vec![video("no-height", "mp4", None), video("tiny", "webm", Some(1))];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::AnyContainer));
    assert_eq!(result.chosen.expect("应选中一个格式").format_id, "tiny");
}

#[test]
fn test_missing_width_is_tolerated() {
    let selector = create_test_selector(2160);
    let mut entry = video("401", "mp4", Some(2160));
    entry.width = None;

    let result = selector.select(&[entry]);

    let chosen = result.chosen.expect("应选中一个格式");
    assert_eq!(chosen.resolution_label().as_deref(), Some("2160p (?x2160)"));
}

#[test]
fn test_custom_container_and_height() {
    let target = SelectionTarget::new(NonZeroU32::new(1080).expect("非零"), "webm");
    let selector = StreamSelector::new(target);
    let catalog = vec![
        video("137", "mp4", Some(1080)),
        video("248", "webm", Some(1080)),
        video("136", "mp4", Some(720)),
    ];

    let result = selector.select(&catalog);

    assert_eq!(result.tier, Some(Tier::Preferred));
    assert_eq!(result.chosen.expect("应选中一个格式").format_id, "248");
    assert_eq!(
        result.directive,
        Directive::BestFiltered {
            container: "webm".to_string(),
            min_height: 1080,
        }
    );
}

#[test]
fn test_default_target_is_4k_mp4() {
    let selector = StreamSelector::default();

    assert_eq!(selector.target().min_height.get(), 2160);
    assert_eq!(selector.target().preferred_container, "mp4");
}

#[test]
fn test_select_is_idempotent() {
    let selector = create_test_selector(2160);
    let catalog = vec![
        video("137", "mp4", Some(1080)),
        video("313", "webm", Some(2160)),
        video("271", "webm", Some(1440)),
        audio("251"),
    ];

    assert_eq!(selector.select(&catalog), selector.select(&catalog));
}

#[test]
fn test_codec_kind_from_codecs() {
    assert_eq!(
        CodecKind::from_codecs(Some("avc1.640033"), Some("none")),
        CodecKind::Video
    );
    assert_eq!(
        CodecKind::from_codecs(Some("none"), Some("opus")),
        CodecKind::Audio
    );
    assert_eq!(CodecKind::from_codecs(None, Some("mp4a.40.2")), CodecKind::Audio);
    assert_eq!(CodecKind::from_codecs(Some("none"), Some("none")), CodecKind::None);
    assert_eq!(CodecKind::from_codecs(None, None), CodecKind::None);
}
