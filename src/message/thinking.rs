use super::ContentPart;

pub const START_THINK_TAG: &str = "<think>";
pub const END_THINK_TAG: &str = "</think>";

enum ScanState {
    Outside,
    InsideThinking,
}

/// 将模型输出拆分为文本片段和思考片段
///
/// 部分模型不会单独返回思考内容，而是把它放在 `<think>` 标签里，
/// 这里按标签把内容拆开。
///
/// 规则：
/// - 空文本片段不会输出，空思考片段会输出
/// - 未闭合的 `<think>` 会把剩余内容全部作为思考片段
/// - 思考区域内的 `<think>` 按普通文本处理
pub fn split_content_into_text_and_thinking(content: &str) -> Vec<ContentPart> {
    split_content_with_tags(content, (START_THINK_TAG, END_THINK_TAG))
}

/// 使用自定义标签拆分（例如模型配置中的 `thinking_tags`）
pub fn split_content_with_tags(content: &str, tags: (&str, &str)) -> Vec<ContentPart> {
    let (start_tag, end_tag) = tags;
    let mut parts = Vec::new();
    let mut state = ScanState::Outside;
    let mut cursor = 0;

    while cursor <= content.len() {
        let rest = &content[cursor..];
        match state {
            ScanState::Outside => match rest.find(start_tag) {
                Some(offset) if !start_tag.is_empty() => {
                    if offset > 0 {
                        parts.push(ContentPart::text(&rest[..offset]));
                    }
                    cursor += offset + start_tag.len();
                    state = ScanState::InsideThinking;
                }
                _ => {
                    if !rest.is_empty() {
                        parts.push(ContentPart::text(rest));
                    }
                    break;
                }
            },
            ScanState::InsideThinking => match rest.find(end_tag) {
                Some(offset) if !end_tag.is_empty() => {
                    parts.push(ContentPart::thinking(&rest[..offset]));
                    cursor += offset + end_tag.len();
                    state = ScanState::Outside;
                }
                _ => {
                    parts.push(ContentPart::thinking(rest));
                    break;
                }
            },
        }
    }

    parts
}
