//! 从消息标注中提取链接

use super::types::{EntityKind, Message};

/// 返回第一个 url 类型标注的链接；没有时返回空字符串
///
/// 多个链接时按顺序取第一个，不做校验，原样返回。
pub fn extract_url(message: &Message) -> String {
    message
        .entities
        .iter()
        .find_map(|entity| match &entity.kind {
            EntityKind::Url { url } => Some(url.clone()),
            EntityKind::Other(_) => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::types::Entity;

    fn message(entities: Vec<Entity>) -> Message {
        Message {
            message_id: 1,
            text: "text".to_string(),
            entities,
        }
    }

    #[test]
    fn test_first_url_wins() {
        let msg = message(vec![
            Entity::other("bold", 0, 4),
            Entity::url("https://a.example", 5, 17),
            Entity::url("https://b.example", 23, 17),
        ]);
        assert_eq!(extract_url(&msg), "https://a.example");
    }

    #[test]
    fn test_no_entities() {
        assert_eq!(extract_url(&message(vec![])), "");
    }

    #[test]
    fn test_no_url_entities() {
        let msg = message(vec![Entity::other("bold", 0, 4), Entity::other("mention", 5, 6)]);
        assert_eq!(extract_url(&msg), "");
    }

    #[test]
    fn test_order_not_length_or_offset() {
        // 位置靠后但在序列中靠前的仍然优先
        let msg = message(vec![
            Entity::url("https://late.example/long/path", 40, 30),
            Entity::url("http://s.io", 0, 11),
        ]);
        assert_eq!(extract_url(&msg), "https://late.example/long/path");
    }

    #[test]
    fn test_returned_verbatim() {
        let msg = message(vec![Entity::url("not a url at all", 0, 16)]);
        assert_eq!(extract_url(&msg), "not a url at all");
    }
}
