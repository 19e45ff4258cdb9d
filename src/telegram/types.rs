//! Telegram Bot API 数据结构（只包含用到的字段）

use serde::{Deserialize, Serialize};

/// `getUpdates` 响应外层
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatesResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Vec<Update>,
    /// ok=false 时的错误描述
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

/// 一条更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

/// 消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// 消息文本上的标注（链接、加粗等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntity", into = "RawEntity")]
pub struct Entity {
    pub kind: EntityKind,
    pub offset: i64,
    pub length: i64,
}

/// 标注类型；只有 `Url` 携带链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Url { url: String },
    /// 其他类型，保留原始 tag（"bold"、"mention" 等）
    Other(String),
}

impl EntityKind {
    pub const URL_TAG: &'static str = "url";

    pub fn tag(&self) -> &str {
        match self {
            EntityKind::Url { .. } => Self::URL_TAG,
            EntityKind::Other(tag) => tag,
        }
    }
}

impl Entity {
    pub fn url(url: impl Into<String>, offset: i64, length: i64) -> Self {
        Self {
            kind: EntityKind::Url { url: url.into() },
            offset,
            length,
        }
    }

    pub fn other(tag: impl Into<String>, offset: i64, length: i64) -> Self {
        Self {
            kind: EntityKind::Other(tag.into()),
            offset,
            length,
        }
    }
}

/// 线上格式：`{type, offset, length, url?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEntity {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    offset: i64,
    #[serde(default)]
    length: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<RawEntity> for Entity {
    fn from(raw: RawEntity) -> Self {
        // 非 url 类型上的 url 字段直接丢弃
        let kind = if raw.kind == EntityKind::URL_TAG {
            EntityKind::Url {
                url: raw.url.unwrap_or_default(),
            }
        } else {
            EntityKind::Other(raw.kind)
        };
        Self {
            kind,
            offset: raw.offset,
            length: raw.length,
        }
    }
}

impl From<Entity> for RawEntity {
    fn from(entity: Entity) -> Self {
        let (kind, url) = match entity.kind {
            EntityKind::Url { url } => (EntityKind::URL_TAG.to_string(), Some(url)),
            EntityKind::Other(tag) => (tag, None),
        };
        Self {
            kind,
            offset: entity.offset,
            length: entity.length,
            url,
        }
    }
}
