//! Telegram Bot API：拉取更新、解析消息、提取链接

pub mod client;
pub mod extractor;
pub mod types;

pub use client::{
    HttpTransport, ReqwestTransport, TransportError, UpdateFetcher, UpdateSource,
    DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS,
};
pub use extractor::extract_url;
pub use types::{Entity, EntityKind, Message, Update, UpdatesResponse};
