//! link-toast - 拉取 Telegram bot 最新消息，为其中的链接弹出桌面通知

pub mod app;
pub mod config;
pub mod error;
pub mod telegram;
pub mod toast;

pub use app::{exit_code, run, Outcome};
pub use config::Config;
pub use error::{FetchError, NotifyError, PlatformError, RenderStep, RunError};
pub use telegram::{
    extract_url, Entity, EntityKind, HttpTransport, Message, ReqwestTransport, TransportError,
    Update, UpdateFetcher, UpdateSource, UpdatesResponse,
};
pub use toast::{NativePlatform, NotificationRequest, Notify, ToastNotifier, ToastPlatform, ToastSession};
