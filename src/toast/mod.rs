//! 桌面 toast 通知
//!
//! - `payload`：通知请求与 toast XML
//! - `platform`：平台子系统抽象（WinRT / notify-rust）
//! - `notifier`：按步骤获取资源并显示通知

pub mod notifier;
pub mod payload;
pub mod platform;

pub use notifier::{Notify, ToastNotifier};
pub use payload::{escape_xml, NotificationRequest, ToastPayload};
pub use platform::{NativePlatform, ToastPlatform, ToastSession, DEFAULT_APP_ID};
