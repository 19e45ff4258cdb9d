//! Toast 通知器

use super::payload::{NotificationRequest, ToastPayload};
use super::platform::{ToastPlatform, ToastSession};
use crate::error::{NotifyError, RenderStep};
use tracing::{debug, info};

/// 通知出口（编排层依赖这个 trait）
pub trait Notify {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    fn show_notification(&self, title: &str, body: &str, url: &str) -> Result<(), NotifyError>;

    fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        self.show_notification(&request.title, &request.body, &request.url)
    }
}

/// 基于平台 toast 子系统的通知器
pub struct ToastNotifier<P: ToastPlatform> {
    platform: P,
}

impl<P: ToastPlatform> ToastNotifier<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

impl<P: ToastPlatform> Notify for ToastNotifier<P> {
    fn name(&self) -> &str {
        "toast"
    }

    /// 单次尝试，不重试；url 为空时照常显示（按钮无效）
    fn show_notification(&self, title: &str, body: &str, url: &str) -> Result<(), NotifyError> {
        let payload = ToastPayload { title, body, url };

        // 以下句柄均在离开作用域时按逆序释放，session 最后
        let session = self
            .platform
            .initialize()
            .map_err(NotifyError::Initialization)?;

        let manager = session
            .create_manager()
            .map_err(|e| NotifyError::render(RenderStep::CreateManager, e))?;
        let iface = session
            .query_interface(&manager)
            .map_err(|e| NotifyError::render(RenderStep::QueryInterface, e))?;
        let notifier = session
            .notifier(&iface)
            .map_err(|e| NotifyError::render(RenderStep::GetNotifier, e))?;
        let content = session
            .template_content(&iface)
            .map_err(|e| NotifyError::render(RenderStep::GetTemplateContent, e))?;

        session
            .set_content(&content, &payload)
            .map_err(|e| NotifyError::render(RenderStep::SetContent, e))?;
        debug!(xml = %payload.to_xml(), "Toast content set");

        session
            .show(&notifier, &content)
            .map_err(|e| NotifyError::render(RenderStep::Show, e))?;

        info!(channel = self.name(), url = %url, "Notification shown");
        Ok(())
    }
}
