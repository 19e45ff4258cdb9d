//! 错误类型
//!
//! 拉取失败、通知失败都是本次运行的终止条件；“没有新消息/没有链接”不是错误，
//! 见 [`crate::app::Outcome`]。

use std::fmt;
use thiserror::Error;

/// `getUpdates` 拉取错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 调用本身失败（连接、超时、读取 body）
    #[error("network error: {0}")]
    Network(String),
    /// 响应 body 不是预期结构的 JSON
    #[error("failed to decode getUpdates response: {0}")]
    Decode(#[from] serde_json::Error),
    /// 服务端返回 ok=false（例如 token 无效）
    #[error("Telegram API rejected the request{}", api_detail(.error_code, .description))]
    Api {
        error_code: Option<i64>,
        description: Option<String>,
    },
}

fn api_detail(code: &Option<i64>, description: &Option<String>) -> String {
    match (code, description) {
        (Some(code), Some(desc)) => format!(" ({}): {}", code, desc),
        (Some(code), None) => format!(" ({})", code),
        (None, Some(desc)) => format!(": {}", desc),
        (None, None) => String::new(),
    }
}

/// 通知渲染的各个步骤，用于定位失败点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    CreateManager,
    QueryInterface,
    GetNotifier,
    GetTemplateContent,
    SetContent,
    Show,
}

impl fmt::Display for RenderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderStep::CreateManager => "create toast manager",
            RenderStep::QueryInterface => "query manager interface",
            RenderStep::GetNotifier => "get toast notifier",
            RenderStep::GetTemplateContent => "get template content",
            RenderStep::SetContent => "set toast content",
            RenderStep::Show => "show notification",
        };
        f.write_str(name)
    }
}

/// 平台层返回的原始错误信息
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// 桌面通知错误
#[derive(Debug, Error)]
pub enum NotifyError {
    /// 平台通知子系统初始化失败
    #[error("failed to initialize notification platform: {0}")]
    Initialization(#[source] PlatformError),
    /// 构建或提交通知的某一步失败
    #[error("failed to {step}: {source}")]
    Render {
        step: RenderStep,
        #[source]
        source: PlatformError,
    },
}

impl NotifyError {
    pub fn render(step: RenderStep, source: PlatformError) -> Self {
        Self::Render { step, source }
    }

    /// 失败的步骤（初始化失败时为 None）
    pub fn step(&self) -> Option<RenderStep> {
        match self {
            NotifyError::Initialization(_) => None,
            NotifyError::Render { step, .. } => Some(*step),
        }
    }
}

/// 一次运行的硬错误
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Error fetching updates: {0}")]
    Fetch(#[from] FetchError),
    #[error("Error showing notification: {0}")]
    Notify(#[from] NotifyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_includes_detail() {
        let err = FetchError::Api {
            error_code: Some(401),
            description: Some("Unauthorized".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Telegram API rejected the request (401): Unauthorized"
        );

        let bare = FetchError::Api { error_code: None, description: None };
        assert_eq!(bare.to_string(), "Telegram API rejected the request");
    }

    #[test]
    fn test_render_error_names_step() {
        let err = NotifyError::render(RenderStep::GetNotifier, PlatformError::new("E_FAIL"));
        assert_eq!(err.to_string(), "failed to get toast notifier: E_FAIL");
        assert_eq!(err.step(), Some(RenderStep::GetNotifier));

        let init = NotifyError::Initialization(PlatformError::new("no apartment"));
        assert_eq!(init.step(), None);
    }
}
