//! 单次运行流程：拉取 → 取最后一条 → 提取链接 → 通知

use tracing::info;

use crate::error::RunError;
use crate::telegram::{extract_url, UpdateSource};
use crate::toast::{NotificationRequest, Notify};

/// 正常结束的几种情况（都以状态码 0 退出）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 没有任何更新
    NoUpdates,
    /// 最后一条更新不含消息
    NoMessage,
    /// 最后一条消息没有链接
    NoUrl,
    /// 已显示通知
    Notified(NotificationRequest),
}

impl Outcome {
    pub fn notified(&self) -> bool {
        matches!(self, Outcome::Notified(_))
    }
}

/// 执行一次
///
/// “最新”按返回列表中的位置取最后一条，不比较 update_id。
pub fn run(
    token: &str,
    source: &dyn UpdateSource,
    notifier: &dyn Notify,
) -> Result<Outcome, RunError> {
    let updates = source.fetch_updates(token)?;

    let Some(last) = updates.last() else {
        info!("No new messages.");
        return Ok(Outcome::NoUpdates);
    };

    let Some(message) = last.message.as_ref() else {
        info!(update_id = last.update_id, "No message in the last update.");
        return Ok(Outcome::NoMessage);
    };

    let url = extract_url(message);
    if url.is_empty() {
        info!(message_id = message.message_id, "No URL found in the last message.");
        return Ok(Outcome::NoUrl);
    }

    let request = NotificationRequest::for_message(&message.text, url);
    notifier.notify(&request)?;

    Ok(Outcome::Notified(request))
}

/// 进程退出码：硬错误为 1，其余为 0
pub fn exit_code(result: &Result<Outcome, RunError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
