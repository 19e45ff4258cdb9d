//! Toast XML 载荷

/// 通知请求：标题、正文、点击打开的链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub url: String,
}

impl NotificationRequest {
    pub const TITLE: &'static str = "New Message";

    pub fn new(title: impl Into<String>, body: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: url.into(),
        }
    }

    /// 新消息通知
    pub fn for_message(text: &str, url: impl Into<String>) -> Self {
        Self::new(
            Self::TITLE,
            format!("You received a new message: {}", text),
            url,
        )
    }

    pub fn payload(&self) -> ToastPayload<'_> {
        ToastPayload {
            title: &self.title,
            body: &self.body,
            url: &self.url,
        }
    }
}

/// 按钮文字
pub const ACTION_LABEL: &str = "Open browser";

/// 待渲染的 toast 内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastPayload<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub url: &'a str,
}

impl ToastPayload<'_> {
    /// 生成 ToastGeneric 文档：两行文本 + 一个用默认程序打开链接的按钮
    pub fn to_xml(&self) -> String {
        format!(
            concat!(
                "<toast>",
                "<visual><binding template=\"ToastGeneric\">",
                "<text>{title}</text>",
                "<text>{body}</text>",
                "</binding></visual>",
                "<actions>",
                "<action content=\"{label}\" arguments=\"{url}\" activationType=\"protocol\"/>",
                "</actions>",
                "</toast>"
            ),
            title = escape_xml(self.title),
            body = escape_xml(self.body),
            label = ACTION_LABEL,
            url = escape_xml(self.url),
        )
    }
}

/// 转义文本和属性值中的 XML 特殊字符
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_message() {
        let req = NotificationRequest::for_message("hello", "http://x.test");
        assert_eq!(req.title, "New Message");
        assert_eq!(req.body, "You received a new message: hello");
        assert_eq!(req.url, "http://x.test");
    }

    #[test]
    fn test_xml_layout() {
        let req = NotificationRequest::new("New Message", "body", "https://a.example");
        let xml = req.payload().to_xml();

        assert!(xml.starts_with("<toast>"));
        assert!(xml.contains("<binding template=\"ToastGeneric\"><text>New Message</text><text>body</text></binding>"));
        assert!(xml.contains(
            "<action content=\"Open browser\" arguments=\"https://a.example\" activationType=\"protocol\"/>"
        ));
        assert_eq!(xml.matches("<text>").count(), 2);
        assert_eq!(xml.matches("<action ").count(), 1);
    }

    #[test]
    fn test_xml_escapes_user_text() {
        let req = NotificationRequest::for_message(
            "<b>Tom & Jerry</b>",
            "https://a.example/?q=1&r='x'",
        );
        let xml = req.payload().to_xml();

        assert!(xml.contains("&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
        assert!(xml.contains("arguments=\"https://a.example/?q=1&amp;r=&apos;x&apos;\""));
        assert!(!xml.contains("<b>"));
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape_xml("plain text 你好"), "plain text 你好");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }
}
