//! 平台通知子系统抽象
//!
//! 初始化得到一个 session，之后每一步获取的句柄都是独立的值，drop 即释放。
//! 这样任何一步失败提前返回时，已获取的资源按获取的逆序释放，session 最后释放。

use super::payload::ToastPayload;
use crate::error::PlatformError;

/// 平台入口
pub trait ToastPlatform {
    type Session: ToastSession;

    /// 初始化通知子系统（Windows 上是 WinRT apartment）；返回值 drop 时反初始化
    fn initialize(&self) -> Result<Self::Session, PlatformError>;
}

/// 已初始化的通知子系统，按步骤获取句柄
pub trait ToastSession {
    type Manager;
    type Interface;
    type Notifier;
    type Content;

    fn create_manager(&self) -> Result<Self::Manager, PlatformError>;

    fn query_interface(&self, manager: &Self::Manager) -> Result<Self::Interface, PlatformError>;

    fn notifier(&self, iface: &Self::Interface) -> Result<Self::Notifier, PlatformError>;

    fn template_content(&self, iface: &Self::Interface) -> Result<Self::Content, PlatformError>;

    fn set_content(
        &self,
        content: &Self::Content,
        payload: &ToastPayload<'_>,
    ) -> Result<(), PlatformError>;

    fn show(&self, notifier: &Self::Notifier, content: &Self::Content) -> Result<(), PlatformError>;
}

#[cfg(windows)]
pub use self::winrt::WinRtPlatform as NativePlatform;

#[cfg(not(windows))]
pub use self::desktop::DesktopPlatform as NativePlatform;

/// 未打包的 exe 没有自己的 AppUserModelID，借用 PowerShell 的才能弹出 toast
pub const DEFAULT_APP_ID: &str =
    "{1AC14E77-02E7-4E5D-B744-2EB1AE5198B7}\\WindowsPowerShell\\v1.0\\powershell.exe";

#[cfg(windows)]
mod winrt {
    use super::{ToastPlatform, ToastSession};
    use crate::error::PlatformError;
    use crate::toast::payload::ToastPayload;
    use tracing::debug;
    use windows::core::{IInspectable, Interface, HSTRING};
    use windows::Data::Xml::Dom::XmlDocument;
    use windows::UI::Notifications::{
        ToastNotification, ToastNotificationManager, ToastNotificationManagerForUser,
        ToastNotifier,
    };
    use windows::Win32::System::WinRT::{RoInitialize, RoUninitialize, RO_INIT_SINGLETHREADED};

    fn platform_err(e: windows::core::Error) -> PlatformError {
        PlatformError::new(format!("{} (HRESULT {:#010x})", e, e.code().0))
    }

    /// WinRT ToastNotificationManager
    #[derive(Debug, Clone)]
    pub struct WinRtPlatform {
        app_id: String,
    }

    impl WinRtPlatform {
        pub fn new(app_id: impl Into<String>) -> Self {
            Self { app_id: app_id.into() }
        }
    }

    /// 持有 WinRT apartment，drop 时 RoUninitialize
    pub struct WinRtSession {
        app_id: HSTRING,
    }

    impl Drop for WinRtSession {
        fn drop(&mut self) {
            debug!("Releasing WinRT apartment");
            unsafe { RoUninitialize() };
        }
    }

    impl ToastPlatform for WinRtPlatform {
        type Session = WinRtSession;

        fn initialize(&self) -> Result<WinRtSession, PlatformError> {
            unsafe { RoInitialize(RO_INIT_SINGLETHREADED) }.map_err(platform_err)?;
            Ok(WinRtSession {
                app_id: HSTRING::from(self.app_id.as_str()),
            })
        }
    }

    impl ToastSession for WinRtSession {
        type Manager = ToastNotificationManagerForUser;
        type Interface = IInspectable;
        type Notifier = ToastNotifier;
        type Content = XmlDocument;

        fn create_manager(&self) -> Result<Self::Manager, PlatformError> {
            ToastNotificationManager::GetDefault().map_err(platform_err)
        }

        fn query_interface(&self, manager: &Self::Manager) -> Result<Self::Interface, PlatformError> {
            manager.cast::<IInspectable>().map_err(platform_err)
        }

        fn notifier(&self, iface: &Self::Interface) -> Result<Self::Notifier, PlatformError> {
            let manager = iface
                .cast::<ToastNotificationManagerForUser>()
                .map_err(platform_err)?;
            manager
                .CreateToastNotifierWithId(&self.app_id)
                .map_err(platform_err)
        }

        fn template_content(&self, _iface: &Self::Interface) -> Result<Self::Content, PlatformError> {
            XmlDocument::new().map_err(platform_err)
        }

        fn set_content(
            &self,
            content: &Self::Content,
            payload: &ToastPayload<'_>,
        ) -> Result<(), PlatformError> {
            content
                .LoadXml(&HSTRING::from(payload.to_xml()))
                .map_err(platform_err)
        }

        fn show(&self, notifier: &Self::Notifier, content: &Self::Content) -> Result<(), PlatformError> {
            let toast = ToastNotification::CreateToastNotification(content).map_err(platform_err)?;
            notifier.Show(&toast).map_err(platform_err)
        }
    }
}

#[cfg(not(windows))]
mod desktop {
    use super::{ToastPlatform, ToastSession};
    use crate::error::PlatformError;
    use crate::toast::payload::ToastPayload;
    use notify_rust::Notification;
    use std::cell::RefCell;

    const APP_NAME: &str = "link-toast";

    /// freedesktop / macOS 通知（notify-rust）
    ///
    /// 这些平台没有 toast XML 和按钮协议激活，链接附在正文第二行。
    #[derive(Debug, Clone)]
    pub struct DesktopPlatform {
        app_name: String,
    }

    impl DesktopPlatform {
        /// `app_id` 在这里作为通知的应用名；Windows AUMID 形式的值会被忽略
        pub fn new(app_id: impl Into<String>) -> Self {
            let app_id = app_id.into();
            let app_name = if app_id.is_empty() || app_id.contains('\\') {
                APP_NAME.to_string()
            } else {
                app_id
            };
            Self { app_name }
        }
    }

    pub struct DesktopSession {
        app_name: String,
    }

    impl ToastPlatform for DesktopPlatform {
        type Session = DesktopSession;

        fn initialize(&self) -> Result<DesktopSession, PlatformError> {
            Ok(DesktopSession {
                app_name: self.app_name.clone(),
            })
        }
    }

    impl ToastSession for DesktopSession {
        type Manager = ();
        type Interface = ();
        type Notifier = String;
        type Content = RefCell<Notification>;

        fn create_manager(&self) -> Result<(), PlatformError> {
            Ok(())
        }

        fn query_interface(&self, _manager: &()) -> Result<(), PlatformError> {
            Ok(())
        }

        fn notifier(&self, _iface: &()) -> Result<String, PlatformError> {
            Ok(self.app_name.clone())
        }

        fn template_content(&self, _iface: &()) -> Result<Self::Content, PlatformError> {
            Ok(RefCell::new(Notification::new()))
        }

        fn set_content(
            &self,
            content: &Self::Content,
            payload: &ToastPayload<'_>,
        ) -> Result<(), PlatformError> {
            content
                .borrow_mut()
                .summary(payload.title)
                .body(&format!("{}\n{}", payload.body, payload.url));
            Ok(())
        }

        fn show(&self, notifier: &String, content: &Self::Content) -> Result<(), PlatformError> {
            content
                .borrow_mut()
                .appname(notifier)
                .show()
                .map(|_| ())
                .map_err(|e| PlatformError::new(e.to_string()))
        }
    }
}
