//! 提示层
//!
//! 流程只通过 `Notifier::alert` 向用户报告问题。
//! 二进制程序用 `LogNotifier` 写日志，测试用 `RecordingNotifier` 记录内容。

use std::sync::Mutex;

use tracing::warn;

/// 面向用户的阻塞提示（浏览器里的 alert）
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// 把提示写进日志
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!("🔔 {}", message);
    }
}

/// 记录所有提示，供无界面运行时统计和测试使用
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.alerts().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.alerts().len()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        warn!("🔔 {}", message);
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}
