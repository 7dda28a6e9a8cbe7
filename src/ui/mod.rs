//! 界面层
//!
//! 浏览器页面的状态和交互逻辑，不依赖真实 DOM：
//! - `drop_target` - 拖放 / 点击选择文件的统一入口
//! - `batch` - 批量上传流程
//! - `compare` - A/B 图片对比流程
//! - `controller` - 持有两个流程的页面控制器和事件分发
//! - `notifier` - 面向用户的提示

pub mod batch;
pub mod compare;
pub mod controller;
pub mod drop_target;
pub mod notifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{BatchFlow, BatchPanel, BatchPhase, BatchSelection, BatchUiPhase};
pub use compare::{CompareFlow, ComparePanel, ComparePhase, CompareSlots, Slot};
pub use controller::{FlowKind, FlowResult, PageController, UiEvent};
pub use drop_target::{DragEvent, DropOutcome, DropTarget, SelectionMode};
pub use notifier::{LogNotifier, Notifier, RecordingNotifier};

/// 一次按钮点击的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 按钮不可用，点击被忽略
    Ignored,
    /// 本地校验未通过，没有发请求
    Rejected,
    /// 请求成功并已显示结果
    Succeeded,
    /// 请求失败（网络、状态码或响应格式）
    Failed,
}
