//! 页面控制器
//!
//! 持有两个流程的全部状态，传输层和提示层由外部注入。
//! 所有交互都以 `UiEvent` 的形式进入 `dispatch`。

use tokio::sync::mpsc;
use tracing::debug;

use crate::infrastructure::Transport;
use crate::models::FileHandle;
use crate::ui::batch::BatchFlow;
use crate::ui::compare::{CompareFlow, Slot};
use crate::ui::drop_target::DragEvent;
use crate::ui::notifier::Notifier;
use crate::ui::SubmitOutcome;

/// 页面事件
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// 重新加载页面，两个流程的状态全部丢弃
    PageReloaded,
    /// 点击批量拖放区域
    BatchZoneClicked,
    /// 批量拖放区域的拖放事件
    BatchDrag(DragEvent),
    /// 批量文件选择器返回
    BatchPicked(Vec<FileHandle>),
    /// 关键词输入框内容
    KeywordsInput(String),
    /// 目标数量输入框内容
    TargetCountInput(Option<String>),
    /// 点击处理按钮
    ProcessClicked,
    /// 点击对比槽位
    SlotClicked(Slot),
    /// 对比槽位的拖放事件
    SlotDrag(Slot, DragEvent),
    /// 对比槽位的文件选择器返回
    SlotPicked(Slot, Vec<FileHandle>),
    /// 点击对比按钮
    CompareClicked,
}

/// 哪个流程产生的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Batch,
    Compare,
}

/// 一次按钮点击的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowResult {
    pub flow: FlowKind,
    pub outcome: SubmitOutcome,
}

/// 页面控制器
pub struct PageController<T, N> {
    transport: T,
    notifier: N,
    batch: BatchFlow,
    compare: CompareFlow,
}

impl<T, N> PageController<T, N>
where
    T: Transport,
    N: Notifier,
{
    pub fn new(transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
            batch: BatchFlow::new(),
            compare: CompareFlow::new(),
        }
    }

    pub fn batch(&self) -> &BatchFlow {
        &self.batch
    }

    pub fn compare(&self) -> &CompareFlow {
        &self.compare
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// 处理一个事件，按钮点击会返回流程结果
    pub async fn dispatch(&mut self, event: UiEvent) -> Option<FlowResult> {
        match event {
            UiEvent::PageReloaded => {
                debug!("页面重新加载，清空所有选择");
                self.batch = BatchFlow::new();
                self.compare = CompareFlow::new();
            }
            UiEvent::BatchZoneClicked => self.batch.click_drop_zone(),
            UiEvent::BatchDrag(drag) => {
                self.batch.handle_drag(drag);
            }
            UiEvent::BatchPicked(files) => self.batch.pick_files(files),
            UiEvent::KeywordsInput(keywords) => self.batch.set_keywords(keywords),
            UiEvent::TargetCountInput(count) => self.batch.set_target_count(count),
            UiEvent::ProcessClicked => {
                let outcome = self.batch.submit(&self.transport, &self.notifier).await;
                return Some(FlowResult {
                    flow: FlowKind::Batch,
                    outcome,
                });
            }
            UiEvent::SlotClicked(slot) => self.compare.click_slot(slot),
            UiEvent::SlotDrag(slot, drag) => {
                self.compare.handle_drag(slot, drag);
            }
            UiEvent::SlotPicked(slot, files) => self.compare.pick_file(slot, files),
            UiEvent::CompareClicked => {
                let outcome = self.compare.compare(&self.transport, &self.notifier).await;
                return Some(FlowResult {
                    flow: FlowKind::Compare,
                    outcome,
                });
            }
        }
        None
    }

    /// 消费事件通道直到发送端全部关闭
    ///
    /// 每个按钮点击的结果连同控制器本身交给回调，回调可以读取视图模型
    pub async fn listen<F>(&mut self, mut events: mpsc::Receiver<UiEvent>, mut on_result: F)
    where
        F: FnMut(&Self, FlowResult),
    {
        while let Some(event) = events.recv().await {
            debug!("收到事件: {}", event_name(&event));
            if let Some(result) = self.dispatch(event).await {
                on_result(self, result);
            }
        }
    }
}

fn event_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::PageReloaded => "PageReloaded",
        UiEvent::BatchZoneClicked => "BatchZoneClicked",
        UiEvent::BatchDrag(_) => "BatchDrag",
        UiEvent::BatchPicked(_) => "BatchPicked",
        UiEvent::KeywordsInput(_) => "KeywordsInput",
        UiEvent::TargetCountInput(_) => "TargetCountInput",
        UiEvent::ProcessClicked => "ProcessClicked",
        UiEvent::SlotClicked(_) => "SlotClicked",
        UiEvent::SlotDrag(..) => "SlotDrag",
        UiEvent::SlotPicked(..) => "SlotPicked",
        UiEvent::CompareClicked => "CompareClicked",
    }
}
