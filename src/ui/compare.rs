//! 对比流程
//!
//! A 为原图，B 为清洗后的图。两个槽位各自独立，新的选择直接覆盖。
//! 状态顺序：idle → validating → submitting → success / failure → idle

use std::fmt;

use tracing::{debug, error, info};

use crate::error::AppResult;
use crate::infrastructure::{MultipartPayload, Transport, COMPARE_ENDPOINT};
use crate::models::{CompareResponse, FileHandle};
use crate::ui::drop_target::{DragEvent, DropOutcome, DropTarget, SelectionMode};
use crate::ui::notifier::Notifier;
use crate::ui::SubmitOutcome;

pub const BOTH_MISSING_ALERT: &str = "비교할 두 이미지를 모두 올려주세요 (A:원본, B:세탁본)";
pub const ORIGINAL_MISSING_ALERT: &str = "원본 이미지(A)를 올려주세요";
pub const SUBJECT_MISSING_ALERT: &str = "세탁본 이미지(B)를 올려주세요";
pub const COMPARE_FAILED_ALERT: &str = "분석 중 오류가 발생했습니다.";
pub const TRIGGER_IDLE_LABEL: &str = "🔍 비교 분석 시작";
pub const TRIGGER_BUSY_LABEL: &str = "분석 중...";

/// 对比槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// 原图
    A,
    /// 清洗后的图
    B,
}

impl Slot {
    /// multipart 字段名
    pub fn field_name(self) -> &'static str {
        match self {
            Slot::A => "fileA",
            Slot::B => "fileB",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => write!(f, "A"),
            Slot::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparePhase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failure,
}

/// 两个槽位
#[derive(Debug, Clone, Default)]
pub struct CompareSlots {
    a: Option<FileHandle>,
    b: Option<FileHandle>,
}

impl CompareSlots {
    pub fn set(&mut self, slot: Slot, file: FileHandle) {
        match slot {
            Slot::A => self.a = Some(file),
            Slot::B => self.b = Some(file),
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&FileHandle> {
        match slot {
            Slot::A => self.a.as_ref(),
            Slot::B => self.b.as_ref(),
        }
    }

    /// 缺少文件的槽位
    pub fn missing(&self) -> Vec<Slot> {
        [Slot::A, Slot::B]
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }
}

/// 对比区域的视图模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparePanel {
    pub trigger_label: String,
    pub trigger_enabled: bool,
    pub result_visible: bool,
    pub meta_a: String,
    pub meta_b: String,
    pub size_a: String,
    pub size_b: String,
    pub dim_a: String,
    pub dim_b: String,
    pub diff_image_src: String,
}

impl Default for ComparePanel {
    fn default() -> Self {
        Self {
            trigger_label: TRIGGER_IDLE_LABEL.to_string(),
            trigger_enabled: true,
            result_visible: false,
            meta_a: String::new(),
            meta_b: String::new(),
            size_a: String::new(),
            size_b: String::new(),
            dim_a: String::new(),
            dim_b: String::new(),
            diff_image_src: String::new(),
        }
    }
}

impl ComparePanel {
    fn show(&mut self, response: CompareResponse) {
        self.result_visible = true;
        self.meta_a = response.meta_a;
        self.meta_b = response.meta_b;
        self.size_a = response.size_a;
        self.size_b = response.size_b;
        self.dim_a = response.dim_a;
        self.dim_b = response.dim_b;
        self.diff_image_src = response.diff_image;
    }

    fn restore_trigger(&mut self) {
        self.trigger_label = TRIGGER_IDLE_LABEL.to_string();
        self.trigger_enabled = true;
    }
}

/// 对比流程
#[derive(Debug, Clone)]
pub struct CompareFlow {
    slots: CompareSlots,
    drop_a: DropTarget,
    drop_b: DropTarget,
    panel: ComparePanel,
    phase: ComparePhase,
}

impl Default for CompareFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareFlow {
    pub fn new() -> Self {
        Self {
            slots: CompareSlots::default(),
            drop_a: DropTarget::new("drop-a", SelectionMode::Replace, "A: 원본 이미지"),
            drop_b: DropTarget::new("drop-b", SelectionMode::Replace, "B: 세탁본 이미지"),
            panel: ComparePanel::default(),
            phase: ComparePhase::Idle,
        }
    }

    pub fn slots(&self) -> &CompareSlots {
        &self.slots
    }

    pub fn panel(&self) -> &ComparePanel {
        &self.panel
    }

    pub fn phase(&self) -> ComparePhase {
        self.phase
    }

    pub fn drop_target(&self, slot: Slot) -> &DropTarget {
        match slot {
            Slot::A => &self.drop_a,
            Slot::B => &self.drop_b,
        }
    }

    fn drop_target_mut(&mut self, slot: Slot) -> &mut DropTarget {
        match slot {
            Slot::A => &mut self.drop_a,
            Slot::B => &mut self.drop_b,
        }
    }

    pub fn click_slot(&mut self, slot: Slot) {
        self.drop_target_mut(slot).click();
    }

    pub fn handle_drag(&mut self, slot: Slot, event: DragEvent) -> DropOutcome {
        let outcome = self.drop_target_mut(slot).handle(event);
        if let Some(file) = outcome.files.first() {
            self.slots.set(slot, file.clone());
        }
        outcome
    }

    pub fn pick_file(&mut self, slot: Slot, files: Vec<FileHandle>) {
        if let Some(file) = self.drop_target_mut(slot).pick(files).into_iter().next() {
            self.slots.set(slot, file);
        }
    }

    fn enter(&mut self, phase: ComparePhase) {
        debug!("对比流程: {:?} → {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// 点击对比按钮
    pub async fn compare<T, N>(&mut self, transport: &T, notifier: &N) -> SubmitOutcome
    where
        T: Transport,
        N: Notifier,
    {
        if !self.panel.trigger_enabled || self.phase != ComparePhase::Idle {
            debug!("对比按钮不可用，忽略点击");
            return SubmitOutcome::Ignored;
        }

        self.enter(ComparePhase::Validating);
        let (file_a, file_b) = match (
            self.slots.get(Slot::A).cloned(),
            self.slots.get(Slot::B).cloned(),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                notifier.alert(missing_alert(&self.slots.missing()));
                self.enter(ComparePhase::Idle);
                return SubmitOutcome::Rejected;
            }
        };

        self.enter(ComparePhase::Submitting);
        self.panel.trigger_label = TRIGGER_BUSY_LABEL.to_string();
        self.panel.trigger_enabled = false;

        info!("🔍 对比 {} ↔ {}", file_a.name(), file_b.name());
        let payload = MultipartPayload::new()
            .file(Slot::A.field_name(), file_a)
            .file(Slot::B.field_name(), file_b);

        let outcome = match send(transport, payload).await {
            Ok(response) => {
                self.enter(ComparePhase::Success);
                info!(
                    "✓ 对比完成: A[{} {} {}] B[{} {} {}]",
                    response.meta_a,
                    response.size_a,
                    response.dim_a,
                    response.meta_b,
                    response.size_b,
                    response.dim_b
                );
                debug!(
                    "差异图类型: {}",
                    if response.diff_is_inline() { "data URL" } else { "URL" }
                );
                self.panel.show(response);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                self.enter(ComparePhase::Failure);
                error!("❌ 图片对比失败: {}", e);
                notifier.alert(COMPARE_FAILED_ALERT);
                SubmitOutcome::Failed
            }
        };

        self.panel.restore_trigger();
        self.enter(ComparePhase::Idle);
        outcome
    }
}

/// 对比接口只看响应体：七个字段齐全就算成功，状态码不参与判断
async fn send<T: Transport>(transport: &T, payload: MultipartPayload) -> AppResult<CompareResponse> {
    let response = transport.post_multipart(COMPARE_ENDPOINT, payload).await?;
    if !response.is_success() {
        debug!("对比接口返回状态码 {}，仍按响应体解析", response.status);
    }
    response.parse()
}

fn missing_alert(missing: &[Slot]) -> &'static str {
    match missing {
        [Slot::A] => ORIGINAL_MISSING_ALERT,
        [Slot::B] => SUBJECT_MISSING_ALERT,
        _ => BOTH_MISSING_ALERT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifier::RecordingNotifier;
    use crate::ui::test_support::{files, RecordingTransport};

    const SAMPLE: &str = r#"{"metaA":"JPEG","metaB":"PNG","sizeA":"2MB","sizeB":"1MB","dimA":"800x600","dimB":"800x600","diffImage":"/tmp/diff.png"}"#;

    #[tokio::test]
    async fn test_single_slot_never_sends() {
        let transport = RecordingTransport::new();
        let notifier = RecordingNotifier::new();

        let mut only_a = CompareFlow::new();
        only_a.pick_file(Slot::A, files(&["a.png"]));
        assert_eq!(only_a.compare(&transport, &notifier).await, SubmitOutcome::Rejected);

        let mut only_b = CompareFlow::new();
        only_b.handle_drag(Slot::B, DragEvent::Drop(files(&["b.png"])));
        assert_eq!(only_b.compare(&transport, &notifier).await, SubmitOutcome::Rejected);

        let mut none = CompareFlow::new();
        assert_eq!(none.compare(&transport, &notifier).await, SubmitOutcome::Rejected);

        assert_eq!(transport.request_count(), 0);
        assert_eq!(
            notifier.alerts(),
            vec![
                SUBJECT_MISSING_ALERT.to_string(),
                ORIGINAL_MISSING_ALERT.to_string(),
                BOTH_MISSING_ALERT.to_string(),
            ]
        );
        assert!(only_a.panel().trigger_enabled);
        assert_eq!(only_a.panel().trigger_label, TRIGGER_IDLE_LABEL);
    }

    #[tokio::test]
    async fn test_success_sets_exact_values() {
        let transport = RecordingTransport::new().respond(200, SAMPLE);
        let notifier = RecordingNotifier::new();
        let mut flow = CompareFlow::new();
        flow.pick_file(Slot::A, files(&["a.jpg"]));
        flow.pick_file(Slot::B, files(&["b.png"]));

        assert_eq!(flow.compare(&transport, &notifier).await, SubmitOutcome::Succeeded);

        let panel = flow.panel();
        assert!(panel.result_visible);
        assert_eq!(panel.meta_a, "JPEG");
        assert_eq!(panel.meta_b, "PNG");
        assert_eq!(panel.size_a, "2MB");
        assert_eq!(panel.size_b, "1MB");
        assert_eq!(panel.dim_a, "800x600");
        assert_eq!(panel.dim_b, "800x600");
        assert_eq!(panel.diff_image_src, "/tmp/diff.png");
        assert_eq!(panel.trigger_label, TRIGGER_IDLE_LABEL);
        assert!(panel.trigger_enabled);

        let (endpoint, payload) = &transport.requests()[0];
        assert_eq!(endpoint, COMPARE_ENDPOINT);
        assert_eq!(payload.files("fileA")[0].name(), "a.jpg");
        assert_eq!(payload.files("fileB")[0].name(), "b.png");
        assert_eq!(payload.parts().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_slots_and_styling() {
        let transport = RecordingTransport::new().respond(200, r#"{"error":"Missing files"}"#);
        let notifier = RecordingNotifier::new();
        let mut flow = CompareFlow::new();
        flow.pick_file(Slot::A, files(&["a.png"]));
        flow.pick_file(Slot::B, files(&["b.png"]));

        assert_eq!(flow.compare(&transport, &notifier).await, SubmitOutcome::Failed);

        assert_eq!(notifier.last().as_deref(), Some(COMPARE_FAILED_ALERT));
        assert!(flow.panel().trigger_enabled);
        assert_eq!(flow.panel().trigger_label, TRIGGER_IDLE_LABEL);
        assert!(!flow.panel().result_visible);
        assert_eq!(flow.slots().get(Slot::A).map(|f| f.name()), Some("a.png"));
        assert_eq!(flow.drop_target(Slot::B).label(), "✅ b.png");
        assert_eq!(flow.phase(), ComparePhase::Idle);
    }

    #[tokio::test]
    async fn test_complete_body_wins_over_error_status() {
        let transport = RecordingTransport::new().respond(400, SAMPLE);
        let notifier = RecordingNotifier::new();
        let mut flow = CompareFlow::new();
        flow.pick_file(Slot::A, files(&["a.jpg"]));
        flow.pick_file(Slot::B, files(&["b.png"]));

        assert_eq!(flow.compare(&transport, &notifier).await, SubmitOutcome::Succeeded);
        assert!(flow.panel().result_visible);
        assert_eq!(flow.panel().meta_b, "PNG");
        assert_eq!(notifier.count(), 0);

        // 错误状态 + 不完整的响应体仍然是失败
        let transport = RecordingTransport::new().respond(500, r#"{"error":"Missing files"}"#);
        let mut flow = CompareFlow::new();
        flow.pick_file(Slot::A, files(&["a.jpg"]));
        flow.pick_file(Slot::B, files(&["b.png"]));
        assert_eq!(flow.compare(&transport, &notifier).await, SubmitOutcome::Failed);
        assert_eq!(notifier.last().as_deref(), Some(COMPARE_FAILED_ALERT));
    }

    #[tokio::test]
    async fn test_new_selection_overwrites_slot() {
        let transport = RecordingTransport::new().respond(200, SAMPLE);
        let notifier = RecordingNotifier::new();
        let mut flow = CompareFlow::new();
        flow.pick_file(Slot::A, files(&["old.png"]));
        flow.handle_drag(Slot::A, DragEvent::Drop(files(&["new.png", "ignored.png"])));
        flow.pick_file(Slot::B, files(&["b.png"]));

        flow.compare(&transport, &notifier).await;

        let (_, payload) = &transport.requests()[0];
        assert_eq!(payload.files("fileA")[0].name(), "new.png");
        assert_eq!(flow.drop_target(Slot::A).label(), "✅ new.png");
    }
}
