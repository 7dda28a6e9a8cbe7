//! 批量上传流程
//!
//! 状态顺序：
//! 1. idle → validating（点击处理按钮）
//! 2. validating → submitting（关键词不为空）
//! 3. submitting → awaiting-response → success / failure
//! 4. success / failure → idle
//!
//! 成功后清空已选文件；失败时保留，用户可以直接重试

use tracing::{debug, error, info};

use crate::error::AppResult;
use crate::infrastructure::{MultipartPayload, Transport, UPLOAD_ENDPOINT};
use crate::models::{FileHandle, UploadResponse};
use crate::ui::drop_target::{DragEvent, DropOutcome, DropTarget, SelectionMode};
use crate::ui::notifier::Notifier;
use crate::ui::SubmitOutcome;

pub const KEYWORDS_REQUIRED_ALERT: &str = "키워드를 입력해주세요!";
pub const UPLOAD_FAILED_ALERT: &str = "처리 중 오류가 발생했습니다.";
const DROP_ZONE_PROMPT: &str = "이미지를 여기로 드래그하거나 클릭하여 선택하세요";

/// 批量流程的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    Validating,
    Submitting,
    AwaitingResponse,
    Success,
    Failure,
}

/// 页面上可见的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchUiPhase {
    Idle,
    Busy,
    Result,
}

/// 批量区域的视图模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPanel {
    /// 文件列表文字
    pub file_list_text: String,
    /// 处理按钮是否可用
    pub submit_enabled: bool,
    /// "处理中" 提示是否可见
    pub status_visible: bool,
    /// 结果区域是否可见
    pub result_visible: bool,
    /// 下载链接
    pub download_href: Option<String>,
}

impl Default for BatchPanel {
    fn default() -> Self {
        Self {
            file_list_text: String::new(),
            submit_enabled: false,
            status_visible: false,
            result_visible: false,
            download_href: None,
        }
    }
}

impl BatchPanel {
    pub fn ui_phase(&self) -> BatchUiPhase {
        if self.status_visible {
            BatchUiPhase::Busy
        } else if self.result_visible {
            BatchUiPhase::Result
        } else {
            BatchUiPhase::Idle
        }
    }
}

/// 已选择的文件集合
///
/// 只追加、不去重，成功提交后才清空
#[derive(Debug, Clone, Default)]
pub struct BatchSelection {
    files: Vec<FileHandle>,
}

impl BatchSelection {
    pub fn add_files(&mut self, files: impl IntoIterator<Item = FileHandle>) {
        self.files.extend(files);
    }

    pub fn reset(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 把选择状态同步到视图，每次修改后都要调用
    pub fn render(&self, panel: &mut BatchPanel) {
        if self.files.is_empty() {
            panel.file_list_text.clear();
            panel.submit_enabled = false;
        } else {
            let names: Vec<&str> = self.files.iter().map(|f| f.name()).collect();
            panel.file_list_text =
                format!("{}개의 파일이 선택됨: {}", self.files.len(), names.join(", "));
            panel.submit_enabled = true;
        }
    }
}

/// 批量上传流程
#[derive(Debug, Clone)]
pub struct BatchFlow {
    selection: BatchSelection,
    drop_zone: DropTarget,
    panel: BatchPanel,
    keywords: String,
    target_count: Option<String>,
    phase: BatchPhase,
}

impl Default for BatchFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchFlow {
    pub fn new() -> Self {
        let mut flow = Self {
            selection: BatchSelection::default(),
            drop_zone: DropTarget::new("drop-zone", SelectionMode::Accumulate, DROP_ZONE_PROMPT),
            panel: BatchPanel::default(),
            keywords: String::new(),
            target_count: None,
            phase: BatchPhase::Idle,
        };
        flow.selection.render(&mut flow.panel);
        flow
    }

    pub fn selection(&self) -> &BatchSelection {
        &self.selection
    }

    pub fn panel(&self) -> &BatchPanel {
        &self.panel
    }

    pub fn drop_zone(&self) -> &DropTarget {
        &self.drop_zone
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    /// 目标数量原样传给服务端，不做校验
    pub fn set_target_count(&mut self, target_count: Option<String>) {
        self.target_count = target_count;
    }

    /// 点击拖放区域
    pub fn click_drop_zone(&mut self) {
        self.drop_zone.click();
    }

    /// 拖放事件
    pub fn handle_drag(&mut self, event: DragEvent) -> DropOutcome {
        let outcome = self.drop_zone.handle(event);
        if !outcome.files.is_empty() {
            self.add_files(outcome.files.clone());
        }
        outcome
    }

    /// 文件选择器返回
    pub fn pick_files(&mut self, files: Vec<FileHandle>) {
        let files = self.drop_zone.pick(files);
        self.add_files(files);
    }

    fn add_files(&mut self, files: Vec<FileHandle>) {
        self.selection.add_files(files);
        self.selection.render(&mut self.panel);
    }

    fn enter(&mut self, phase: BatchPhase) {
        debug!("批量流程: {:?} → {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// 点击处理按钮
    pub async fn submit<T, N>(&mut self, transport: &T, notifier: &N) -> SubmitOutcome
    where
        T: Transport,
        N: Notifier,
    {
        if !self.panel.submit_enabled || self.phase != BatchPhase::Idle {
            debug!("处理按钮不可用，忽略点击");
            return SubmitOutcome::Ignored;
        }

        self.enter(BatchPhase::Validating);
        if self.keywords.is_empty() {
            notifier.alert(KEYWORDS_REQUIRED_ALERT);
            self.enter(BatchPhase::Idle);
            return SubmitOutcome::Rejected;
        }

        self.enter(BatchPhase::Submitting);
        self.panel.submit_enabled = false;
        self.panel.status_visible = true;
        self.panel.result_visible = false;

        let payload = self.build_payload();
        info!(
            "📤 上传 {} 个文件 (关键词: {})",
            self.selection.len(),
            self.keywords
        );

        match self.send(transport, payload).await {
            Ok(response) => {
                self.enter(BatchPhase::Success);
                info!(
                    "✓ 处理完成 (生成 {} 张), 下载地址: {}",
                    response
                        .count
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "?".to_string()),
                    response.download_url
                );

                self.panel.status_visible = false;
                self.panel.result_visible = true;
                self.panel.download_href = Some(response.download_url);
                self.selection.reset();
                self.selection.render(&mut self.panel);

                self.enter(BatchPhase::Idle);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                self.enter(BatchPhase::Failure);
                error!("❌ 批量上传失败: {}", e);

                self.panel.status_visible = false;
                notifier.alert(UPLOAD_FAILED_ALERT);
                self.panel.submit_enabled = true;

                self.enter(BatchPhase::Idle);
                SubmitOutcome::Failed
            }
        }
    }

    fn build_payload(&self) -> MultipartPayload {
        let mut payload = MultipartPayload::new();
        for file in self.selection.files() {
            payload = payload.file("files[]", file.clone());
        }
        payload = payload.text("keywords", self.keywords.clone());
        if let Some(target_count) = &self.target_count {
            payload = payload.text("target_count", target_count.clone());
        }
        payload
    }

    async fn send<T: Transport>(
        &mut self,
        transport: &T,
        payload: MultipartPayload,
    ) -> AppResult<UploadResponse> {
        let response = transport.post_multipart(UPLOAD_ENDPOINT, payload).await?;
        self.enter(BatchPhase::AwaitingResponse);
        response.json(UPLOAD_ENDPOINT)
    }
}
