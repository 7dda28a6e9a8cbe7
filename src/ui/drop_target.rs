//! 拖放输入适配器
//!
//! 把拖放和"点击选择文件"统一成同一个"已选择文件"事件。
//! 两种来源走同一条 `forward` 路径，不存在分支差异。

use tracing::debug;

use crate::models::FileHandle;

/// 拖放事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    /// 放下，携带拖入的文件（可能为空）
    Drop(Vec<FileHandle>),
}

/// 选择模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// 多文件累加（批量上传）
    Accumulate,
    /// 单文件替换（对比槽位），只取第一个文件
    Replace,
}

/// 处理一个拖放事件的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    /// 平台默认行为（打开文件、页面跳转）是否被阻止
    pub default_prevented: bool,
    /// 需要交给上层的文件，空表示没有新选择
    pub files: Vec<FileHandle>,
}

/// 拖放区域
#[derive(Debug, Clone)]
pub struct DropTarget {
    id: String,
    mode: SelectionMode,
    prompt: String,
    active: bool,
    confirmed: Option<String>,
    picker_requests: usize,
}

impl DropTarget {
    pub fn new(id: impl Into<String>, mode: SelectionMode, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode,
            prompt: prompt.into(),
            active: false,
            confirmed: None,
            picker_requests: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 是否处于拖入高亮状态
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 是否已确认选择（仅替换模式）
    pub fn is_confirmed(&self) -> bool {
        self.confirmed.is_some()
    }

    /// 当前显示的文字
    pub fn label(&self) -> &str {
        self.confirmed.as_deref().unwrap_or(&self.prompt)
    }

    /// 点击区域时打开文件选择器的次数
    pub fn picker_requests(&self) -> usize {
        self.picker_requests
    }

    /// 点击区域，请求打开文件选择器
    pub fn click(&mut self) {
        self.picker_requests += 1;
        debug!("[{}] 打开文件选择器", self.id);
    }

    /// 处理拖放事件
    pub fn handle(&mut self, event: DragEvent) -> DropOutcome {
        let files = match event {
            DragEvent::Enter | DragEvent::Over => {
                self.active = true;
                Vec::new()
            }
            DragEvent::Leave => {
                self.active = false;
                Vec::new()
            }
            DragEvent::Drop(files) => {
                self.active = false;
                self.forward(files)
            }
        };

        DropOutcome {
            default_prevented: true,
            files,
        }
    }

    /// 文件选择器返回的文件
    pub fn pick(&mut self, files: Vec<FileHandle>) -> Vec<FileHandle> {
        self.forward(files)
    }

    fn forward(&mut self, files: Vec<FileHandle>) -> Vec<FileHandle> {
        match self.mode {
            SelectionMode::Accumulate => {
                debug!("[{}] 收到 {} 个文件", self.id, files.len());
                files
            }
            SelectionMode::Replace => match files.into_iter().next() {
                Some(first) => {
                    debug!("[{}] 选择文件: {}", self.id, first.name());
                    self.confirmed = Some(format!("✅ {}", first.name()));
                    vec![first]
                }
                None => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<FileHandle> {
        names.iter().map(|n| FileHandle::new(*n, vec![0])).collect()
    }

    #[test]
    fn test_active_style_follows_drag_events() {
        let mut target = DropTarget::new("drop-zone", SelectionMode::Accumulate, "여기로");

        assert!(target.handle(DragEvent::Enter).default_prevented);
        assert!(target.is_active());
        target.handle(DragEvent::Leave);
        assert!(!target.is_active());
        target.handle(DragEvent::Over);
        assert!(target.is_active());

        let outcome = target.handle(DragEvent::Drop(files(&["a.png", "b.png"])));
        assert!(outcome.default_prevented);
        assert!(!target.is_active());
        assert_eq!(outcome.files.len(), 2);
    }

    #[test]
    fn test_drop_and_pick_forward_identically() {
        let mut dropped = DropTarget::new("a", SelectionMode::Accumulate, "");
        let mut picked = DropTarget::new("b", SelectionMode::Accumulate, "");

        let via_drop = dropped.handle(DragEvent::Drop(files(&["x.png", "y.png"]))).files;
        let via_pick = picked.pick(files(&["x.png", "y.png"]));
        assert_eq!(via_drop, via_pick);
    }

    #[test]
    fn test_replace_mode_takes_first_and_confirms() {
        let mut target = DropTarget::new("drop-a", SelectionMode::Replace, "A 이미지");
        assert_eq!(target.label(), "A 이미지");

        let chosen = target.pick(files(&["first.png", "second.png"]));
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].name(), "first.png");
        assert!(target.is_confirmed());
        assert_eq!(target.label(), "✅ first.png");

        // 空的拖放不会清掉已确认的样式
        let outcome = target.handle(DragEvent::Drop(Vec::new()));
        assert!(outcome.files.is_empty());
        assert_eq!(target.label(), "✅ first.png");
    }

    #[test]
    fn test_click_requests_picker() {
        let mut target = DropTarget::new("drop-zone", SelectionMode::Accumulate, "");
        target.click();
        target.click();
        assert_eq!(target.picker_requests(), 2);
    }
}
