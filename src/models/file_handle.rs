//! 文件句柄
//!
//! 对用户选择的文件的不透明引用：只有文件名和内容，界面层不关心文件来自哪里

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::fs;

/// 已选择的文件
///
/// 克隆只复制引用计数，同一个文件被选择两次时两份句柄共享内容
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content: Arc<[u8]>,
}

impl FileHandle {
    /// 用内存中的内容创建文件句柄
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    /// 从磁盘读取文件
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read(path)
            .await
            .with_context(|| format!("无法读取图片文件: {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .with_context(|| format!("无法获取文件名: {}", path.display()))?;

        Ok(Self::new(name, content))
    }

    /// 文件名（不含目录）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 文件内容
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// 根据扩展名推断 MIME 类型
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("len", &self.content.len())
            .finish()
    }
}
