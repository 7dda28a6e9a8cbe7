use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 批量清洗任务
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchJob {
    /// 要上传的图片
    pub files: Vec<PathBuf>,
    /// 逗号分隔的关键词
    #[serde(default)]
    pub keywords: String,
    /// 原样传给服务端的目标数量
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<String>,
}

/// 对比任务，original 为 A，subject 为 B
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompareJob {
    pub original: PathBuf,
    pub subject: PathBuf,
}

/// 一个任务文件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub batch: Vec<BatchJob>,
    #[serde(default)]
    pub compare: Vec<CompareJob>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl JobFile {
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty() && self.compare.is_empty()
    }

    /// 把相对路径解析为相对于任务文件所在目录的路径
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for job in &mut self.batch {
            for file in &mut job.files {
                *file = resolve(base_dir, file);
            }
        }
        for job in &mut self.compare {
            job.original = resolve(base_dir, &job.original);
            job.subject = resolve(base_dir, &job.subject);
        }
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
