use crate::models::job::JobFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载任务
pub async fn load_job_file(toml_file_path: &Path) -> Result<JobFile> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut job_file: JobFile = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    if let Some(base_dir) = toml_file_path.parent() {
        job_file.resolve_paths(base_dir);
    }
    job_file.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(job_file)
}

/// 从文件夹中加载所有任务文件
///
/// 无法解析的文件只记录警告并跳过，按文件名排序保证执行顺序稳定
pub async fn load_all_job_files(folder_path: &str) -> Result<Vec<JobFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut job_files = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_job_file(&path).await {
            Ok(job_file) => {
                tracing::info!(
                    "成功加载 {} 个批量任务, {} 个对比任务",
                    job_file.batch.len(),
                    job_file.compare.len()
                );
                job_files.push(job_file);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(job_files)
}
