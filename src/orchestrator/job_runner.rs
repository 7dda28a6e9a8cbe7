//! 任务执行器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：写日志文件头、创建 HttpTransport
//! 2. **任务加载**：扫描任务目录下的 TOML 文件
//! 3. **事件回放**：把每个任务转换成页面事件，通过通道交给 PageController
//! 4. **结果下载**：批量任务成功后下载压缩包
//! 5. **全局统计**：汇总所有任务的处理结果

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::future::try_join_all;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::HttpTransport;
use crate::models::{BatchJob, CompareJob, FileHandle, JobFile};
use crate::ui::{FlowKind, FlowResult, PageController, RecordingNotifier, Slot, SubmitOutcome, UiEvent};
use crate::utils::logging;

/// 准备好的任务：标签 + 要回放的事件
#[derive(Debug)]
pub struct PreparedJob {
    pub kind: FlowKind,
    pub label: String,
    pub events: Vec<UiEvent>,
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub batch_total: usize,
    pub batch_success: usize,
    pub compare_total: usize,
    pub compare_success: usize,
    pub downloads: usize,
    pub alerts: usize,
}

impl ProcessingStats {
    fn record(&mut self, kind: FlowKind, succeeded: bool) {
        match kind {
            FlowKind::Batch => {
                self.batch_total += 1;
                if succeeded {
                    self.batch_success += 1;
                }
            }
            FlowKind::Compare => {
                self.compare_total += 1;
                if succeeded {
                    self.compare_success += 1;
                }
            }
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    transport: HttpTransport,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        config.validate()?;
        let transport = HttpTransport::new(&config)?;

        Ok(Self { config, transport })
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描任务文件...");
        let job_files = crate::models::load_all_job_files(&self.config.job_folder).await?;

        if job_files.iter().all(JobFile::is_empty) {
            warn!("⚠️ 没有找到待处理的任务，程序结束");
            return Ok(ProcessingStats::default());
        }

        let batch_count: usize = job_files.iter().map(|f| f.batch.len()).sum();
        let compare_count: usize = job_files.iter().map(|f| f.compare.len()).sum();
        logging::log_jobs_loaded(job_files.len(), batch_count, compare_count);

        let mut stats = ProcessingStats::default();
        let mut prepared = Vec::new();
        for job_file in &job_files {
            for job in &job_file.batch {
                match prepare_batch(job).await {
                    Ok(p) => prepared.push(p),
                    Err(e) => {
                        error!("❌ 批量任务文件读取失败: {:#}", e);
                        stats.record(FlowKind::Batch, false);
                    }
                }
            }
            for job in &job_file.compare {
                match prepare_compare(job).await {
                    Ok(p) => prepared.push(p),
                    Err(e) => {
                        error!("❌ 对比任务文件读取失败: {:#}", e);
                        stats.record(FlowKind::Compare, false);
                    }
                }
            }
        }

        let Self { config, transport } = self;
        let mut page = PageController::new(transport, RecordingNotifier::new());
        let results = replay(&mut page, prepared).await;

        for (label, result, href) in results {
            let succeeded = result.outcome == SubmitOutcome::Succeeded;
            stats.record(result.flow, succeeded);

            if !succeeded {
                warn!("⚠️ {} 未完成: {:?}", label, result.outcome);
                continue;
            }

            if let Some(href) = href {
                match save_download(page.transport(), &href, &config.download_folder).await {
                    Ok(path) => {
                        info!("💾 已保存: {}", path.display());
                        stats.downloads += 1;
                    }
                    Err(e) => error!("❌ 下载失败 ({}): {}", href, e),
                }
            }
        }
        stats.alerts = page.notifier().count();

        logging::print_final_stats(
            &[
                ("批量任务", stats.batch_success, stats.batch_total),
                ("对比任务", stats.compare_success, stats.compare_total),
                ("下载", stats.downloads, stats.batch_success),
            ],
            stats.alerts,
            &config.output_log_file,
        );

        Ok(stats)
    }
}

/// 通过事件通道回放所有任务
///
/// 每个任务以一次按钮点击结束，所以结果和任务按顺序一一对应
pub async fn replay<T, N>(
    page: &mut PageController<T, N>,
    prepared: Vec<PreparedJob>,
) -> Vec<(String, FlowResult, Option<String>)>
where
    T: crate::infrastructure::Transport,
    N: crate::ui::Notifier,
{
    let total = prepared.len();
    let mut labels = Vec::with_capacity(total);
    let mut event_batches = Vec::with_capacity(total);
    for job in prepared {
        labels.push((job.kind, job.label));
        event_batches.push(job.events);
    }

    let (tx, rx) = mpsc::channel(32);
    let producer = tokio::spawn(async move {
        for events in event_batches {
            for event in events {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
        }
    });

    let mut collected = Vec::with_capacity(total);
    let mut label_iter = labels.into_iter().enumerate();
    page.listen(rx, |page, result| {
        let label = match label_iter.next() {
            Some((index, (kind, label))) => {
                let kind_name = match kind {
                    FlowKind::Batch => "批量",
                    FlowKind::Compare => "对比",
                };
                logging::log_job_finished(
                    kind_name,
                    index + 1,
                    total,
                    &label,
                    result.outcome == SubmitOutcome::Succeeded,
                );
                label
            }
            None => String::new(),
        };

        let href = match result.flow {
            FlowKind::Batch if result.outcome == SubmitOutcome::Succeeded => {
                page.batch().panel().download_href.clone()
            }
            FlowKind::Compare if result.outcome == SubmitOutcome::Succeeded => {
                let panel = page.compare().panel();
                info!(
                    "🖼️ 差异图: {}",
                    logging::truncate_text(&panel.diff_image_src, 60)
                );
                None
            }
            _ => None,
        };

        collected.push((label, result, href));
    })
    .await;

    if let Err(e) = producer.await {
        error!("事件发送任务异常结束: {}", e);
    }

    collected
}

/// 读取批量任务的所有文件并生成事件
pub async fn prepare_batch(job: &BatchJob) -> Result<PreparedJob> {
    let files = try_join_all(job.files.iter().map(|p| FileHandle::from_path(p))).await?;
    let label = format!("{} 个文件, 关键词: {}", files.len(), job.keywords);

    Ok(PreparedJob {
        kind: FlowKind::Batch,
        label,
        events: batch_events(job, files),
    })
}

/// 读取对比任务的两个文件并生成事件
pub async fn prepare_compare(job: &CompareJob) -> Result<PreparedJob> {
    let (original, subject) = futures::try_join!(
        FileHandle::from_path(&job.original),
        FileHandle::from_path(&job.subject)
    )?;
    let label = format!("{} ↔ {}", original.name(), subject.name());

    Ok(PreparedJob {
        kind: FlowKind::Compare,
        label,
        events: compare_events(original, subject),
    })
}

/// 批量任务对应的页面操作
///
/// 每个任务都从刚加载的页面开始，上一个任务失败后留下的选择不会带入
pub fn batch_events(job: &BatchJob, files: Vec<FileHandle>) -> Vec<UiEvent> {
    vec![
        UiEvent::PageReloaded,
        UiEvent::BatchZoneClicked,
        UiEvent::BatchPicked(files),
        UiEvent::KeywordsInput(job.keywords.clone()),
        UiEvent::TargetCountInput(job.target_count.clone()),
        UiEvent::ProcessClicked,
    ]
}

/// 对比任务对应的页面操作
pub fn compare_events(original: FileHandle, subject: FileHandle) -> Vec<UiEvent> {
    vec![
        UiEvent::PageReloaded,
        UiEvent::SlotClicked(Slot::A),
        UiEvent::SlotPicked(Slot::A, vec![original]),
        UiEvent::SlotClicked(Slot::B),
        UiEvent::SlotPicked(Slot::B, vec![subject]),
        UiEvent::CompareClicked,
    ]
}

/// 下载文件名取 URL 的最后一段
pub fn download_file_name(href: &str) -> String {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or("download.zip")
        .to_string()
}

async fn save_download(transport: &HttpTransport, href: &str, folder: &str) -> Result<PathBuf> {
    let bytes = transport.download(href).await?;

    tokio::fs::create_dir_all(folder)
        .await
        .with_context(|| format!("无法创建下载目录: {}", folder))?;

    let path = Path::new(folder).join(download_file_name(href));
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::file_write_failed(path.to_string_lossy(), e))?;

    Ok(path)
}
