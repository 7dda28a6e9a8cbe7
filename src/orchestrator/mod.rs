//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 把任务文件翻译成页面事件，驱动 `PageController`，汇总结果。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::job_runner (处理 Vec<JobFile>)
//!     ↓  UiEvent (mpsc)
//! ui::PageController (批量流程 / 对比流程)
//!     ↓
//! infrastructure (HttpTransport)
//! ```

pub mod job_runner;

pub use job_runner::{App, PreparedJob, ProcessingStats};
