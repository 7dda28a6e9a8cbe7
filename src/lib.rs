//! # Wash Studio
//!
//! 图片清洗服务的无界面客户端
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP Client，只暴露"提交表单 / 下载文件"能力
//! - `Transport` - 界面层唯一依赖的传输抽象
//!
//! ### ② 界面层（UI）
//! - `ui/` - 原网页的状态和交互逻辑，不依赖 DOM
//! - `BatchFlow` - 批量上传：选择文件 → 校验关键词 → 上传 → 显示下载链接
//! - `CompareFlow` - A/B 对比：两个槽位 → 上传 → 显示元数据和差异图
//! - `PageController` - 持有两个流程，按事件分发
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/job_runner` - 读取任务文件，回放成页面事件，下载结果

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod ui;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{HttpTransport, MultipartPayload, Transport};
pub use models::{FileHandle, JobFile};
pub use orchestrator::App;
pub use ui::{PageController, SubmitOutcome, UiEvent};
