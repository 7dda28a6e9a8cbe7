use anyhow::Result;
use wash_studio::utils::logging;
use wash_studio::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::try_from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let _stats = App::initialize(config)?.run().await?;

    Ok(())
}
