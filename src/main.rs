use anyhow::Result;
use problem_crop::utils::logging;
use problem_crop::{App, Config};
use std::path::Path;
use tracing::error;

fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = match std::env::var("CONFIG_FILE") {
        Ok(path) => Config::from_toml_file(Path::new(&path))?,
        Err(_) => Config::from_env(),
    };
    config.validate()?;

    // 初始化并运行应用
    if let Err(e) = App::initialize(config).and_then(App::run) {
        error!("❌ 运行失败: {:#}", e);
        return Err(e);
    }

    Ok(())
}
