use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 图片清洗服务地址
    pub server_url: String,
    /// 任务 TOML 文件存放目录
    pub job_folder: String,
    /// 下载压缩包的保存目录
    pub download_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 请求超时（秒），None 表示一直等待服务端返回
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            job_folder: "jobs".to_string(),
            download_folder: "downloads".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，值不合法时返回错误
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 通过任意查找函数构建配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let verbose_logging = match lookup("VERBOSE_LOGGING") {
            Some(v) => parse_var("VERBOSE_LOGGING", &v, "bool")?,
            None => default.verbose_logging,
        };
        let request_timeout_secs = match lookup("WASH_REQUEST_TIMEOUT_SECS") {
            Some(v) => Some(parse_var("WASH_REQUEST_TIMEOUT_SECS", &v, "u64")?),
            None => default.request_timeout_secs,
        };

        let config = Self {
            server_url: lookup("WASH_SERVER_URL").unwrap_or(default.server_url),
            job_folder: lookup("WASH_JOB_FOLDER").unwrap_or(default.job_folder),
            download_folder: lookup("WASH_DOWNLOAD_FOLDER").unwrap_or(default.download_folder),
            verbose_logging,
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// 校验服务器地址
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.starts_with("http://") || self.server_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidServerUrl {
                url: self.server_url.clone(),
            })
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name: var_name.to_string(),
        value: value.to_string(),
        expected_type: expected_type.to_string(),
    })
}
