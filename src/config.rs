use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// 应用配置总结构
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub delivery: DeliverySettings,
}

/// 服务相关配置（监听地址、端口）
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// 媒体库目录配置
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    /// SQLite 文件路径
    pub url: String,
    pub max_connections: u32,
    /// 启动时写入数据库的条目清单（JSON 数组）
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
    /// 是否在启动时加载内存快照，请求期间只读快照
    pub snapshot: bool,
}

/// 文件交付配置
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DeliverySettings {
    /// 反向代理前缀。
    /// 若设置，响应只携带 `X-Accel-Redirect`，由前端代理（如 nginx）直接发送文件。
    #[serde(default)]
    pub x_accel_prefix: Option<String>,
}

impl DeliverySettings {
    /// 空字符串视为未设置
    pub fn offload_prefix(&self) -> Option<&str> {
        self.x_accel_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
    }
}

impl Settings {
    /// 加载配置：支持默认值、可选配置文件、环境变量覆盖
    pub fn new() -> anyhow::Result<Self> {
        let builder = Config::builder()
            // 默认值（代码内硬编码）
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("catalog.url", "library.db")?
            .set_default("catalog.max_connections", 4)?
            .set_default::<&str, Option<String>>("catalog.seed_file", None)?
            .set_default("catalog.snapshot", true)?
            .set_default::<&str, Option<String>>("delivery.x_accel_prefix", None)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("ITEM").separator("__"));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
