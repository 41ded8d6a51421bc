use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub progression: ProgressionConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub max_age: usize,
}

/// 学业进度策略配置
///
/// 启动时转换为不可变的 `ProgressionRules` 注入到升级引擎。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    pub default_duration: u32,        // 未登记课程的学制（年）
    pub courses: Vec<CourseDuration>, // 已登记课程的学制
    pub year_order: Vec<String>,      // 有序年级标签
    pub semester_order: Vec<String>,  // 有序学期标签
}

/// 课程学制
///
/// 课程名称常含 "."（如 "B.Com."），不能作为配置键，因此以列表形式配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDuration {
    pub name: String,
    pub duration: u32,
}
