use crate::config::AppConfig;
use crate::progression::ProgressionRules;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub rules: Arc<ProgressionRules>,
}

/// 由配置构造学业进度规则，启动后只读
fn build_rules() -> ProgressionRules {
    let config = AppConfig::get();
    let rules = config
        .progression
        .to_rules()
        .expect("Invalid progression configuration");

    debug!(
        "Progression rules loaded: {} year label(s), {} semester label(s)",
        rules.year_order().len(),
        rules.semester_order().len()
    );
    rules
}

/// 统计在册规模，便于确认连接的是预期的数据库
async fn report_roster(storage: &Arc<dyn Storage>) {
    match storage.list_courses().await {
        Ok(courses) if courses.is_empty() => {
            info!("No courses registered yet");
        }
        Ok(courses) => {
            let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
            info!("{} course(s) registered: {}", courses.len(), names.join(", "));
        }
        Err(e) => {
            warn!("Failed to list courses at startup: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储与学业进度规则
pub async fn prepare_server_startup() -> StartupContext {
    let rules = build_rules();

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    report_roster(&storage).await;

    StartupContext {
        storage,
        rules: Arc::new(rules),
    }
}
