//! SMS - 学籍管理与缴费门控升级服务
//!
//! 基于 Actix Web 与 SeaORM 构建，负责课程、批次、学生档案与缴费流水，
//! 以及按学年推进学生的升级/毕业操作。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `progression`: 学业进度引擎（规则、批次推导、缴费校验、学年切换决策）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod progression;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
