//! Codelab - 课程作业平台后端服务
//!
//! 学生在浏览器编辑器中编写代码，请求代码反馈并提交答案。
//!
//! # 架构
//! - `blob`: 程序文件存储（本地文件系统/内存）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `feedback`: 外部代码反馈服务
//! - `middlewares`: 速率限制中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//! - `workspace`: 题目页面的客户端流程（反馈、提交、邀请成员）

pub mod blob;
pub mod config;
pub mod entity;
pub mod errors;
pub mod feedback;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod workspace;
