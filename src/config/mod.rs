//! 配置管理
//!
//! 静态配置在启动时从配置文件与环境变量加载，之后只读。

mod r#impl;
mod structs;

pub use structs::*;
