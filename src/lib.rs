//! sObject Explorer - 远程 sObject 目录的懒加载树视图
//!
//! 目录按 内存 → 磁盘快照 → 远程 的顺序解析，对象描述按需获取并在进程内缓存，
//! 再组装成 对象 → 字段 两级树。

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod remote;
pub mod services;
pub mod storage;

pub use error::{ExplorerError, Result};
pub use services::{SObjectExplorer, create_explorer, create_explorer_with};
