//! 存储层模块
//!
//! 目录快照的磁盘持久化。

pub mod snapshot;

pub use snapshot::{FileSnapshotStore, SnapshotStore, parse_snapshot};
