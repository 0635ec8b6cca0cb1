//! 远程访问模块
//!
//! 认证、会话缓存、HTTP 传输以及在其上的远程获取。

pub mod auth;
pub mod fetcher;
pub mod session;
pub mod transport;

pub use auth::{CliOrgInfoProvider, OrgInfoProvider, StaticOrgInfoProvider, create_org_info_provider};
pub use fetcher::RemoteFetcher;
pub use session::SessionHolder;
pub use transport::{HttpTransport, Transport, Verb};
