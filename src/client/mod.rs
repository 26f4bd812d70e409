//! Client-side state of the conversation and dashboard screens.

pub mod gateway;
pub mod notice;
pub mod route;
pub mod session;
pub mod window_cache;

pub use gateway::{Gateway, LocalGateway};
pub use notice::{Notice, NoticeLevel};
pub use route::{History, MemoryHistory, RouteSync};
pub use session::Session;
pub use window_cache::WindowCache;
