/// 缓存数据模型
/// 定义缓存数据的结构体

// 速率限制缓存模型
pub mod rate_limit;

// 重新导出常用类型
pub use rate_limit::RateLimitEntry;
