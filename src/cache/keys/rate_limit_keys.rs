/// 速率限制缓存键前缀
pub const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 生成速率限制缓存键
/// 同一主体在同一窗口内只对应一个键，窗口由存储的TTL管理
pub fn rate_limit_key(subject: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, subject)
}

/// 生成速率限制键的扫描模式
/// 批量清除和列表接口只允许使用该模式，避免误删其他命名空间
pub fn rate_limit_pattern() -> String {
    format!("{}*", RATE_LIMIT_PREFIX)
}
