use crate::{ForumError, RESERVED_PERSONA_NAME};
use url::Url;

/// 去除首尾空白；全空白视为缺失
pub fn trimmed(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}

pub fn is_http_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(u) => matches!(u.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Persona 名称规则：trim 后非空且不等于保留名
pub fn persona_name(raw: &str) -> Result<&str, ForumError> {
    let name = trimmed(raw).ok_or(ForumError::NameRequired)?;
    if name == RESERVED_PERSONA_NAME {
        return Err(ForumError::NameReserved);
    }
    Ok(name)
}

/// 可选 URL 字段：空白等同于未提供，非法格式报给定错误
pub fn optional_url<'a>(
    raw: Option<&'a str>,
    invalid: ForumError,
) -> Result<Option<&'a str>, ForumError> {
    match raw.and_then(trimmed) {
        None => Ok(None),
        Some(u) if is_http_url(u) => Ok(Some(u)),
        Some(_) => Err(invalid),
    }
}
