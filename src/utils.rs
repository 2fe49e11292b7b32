/// Request value helpers / 请求参数工具

/// Parse a form/query flag: `true` (any case) or `1` / 解析布尔参数
pub fn str2bool(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}
