use std::path::Path;

/// 音频格式的 MIME 覆盖表
///
/// 仅收录默认推断不可靠的格式（如 m4b 有声书容器），其他扩展名返回 None，
/// 由调用方回退到默认推断。接受带或不带前导 `.` 的扩展名，不区分大小写。
pub fn audio_mime_override(extension: &str) -> Option<&'static str> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    if ext.is_empty() {
        return None;
    }

    match ext.to_ascii_lowercase().as_str() {
        "mp3" | "mpeg" | "mpg" => Some("audio/mpeg"),
        "m4b" | "m4a" | "mp4" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        "webm" | "webma" => Some("audio/webm"),
        "mka" => Some("audio/x-matroska"),
        "awb" => Some("audio/amr-wb"),
        "caf" => Some("audio/x-caf"),
        "flac" => Some("audio/flac"),
        "opus" | "oga" | "ogg" => Some("audio/ogg"),
        "wav" => Some("audio/wav"),
        "aif" | "aiff" => Some("audio/x-aiff"),
        "wma" => Some("audio/x-ms-wma"),
        _ => None,
    }
}

/// 最终响应使用的 Content-Type：优先覆盖类型，其次按路径推断
pub fn content_type_for_path(path: &Path, override_type: Option<&'static str>) -> String {
    match override_type {
        Some(mime) => mime.to_string(),
        None => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}
