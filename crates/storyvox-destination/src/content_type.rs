const DEFAULT_EXTENSION: &str = "mp3";

/// File extension for a stored audio blob. Unknown types fall back to `mp3`.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/wave" | "audio/x-wav" => "wav",
        "audio/ogg" => "ogg",
        "audio/webm" => "webm",
        "audio/aac" => "aac",
        "audio/m4a" => "m4a",
        _ => DEFAULT_EXTENSION,
    }
}

/// Content type to serve a stored blob with.
///
/// Blobs stored before WAV wrapping may still carry a raw PCM type; when
/// requested with a `wav` extension they are served as `audio/wav`.
pub fn serve_content_type(stored: Option<&str>, extension: &str) -> String {
    let stored = stored.filter(|s| !s.is_empty());
    let content_type = match stored {
        Some(s) => s.to_string(),
        None if extension == "wav" => "audio/wav".to_string(),
        None => "audio/mpeg".to_string(),
    };

    if extension == "wav" && (content_type.contains("l16") || content_type.contains("pcm")) {
        return "audio/wav".to_string();
    }
    content_type
}
