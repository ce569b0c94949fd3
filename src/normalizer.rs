use tracing::debug;

/// Render a feed summary, which may be HTML, as readable plain text.
pub fn to_plain_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    match htmd::convert(raw) {
        Ok(text) => text,
        Err(e) => {
            debug!("HTML conversion failed, using raw summary: {}", e);
            raw.to_string()
        }
    }
}
