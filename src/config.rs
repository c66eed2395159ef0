/// Extensions offered by the open dialog.
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg"];

/// Base name suggested by the save dialog; the extension follows the codec.
pub const SAVE_BASE_NAME: &str = "file";

/// Compile-time defaults for the window. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: &'static str,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Image Shell".to_string(),
            inner_size: [800.0, 600.0],
            min_inner_size: [320.0, 240.0],
            log_filter: if cfg!(debug_assertions) { "debug" } else { "warn" },
        }
    }
}
