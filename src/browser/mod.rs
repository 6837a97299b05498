use anyhow::{Context, Result};
use std::path::Path;

/// Open a URL in the user's default browser
///
/// # Arguments
/// * `url` - The URL to open (e.g., a hosted results page)
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url)
        .with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}

/// Open a local HTML file in the default browser
pub fn open_file(path: &Path) -> Result<()> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    open_url(&file_url(&absolute))
}

fn file_url(absolute: &Path) -> String {
    let path = absolute.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}
