/// File extensions that never hold readable page content
///
/// Archives, executables and disk images, audio/video, images, fonts and PDFs.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    // Documents
    ".pdf",
    // Archives
    ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".rar", ".7z",
    // Executables and disk images
    ".exe", ".msi", ".dmg", ".iso", ".bin", ".apk", ".deb", ".rpm",
    // Audio and video
    ".mp3", ".mp4", ".avi", ".mov", ".wav", ".webm", ".ogg", ".flac", ".mkv",
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".bmp", ".tiff",
    // Fonts
    ".woff", ".woff2", ".ttf", ".eot", ".otf",
];

/// Returns true if the URL path ends in a denylisted extension
///
/// Matching is case-insensitive and looks only at the path, so a query string
/// such as `?format=pdf` does not trigger it.
///
/// # Examples
///
/// ```
/// use ripple_crawl::policy::has_excluded_extension;
///
/// assert!(has_excluded_extension("/docs/report.PDF"));
/// assert!(!has_excluded_extension("/docs/report"));
/// ```
pub fn has_excluded_extension(path: &str) -> bool {
    let lower = path.to_lowercase();
    EXCLUDED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
