/// Size requested for exported avatar and icon URLs.
pub const EXPORT_SIZE: u32 = 4096;

/// Rewrites a Discord CDN image URL to request the export size.
///
/// Any existing query string is replaced.
///
/// # Arguments
/// - `url` - Avatar or icon URL as returned by serenity
///
/// # Returns
/// - `String` - The same image at `EXPORT_SIZE`
pub fn sized(url: &str) -> String {
    let base = url.split_once('?').map_or(url, |(base, _)| base);
    format!("{}?size={}", base, EXPORT_SIZE)
}
