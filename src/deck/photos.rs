// Photo lookup for the slides.

use crate::deck::*;

/// The extensions probed for a rushee photo, in order.
pub const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// The file stem a rushee photo is expected under: lowercased, trimmed,
/// runs of whitespace replaced by single underscores.
pub fn photo_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("_")
}

/// Finds the photo for a rushee, falling back to the default image.
///
/// The lookup never fails the run. A missing default image is only reported
/// in the logs, since the deck is still usable with a broken link.
pub fn resolve_photo(image_dir: &Path, default_image: &str, name: &str) -> PathBuf {
    let key = photo_key(name);
    for ext in PHOTO_EXTENSIONS.iter() {
        let candidate = image_dir.join(format!("{}.{}", key, ext));
        if candidate.is_file() {
            debug!("resolve_photo: {:?} -> {:?}", name, candidate);
            return candidate;
        }
    }
    let fallback = image_dir.join(default_image);
    if !fallback.is_file() {
        warn!(
            "resolve_photo: no photo for {:?} and the default image {:?} is missing",
            name, fallback
        );
    }
    fallback
}
