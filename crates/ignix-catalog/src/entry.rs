use serde::Deserialize;

/// File name suffix identifying catalog templates in the remote listing.
pub const TEMPLATE_SUFFIX: &str = ".gitignore";

/// One element of the remote listing endpoint's JSON response.
///
/// Unknown fields are ignored; only the shape consumed here is declared.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub name: String,
    pub path: String,
    /// Direct raw-content URL; absent for directories.
    pub download_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A selectable template, mapped from a raw listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name: the remote file name with the template suffix stripped.
    /// Never empty.
    pub label: String,
    /// Remote sub-path of the file, used as the source reference in
    /// user-facing messages.
    pub description: String,
    /// Direct download URL for the raw file content.
    pub url: String,
}

impl CatalogEntry {
    /// Maps a raw listing entry, dropping directories, names without the
    /// template suffix, and entries with no download URL.
    pub fn from_raw(raw: RawEntry) -> Option<Self> {
        if raw.kind != "file" {
            return None;
        }
        let label = raw.name.strip_suffix(TEMPLATE_SUFFIX)?.to_string();
        if label.is_empty() {
            return None;
        }
        let url = raw.download_url?;
        Some(Self {
            label,
            description: raw.path,
            url,
        })
    }
}
