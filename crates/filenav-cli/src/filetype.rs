//! Coarse file type classification by extension.

use std::fmt;

/// What kind of content a file holds, as far as its extension tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Image,
    Video,
    Audio,
    Archive,
    Other,
}

impl FileType {
    /// Classifies an extension, given without the leading dot. Case is ignored.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "md" | "markdown" | "rst" | "log" | "csv" | "tsv" | "json" | "toml" | "yaml"
            | "yml" | "xml" | "ini" | "cfg" | "conf" | "rs" | "py" | "js" | "ts" | "go" | "c"
            | "h" | "cpp" | "hpp" | "java" | "kt" | "sh" | "html" | "css" => Self::Text,
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "svg" | "ico" | "tiff" => {
                Self::Image
            }
            "mp4" | "mkv" | "avi" | "mov" | "webm" | "3gp" => Self::Video,
            "mp3" | "wav" | "flac" | "ogg" | "m4a" | "aac" => Self::Audio,
            "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" | "zst" => Self::Archive,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Archive => "archive",
            Self::Other => "file",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_extensions() {
        assert_eq!(FileType::from_extension("txt"), FileType::Text);
        assert_eq!(FileType::from_extension("rs"), FileType::Text);
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(FileType::from_extension("JPG"), FileType::Image);
        assert_eq!(FileType::from_extension("Mp4"), FileType::Video);
    }

    #[test]
    fn media_and_archives() {
        assert_eq!(FileType::from_extension("flac"), FileType::Audio);
        assert_eq!(FileType::from_extension("zip"), FileType::Archive);
    }

    #[test]
    fn unknown_and_missing_extension_is_other() {
        assert_eq!(FileType::from_extension("xyz"), FileType::Other);
        assert_eq!(FileType::from_extension(""), FileType::Other);
    }
}
