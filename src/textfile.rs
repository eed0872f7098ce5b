//! Reading and writing whole text files in the encodings that addon files come in.
//!
//! Addon localization files are usually UTF-16LE with a byte order mark, while the npc script
//! files are UTF-8 or the Windows "ANSI" code page.

use std::fs::{create_dir_all, read, write};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use walkdir::WalkDir;

/// The encoding a file was read in, and should be written back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Written with a byte order mark.
    Utf16Le,
    Utf16Be,
    /// The Windows-1252 code page. Only ever read; output in this encoding is written as UTF-8.
    Ansi,
}

impl TextEncoding {
    /// The encoding to use when writing a document derived from a file in this encoding.
    pub fn for_output(self) -> Self {
        match self {
            TextEncoding::Ansi => TextEncoding::Utf8,
            other => other,
        }
    }
}

/// Decode the bytes of a file, guessing the encoding.
///
/// A byte order mark decides it if present; otherwise UTF-8 is tried and Windows-1252 is the
/// fallback, since every byte sequence is valid in it.
pub fn decode_bytes(bytes: &[u8]) -> (String, TextEncoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let kind = if encoding == UTF_16LE {
            TextEncoding::Utf16Le
        } else if encoding == UTF_16BE {
            TextEncoding::Utf16Be
        } else {
            TextEncoding::Utf8
        };
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text.into_owned(), kind);
    }
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return (text.into_owned(), TextEncoding::Utf8);
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text.into_owned(), TextEncoding::Ansi)
}

/// Encode text for writing. UTF-16 output gets a byte order mark, UTF-8 output does not.
pub fn encode_text(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Ansi => text.as_bytes().to_vec(),
        TextEncoding::Utf16Le => {
            let mut bytes = vec![0xff, 0xfe];
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_le_bytes());
            }
            bytes
        }
        TextEncoding::Utf16Be => {
            let mut bytes = vec![0xfe, 0xff];
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
            bytes
        }
    }
}

/// The file operations the synchronization needs. Each call reads or writes a whole file.
pub trait FileAccess {
    /// Read and decode a file. Returns `Ok(None)` if the file does not exist.
    fn read_text(&self, path: &Path) -> io::Result<Option<(String, TextEncoding)>>;

    /// Replace the contents of a file, creating its directory if needed.
    fn write_text(&self, path: &Path, text: &str, encoding: TextEncoding) -> io::Result<()>;

    /// The files (not directories) directly inside a directory, sorted by name.
    /// A missing directory has no files.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// [`FileAccess`] on the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFiles;

impl FileAccess for FsFiles {
    fn read_text(&self, path: &Path) -> io::Result<Option<(String, TextEncoding)>> {
        match read(path) {
            Ok(bytes) => Ok(Some(decode_bytes(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_text(&self, path: &Path, text: &str, encoding: TextEncoding) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        write(path, encode_text(text, encoding))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// Pick the addon language files out of a directory listing.
///
/// These are the `addon_<language>.txt` files, minus the `_utf8.txt` copies this tool makes.
pub fn language_files(listing: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = listing
        .iter()
        .filter(|path| {
            let name = file_name(path);
            name.contains("addon_") && name.ends_with(".txt") && !name.ends_with("utf8.txt")
        })
        .cloned()
        .collect();
    files.sort_by(|a, b| file_name(a).cmp(&file_name(b)));
    files
}

/// The language of an addon language file, taken from the part of its name after the last `_`.
///
/// `addon_english.txt` is `english`.
pub fn language_of(path: &Path) -> String {
    let name = file_name(path);
    let name = name.strip_suffix(".txt").unwrap_or(&name);
    match name.rfind('_') {
        Some(idx) => name[idx + 1..].to_string(),
        None => name.to_string(),
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

/// [`FileAccess`] on an in-memory map of paths to file contents.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemFiles {
    files: std::cell::RefCell<std::collections::BTreeMap<PathBuf, Vec<u8>>>,
    /// Paths whose writes fail.
    read_only: std::cell::RefCell<Vec<PathBuf>>,
}

#[cfg(test)]
impl MemFiles {
    pub(crate) fn insert(&self, path: &Path, bytes: &[u8]) {
        self.files.borrow_mut().insert(path.to_path_buf(), bytes.to_vec());
    }

    pub(crate) fn insert_text(&self, path: &Path, text: &str, encoding: TextEncoding) {
        self.insert(path, &encode_text(text, encoding));
    }

    pub(crate) fn bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub(crate) fn text(&self, path: &Path) -> Option<String> {
        self.bytes(path).map(|bytes| decode_bytes(&bytes).0)
    }

    pub(crate) fn set_read_only(&self, path: &Path) {
        self.read_only.borrow_mut().push(path.to_path_buf());
    }
}

#[cfg(test)]
impl FileAccess for MemFiles {
    fn read_text(&self, path: &Path) -> io::Result<Option<(String, TextEncoding)>> {
        Ok(self.bytes(path).map(|bytes| decode_bytes(&bytes)))
    }

    fn write_text(&self, path: &Path, text: &str, encoding: TextEncoding) -> io::Result<()> {
        if self.read_only.borrow().iter().any(|p| p == path) {
            return Err(io::Error::new(ErrorKind::PermissionDenied, "read-only file"));
        }
        self.insert_text(path, text, encoding);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(self.files.borrow().keys().filter(|p| p.parent() == Some(path)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf16le_bom() {
        let bytes = encode_text("\"lang\" { \"Tokens\" { \"k\" \"é\" } }", TextEncoding::Utf16Le);
        let (text, encoding) = decode_bytes(&bytes);
        assert_eq!(encoding, TextEncoding::Utf16Le);
        assert_eq!(text, "\"lang\" { \"Tokens\" { \"k\" \"é\" } }");
    }

    #[test]
    fn test_decode_utf16be_bom() {
        let bytes = encode_text("abc", TextEncoding::Utf16Be);
        assert_eq!(decode_bytes(&bytes), ("abc".to_string(), TextEncoding::Utf16Be));
    }

    #[test]
    fn test_decode_utf8_bom_stripped() {
        let (text, encoding) = decode_bytes(b"\xef\xbb\xbfhello");
        assert_eq!(text, "hello");
        assert_eq!(encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_ansi_fallback() {
        // 0xe9 is é in Windows-1252 and invalid on its own in UTF-8
        let (text, encoding) = decode_bytes(b"caf\xe9");
        assert_eq!(text, "café");
        assert_eq!(encoding, TextEncoding::Ansi);
        assert_eq!(encoding.for_output(), TextEncoding::Utf8);
    }

    #[test]
    fn test_language_files_filter() {
        let listing: Vec<PathBuf> = [
            "resource/addon_russian.txt",
            "resource/addon_english.txt",
            "resource/addon_english_utf8.txt",
            "resource/flash3/images.txt",
            "resource/addon_english.txt.bak",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        let files = language_files(&listing);
        assert_eq!(
            files,
            vec![PathBuf::from("resource/addon_english.txt"), PathBuf::from("resource/addon_russian.txt")]
        );
    }

    #[test]
    fn test_language_of() {
        assert_eq!(language_of(Path::new("resource/addon_english.txt")), "english");
        assert_eq!(language_of(Path::new("addon_schinese.txt")), "schinese");
        assert_eq!(language_of(Path::new("plain.txt")), "plain");
    }
}
