use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::Path;

const SAMPLE_BYTES: usize = 64 * 1024;

/// Decoded view of one file. `text` is empty for binary files.
#[derive(Debug)]
pub struct FileContent {
    pub mime: &'static str,
    pub encoding: &'static Encoding,
    pub text: String,
}

impl FileContent {
    pub fn is_binary(&self) -> bool {
        !self.mime.starts_with("text/")
    }
}

pub fn read_file(path: &Path) -> std::io::Result<FileContent> {
    let bytes = fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

pub fn decode_bytes(bytes: &[u8]) -> FileContent {
    let sample = &bytes[..bytes.len().min(SAMPLE_BYTES)];
    let mime = sniff_mime(sample);
    if !mime.starts_with("text/") {
        return FileContent {
            mime,
            encoding: UTF_8,
            text: String::new(),
        };
    }

    let encoding = detect_encoding(sample);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced undecodable bytes");
    }

    FileContent {
        mime,
        encoding,
        text: text.into_owned(),
    }
}

/// A byte-order mark means text. Then magic numbers; NUL bytes mark
/// anything else as opaque data.
pub fn sniff_mime(sample: &[u8]) -> &'static str {
    if sample.is_empty() {
        return "inode/x-empty";
    }
    if Encoding::for_bom(sample).is_some() {
        return "text/plain";
    }
    if let Some(kind) = infer::get(sample) {
        return kind.mime_type();
    }
    if sample.contains(&0) {
        return "application/octet-stream";
    }
    "text/plain"
}

pub fn detect_encoding(sample: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return encoding;
    }
    if sample.is_empty() || std::str::from_utf8(sample).is_ok() {
        return UTF_8;
    }
    // A cut in the middle of a multi-byte sequence at the sample boundary
    // should not push the guess away from UTF-8.
    if sample.len() == SAMPLE_BYTES {
        if let Err(e) = std::str::from_utf8(sample) {
            if e.error_len().is_none() {
                return UTF_8;
            }
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    detector.guess(None, true)
}
