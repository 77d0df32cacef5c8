use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::error::ImportResult;

/// Number of leading bytes consulted for signature detection.
pub const SNIFF_LEN: usize = 261;

/// Input compression, classified from the file signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    Bzip2,
    Gzip,
    /// No recognized archive signature; treated as plain CSV.
    None,
}

/// Classify a file header by magic bytes.
pub fn classify(head: &[u8]) -> Compression {
    match infer::get(head) {
        Some(kind) if kind.mime_type() == "application/x-bzip2" => Compression::Bzip2,
        Some(kind) if kind.mime_type() == "application/gzip" => Compression::Gzip,
        _ => Compression::None,
    }
}

/// Open `path`, classify it by signature, rewind to the start, and wrap the
/// file in the matching decompressing reader.
///
/// Detection happens before any CSV parsing: read the first [`SNIFF_LEN`]
/// bytes, classify, seek back to offset 0, branch. The vendor currently
/// publishes gzip and bzip2 archives; anything else falls through as plain
/// text.
pub fn open_detected(path: &Path) -> ImportResult<Box<dyn Read>> {
    let mut file = File::open(path)?;

    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    let kind = classify(&head);
    file.seek(SeekFrom::Start(0))?;

    debug!(path = %path.display(), ?kind, "classified import input");
    Ok(match kind {
        Compression::Bzip2 => Box::new(BzDecoder::new(file)),
        Compression::Gzip => Box::new(MultiGzDecoder::new(file)),
        Compression::None => Box::new(file),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use bzip2::write::BzEncoder;
    use flate2::write::GzEncoder;

    fn gzipped(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn bzipped(data: &[u8]) -> Vec<u8> {
        let mut enc = BzEncoder::new(Vec::new(), bzip2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn classifies_gzip() {
        assert_eq!(classify(&gzipped(b"key,name\n")), Compression::Gzip);
    }

    #[test]
    fn classifies_bzip2() {
        assert_eq!(classify(&bzipped(b"key,name\n")), Compression::Bzip2);
    }

    #[test]
    fn plain_text_falls_through() {
        assert_eq!(classify(b"11111111-1111-4111-8111-111111111111,Alice\n"), Compression::None);
    }

    #[test]
    fn empty_input_falls_through() {
        assert_eq!(classify(b""), Compression::None);
    }

    #[test]
    fn detection_ignores_the_extension() {
        // A gzip archive renamed to .csv must still decompress.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renamed.csv");
        std::fs::write(&path, gzipped(b"hello")).unwrap();

        let mut reader = open_detected(&path).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn short_file_is_sniffable() {
        // Files shorter than the sniff window must not error.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.csv");
        std::fs::write(&path, b"a,b\n").unwrap();

        let mut reader = open_detected(&path).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "a,b\n");
    }
}
