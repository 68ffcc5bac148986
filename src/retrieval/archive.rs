//! Archive encoding detection for downloaded sources

/// Compression or container encoding recognised from leading magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveEncoding {
    Gzip,
    Bzip2,
    Xz,
    Zstd,
    Zip,
}

impl ArchiveEncoding {
    const SIGNATURES: [(&'static [u8], ArchiveEncoding); 5] = [
        (&[0x1f, 0x8b], ArchiveEncoding::Gzip),
        (b"BZh", ArchiveEncoding::Bzip2),
        (&[0xfd, b'7', b'z', b'X', b'Z', 0x00], ArchiveEncoding::Xz),
        (&[0x28, 0xb5, 0x2f, 0xfd], ArchiveEncoding::Zstd),
        (b"PK\x03\x04", ArchiveEncoding::Zip),
    ];

    /// Longest magic prefix needed to make a decision
    pub const SNIFF_LEN: usize = 6;

    /// Identify the encoding from the first bytes of a body
    pub fn sniff(header: &[u8]) -> Option<Self> {
        Self::SIGNATURES
            .iter()
            .find(|(magic, _)| header.starts_with(magic))
            .map(|(_, encoding)| *encoding)
    }
}
