//! PDF header sniffing.
//!
//! Rejects non-PDF input before the document decoder runs, and surfaces the
//! declared version so callers can log or gate on it.

use std::fmt;

use crate::error::{Error, Result};

const MAGIC: &[u8] = b"%PDF-";

/// The version declared in a document's `%PDF-x.y` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfFormat {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PDF {}.{}", self.major, self.minor)
    }
}

/// Parse and validate the header of a PDF byte stream.
///
/// Returns [`Error::UnknownFormat`] when the magic bytes or version digits
/// are missing, and [`Error::UnsupportedVersion`] for a well-formed header
/// outside the PDF 1.x/2.x range.
pub fn sniff_header(data: &[u8]) -> Result<PdfFormat> {
    let rest = data.strip_prefix(MAGIC).ok_or(Error::UnknownFormat)?;
    let &[major, b'.', minor, ..] = rest else {
        return Err(Error::UnknownFormat);
    };
    if !major.is_ascii_digit() || !minor.is_ascii_digit() {
        return Err(Error::UnknownFormat);
    }

    let format = PdfFormat {
        major: major - b'0',
        minor: minor - b'0',
    };
    if format.major == 0 || format.major > 2 {
        return Err(Error::UnsupportedVersion(format.to_string()));
    }
    Ok(format)
}
