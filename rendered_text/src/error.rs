// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for parsing, layout and element operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus, when relevant, the byte offset
/// into the source markup at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    offset: Option<usize>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the source markup, for parse errors.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub(crate) fn unterminated_tag(offset: usize) -> Self {
        Self {
            kind: ErrorKind::UnterminatedTag,
            offset: Some(offset),
        }
    }

    pub(crate) fn too_many_elements(offset: usize) -> Self {
        Self {
            kind: ErrorKind::TooManyElements,
            offset: Some(offset),
        }
    }

    pub(crate) fn missing_font() -> Self {
        Self {
            kind: ErrorKind::MissingFont,
            offset: None,
        }
    }

    pub(crate) fn negative_area_width() -> Self {
        Self {
            kind: ErrorKind::NegativeAreaWidth,
            offset: None,
        }
    }

    pub(crate) fn invalid_operation() -> Self {
        Self {
            kind: ErrorKind::InvalidOperation,
            offset: None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.kind, self.offset) {
            (ErrorKind::UnterminatedTag, Some(offset)) => {
                write!(f, "unterminated tag starting at byte {offset}")
            }
            (ErrorKind::UnterminatedTag, None) => write!(f, "unterminated tag"),
            (ErrorKind::TooManyElements, _) => write!(
                f,
                "element table overflow: more than {} elements",
                crate::MAX_ELEMENTS
            ),
            (ErrorKind::MissingFont, _) => {
                write!(f, "text requires a font but no default font was supplied")
            }
            (ErrorKind::NegativeAreaWidth, _) => write!(f, "area width must not be negative"),
            (ErrorKind::InvalidOperation, _) => {
                write!(f, "operation is not supported by this element kind")
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A tag was opened but never closed before the end of input.
    UnterminatedTag,

    /// The markup produced more elements than a glyph can address.
    TooManyElements,

    /// A style has no explicit font and no default font was supplied.
    MissingFont,

    /// A negative width was passed to a formatting call.
    NegativeAreaWidth,

    /// The element kind does not support the requested structural change.
    InvalidOperation,
}
