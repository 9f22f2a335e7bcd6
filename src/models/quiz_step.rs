use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use log::warn;

/// Format and size read from a poster's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosterMeta {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Poster bytes attached to a question, plus their header metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Poster {
    bytes: Vec<u8>,
    meta: Option<PosterMeta>,
}

impl Poster {
    /// Only the image header is parsed; pixel data is left to the renderer.
    /// Bytes that are not a recognisable image fall back to an empty placeholder.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return Self::placeholder();
        }

        let reader = match ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format() {
            Ok(reader) => reader,
            Err(err) => {
                warn!("failed to sniff poster format: {err}");
                return Self::placeholder();
            }
        };
        let Some(format) = reader.format() else {
            warn!("poster bytes are not a known image format");
            return Self::placeholder();
        };

        match reader.into_dimensions() {
            Ok((width, height)) => Self {
                meta: Some(PosterMeta {
                    format,
                    width,
                    height,
                }),
                bytes,
            },
            Err(err) => {
                warn!("unreadable {format:?} poster header: {err}");
                Self::placeholder()
            }
        }
    }

    pub fn placeholder() -> Self {
        Self {
            bytes: Vec::new(),
            meta: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.meta.is_none()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn meta(&self) -> Option<PosterMeta> {
        self.meta
    }
}

/// Everything the display needs to render one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizStep {
    pub poster: Poster,
    pub question: String,
    pub question_number: String,
}
