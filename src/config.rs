//! Encoder and decoder settings.

/// Settings for an [`Encoder`](crate::encoding::Encoder).
///
/// The optimization switches only change which encodings the encoder chooses; every
/// combination produces a stream any decoder can read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EncoderConfig {
    /// Prefix output with the `jk!` magic (default: `true`).
    pub header: bool,
    /// Try the row-column swapped encoding for arrays of maps (default: `true`).
    pub transpose: bool,
    /// Replace repeated text and blobs with back-references (default: `true`).
    pub dedupe: bool,
    /// Replace integers with their difference to the previous one (default: `true`).
    pub delta: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            header: true,
            transpose: true,
            dedupe: true,
            delta: true,
        }
    }
}

impl EncoderConfig {
    pub fn with_header(self, header: bool) -> Self { EncoderConfig { header, ..self } }

    pub fn with_transpose(self, transpose: bool) -> Self { EncoderConfig { transpose, ..self } }

    pub fn with_dedupe(self, dedupe: bool) -> Self { EncoderConfig { dedupe, ..self } }

    pub fn with_delta(self, delta: bool) -> Self { EncoderConfig { delta, ..self } }

    /// A configuration with every optimization turned off.
    pub fn plain() -> Self {
        EncoderConfig {
            header: true,
            transpose: false,
            dedupe: false,
            delta: false,
        }
    }
}

/// Settings for a [`Decoder`](crate::encoding::Decoder).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DecoderConfig {
    /// Detect and skip a leading `jk!` magic (default: `true`). When `false` the whole
    /// buffer is treated as values.
    pub header: bool,
    /// Maximum nesting of containers and directives (default: 128, the recursion limit
    /// `serde_json` uses).
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            header: true,
            max_depth: 128,
        }
    }
}

impl DecoderConfig {
    pub fn with_header(self, header: bool) -> Self { DecoderConfig { header, ..self } }

    pub fn with_max_depth(self, max_depth: usize) -> Self { DecoderConfig { max_depth, ..self } }
}
