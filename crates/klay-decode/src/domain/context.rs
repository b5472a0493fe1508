//! Decode context shared by every decoder.

use crate::config::DecoderConfig;
use crate::ports::outbound::{NoRlpKeyDecoder, RlpKeyDecoder};

static STANDARD_CONFIG: DecoderConfig = DecoderConfig::standard();
static NO_RLP: NoRlpKeyDecoder = NoRlpKeyDecoder;

/// Configuration plus the RLP key collaborator, borrowed for one decode call.
#[derive(Clone, Copy)]
pub struct DecodeContext<'a> {
    pub config: &'a DecoderConfig,
    pub rlp_keys: &'a dyn RlpKeyDecoder,
}

impl<'a> DecodeContext<'a> {
    pub fn new(config: &'a DecoderConfig, rlp_keys: &'a dyn RlpKeyDecoder) -> Self {
        Self { config, rlp_keys }
    }
}

impl DecodeContext<'static> {
    /// Default configuration, no RLP collaborator.
    pub fn standard() -> Self {
        Self {
            config: &STANDARD_CONFIG,
            rlp_keys: &NO_RLP,
        }
    }
}

impl std::fmt::Debug for DecodeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
