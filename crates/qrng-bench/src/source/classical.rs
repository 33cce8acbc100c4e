//! Classical baseline: bytes from the operating system's CSPRNG.

use async_trait::async_trait;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::instrument;

use super::BitGenerator;
use crate::bits::{BitString, bytes_for_bits};
use crate::error::{GeneratorError, GeneratorResult};

pub const NAME: &str = "Classical OS";

#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalSource;

impl ClassicalSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BitGenerator for ClassicalSource {
    fn name(&self) -> &str {
        NAME
    }

    #[instrument(skip(self), fields(source = NAME))]
    async fn generate_bits(&self, num_bits: usize) -> GeneratorResult<BitString> {
        let mut bytes = vec![0u8; bytes_for_bits(num_bits)];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| GeneratorError::Entropy(e.to_string()))?;

        BitString::from_bytes(&bytes, num_bits).ok_or(GeneratorError::ShortResponse {
            expected: bytes_for_bits(num_bits),
            got: bytes.len(),
        })
    }
}
