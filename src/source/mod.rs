pub mod cache;
pub mod fetcher;

pub use cache::*;
pub use fetcher::*;

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::parser::{parse_form, Form};

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Where a questionnaire export lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormLocator {
    Url(String),
    Path(PathBuf),
}

impl FormLocator {
    pub fn parse(locator: &str) -> Result<Self> {
        let locator = locator.trim();
        if locator.is_empty() {
            bail!("A form locator (URL or file path) is required");
        }

        if locator.starts_with("http://") || locator.starts_with("https://") {
            Ok(FormLocator::Url(locator.to_string()))
        } else {
            Ok(FormLocator::Path(PathBuf::from(locator)))
        }
    }
}

impl std::fmt::Display for FormLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormLocator::Url(url) => write!(f, "{}", url),
            FormLocator::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolves locators into parsed forms, fetching and caching as needed
pub struct FormSource<F: FormFetcher> {
    fetcher: F,
    cache: Option<FormCache>,
    max_payload_bytes: u64,
}

impl<F: FormFetcher> FormSource<F> {
    /// Upper bound on a decompressed export
    pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 16 * 1024 * 1024;

    pub fn new(fetcher: F, cache: Option<FormCache>) -> Self {
        Self {
            fetcher,
            cache,
            max_payload_bytes: Self::DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }

    pub fn with_max_payload_bytes(mut self, limit: u64) -> Self {
        self.max_payload_bytes = limit;
        self
    }

    pub fn load(&self, locator: &FormLocator) -> Result<Form> {
        match locator {
            FormLocator::Path(path) => {
                debug!(path = %path.display(), "reading questionnaire file");
                let bytes = fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let json = decompress_if_needed(bytes, &path.to_string_lossy(), self.max_payload_bytes)?;
                parse_json(&json, locator)
            }
            FormLocator::Url(url) => {
                if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.load(url)) {
                    match parse_form(&cached) {
                        Ok(form) => return Ok(form),
                        Err(err) => {
                            debug!(url = %url, "ignoring unreadable cache entry: {:#}", err)
                        }
                    }
                }

                let json = decompress_if_needed(self.fetcher.fetch(url)?, url, self.max_payload_bytes)?;
                let form = parse_json(&json, locator)?;

                // Only payloads that parsed are worth keeping
                if let Some(cache) = &self.cache {
                    if let Err(err) = cache.store(url, &json) {
                        warn!("Could not cache {}: {:#}", url, err);
                    }
                }

                Ok(form)
            }
        }
    }
}

fn parse_json(json: &[u8], locator: &FormLocator) -> Result<Form> {
    parse_form(json).with_context(|| format!("Invalid questionnaire at {}", locator))
}

fn decompress_if_needed(bytes: Vec<u8>, origin: &str, limit: u64) -> Result<Vec<u8>> {
    if !origin.ends_with(".zst") && !bytes.starts_with(&ZSTD_MAGIC) {
        return Ok(bytes);
    }

    debug!(origin, limit, "decompressing zstd payload");
    let decoder = zstd::Decoder::new(bytes.as_slice())
        .with_context(|| format!("Failed to decompress zstd data from {}", origin))?;

    // One byte past the limit is enough to tell an oversized payload apart
    let mut json = Vec::new();
    decoder
        .take(limit.saturating_add(1))
        .read_to_end(&mut json)
        .with_context(|| format!("Failed to decompress zstd data from {}", origin))?;

    if json.len() as u64 > limit {
        bail!(
            "Decompressed payload from {} exceeds {} bytes",
            origin,
            limit
        );
    }

    Ok(json)
}
