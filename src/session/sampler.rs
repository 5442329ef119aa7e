use std::sync::Arc;

use crate::foundation::core::Rgb8;

/// Why a pixel sample produced no color. None of these are fatal to a session.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// The platform has no pixel sampler.
    #[error("pixel sampling is not supported on this platform")]
    Unsupported,

    /// The user dismissed the sampler.
    #[error("pixel sampling was cancelled")]
    Cancelled,

    /// The sampler reported an error.
    #[error("pixel sampling failed: {0}")]
    Failed(String),
}

/// Eyedropper-style capability returning a color picked outside the canvas.
///
/// `sample` may block until the user picks; sessions call it off the owner thread.
pub trait PixelSampler: Send + Sync {
    /// Wait for the user to pick a pixel.
    fn sample(&self) -> Result<Rgb8, SampleError>;
}

impl<F> PixelSampler for F
where
    F: Fn() -> Result<Rgb8, SampleError> + Send + Sync,
{
    fn sample(&self) -> Result<Rgb8, SampleError> {
        self()
    }
}

/// Whether the host offers a pixel sampler. Queried once when a session is built.
#[derive(Clone, Default)]
pub enum SamplerCapability {
    /// Sampler present.
    Available(Arc<dyn PixelSampler>),
    /// No sampler on this platform.
    #[default]
    Unavailable,
}

impl SamplerCapability {
    /// Wrap a sampler implementation.
    pub fn available(sampler: impl PixelSampler + 'static) -> Self {
        Self::Available(Arc::new(sampler))
    }

    /// Whether sampling can be attempted at all.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Debug for SamplerCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available"),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Which color input a sample feeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    /// CTA button fill.
    #[default]
    Cta,
    /// Background fill.
    Background,
}

/// Handle for an in-flight sample.
///
/// Carries the request sequence and the target's revision at request time so late results
/// can be recognised and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleTicket {
    pub(crate) seq: u64,
    pub(crate) target: ColorTarget,
    pub(crate) target_revision: u64,
}

impl SampleTicket {
    /// Color input this sample will feed.
    pub fn target(&self) -> ColorTarget {
        self.target
    }
}

/// What happened to a completed sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Color applied to its target and recorded in history.
    Applied(Rgb8),
    /// Superseded by a newer request or a later user edit; nothing changed.
    Stale,
    /// Sampler failed or was cancelled; nothing changed.
    Failed(SampleError),
}

#[cfg(test)]
#[path = "../../tests/unit/session/sampler.rs"]
mod tests;
