use voxpad_core::error::Result;
use voxpad_core::types::Locale;

/// Service for converting text to audible speech.
///
/// Implementations wrap one text-to-speech engine. Both operations are
/// fire-and-forget from the caller's perspective; the engine plays audio on
/// its own schedule and at most one utterance is audible at a time.
pub trait SynthesisProvider: Send + Sync {
    fn display_name(&self) -> &'static str;

    /// Request that `text` be spoken in the voice for `locale`.
    fn speak(&self, text: &str, locale: Locale) -> Result<()>;

    /// Stop any currently-audible utterance.
    fn cancel_all(&self) -> Result<()>;
}
