//! Public API types re-used by external crates (e.g., the HTTP API layer).

/// Number of passages requested when the caller does not say.
pub const DEFAULT_TOP_K: usize = 3;

/// Options that control retrieval for a single question.
///
/// # Example
/// ```
/// use contextor::AskOptions;
/// assert_eq!(AskOptions::default().top_k, 3);
/// ```
#[derive(Clone, Debug)]
pub struct AskOptions {
    /// Maximum number of passages to retrieve and embed in the prompt.
    pub top_k: usize,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Final answer together with the exact passages passed to the model,
/// most relevant first.
#[derive(Clone, Debug, PartialEq)]
pub struct QaAnswer {
    pub answer: String,
    pub context: Vec<String>,
}
