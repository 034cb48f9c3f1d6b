//! Prompt builder: fixed instruction template around question and context.

/// Separator placed between passages in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Joins passages into one block separated by blank lines.
pub fn join_context<S: AsRef<str>>(passages: &[S]) -> String {
    passages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Builds the single-turn prompt sent to the generation service.
///
/// Deterministic: the same question and passages always give the same text.
/// An empty passage list leaves the context section blank.
///
/// # Example
/// ```
/// use contextor::prompt::build_prompt;
/// let p = build_prompt("Why?", &["Because."]);
/// assert!(p.ends_with("Question:\nWhy?\n\nAnswer:"));
/// ```
pub fn build_prompt<S: AsRef<str>>(question: &str, passages: &[S]) -> String {
    let context = join_context(passages);
    format!(
        "You are a helpful AI assistant. Use the context below to answer the user's question.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question:\n\
         {question}\n\
         \n\
         Answer:"
    )
}
