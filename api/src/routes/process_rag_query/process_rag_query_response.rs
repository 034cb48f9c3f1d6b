use serde::Serialize;

/// Success body for `/process_rag_query`.
#[derive(Debug, Serialize)]
pub struct ProcessRagQueryResponse {
    /// The question as received.
    pub question: String,
    /// Passages given to the model, most relevant first.
    pub context_used: Vec<String>,
    /// Trimmed model answer.
    pub answer: String,
}
