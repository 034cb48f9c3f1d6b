//! Context providers: query + count in, ordered passages out.
//!
//! The only implementation today is [`StaticContextProvider`], which serves a
//! fixed pool of contract clauses regardless of the query. A search-backed
//! provider can replace it behind the same trait without touching callers.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ContextorError;

/// Fixed clause pool served by [`StaticContextProvider`], in relevance order.
pub const CONTRACT_CLAUSES: [&str; 3] = [
    "Clause: Payment terms are net-30 from invoice date.",
    "Clause: Client agrees to pay within 30 days of receipt of invoice.",
    "Clause: Late payments incur a 5% fee after 30 days.",
];

/// Supplies up to `top_k` passages for a query, most relevant first.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Returns at most `top_k` passages. `top_k == 0` yields an empty list.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, ContextorError>;
}

/// Query-independent provider over a fixed, ordered pool.
#[derive(Clone, Debug)]
pub struct StaticContextProvider {
    pool: Vec<String>,
}

impl StaticContextProvider {
    /// Provider over an arbitrary pool.
    pub fn new<I, S>(pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pool: pool.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for StaticContextProvider {
    /// Provider over [`CONTRACT_CLAUSES`].
    fn default() -> Self {
        Self::new(CONTRACT_CLAUSES)
    }
}

#[async_trait]
impl ContextProvider for StaticContextProvider {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, ContextorError> {
        let take = top_k.min(self.pool.len());
        debug!(
            query_len = query.len(),
            top_k,
            returned = take,
            "static context provider"
        );
        Ok(self.pool[..take].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_prefix_of_pool() {
        let p = StaticContextProvider::default();
        let two = p.retrieve("When is payment due?", 2).await.unwrap();
        assert_eq!(two, CONTRACT_CLAUSES[..2].to_vec());
    }

    #[tokio::test]
    async fn zero_yields_empty() {
        let p = StaticContextProvider::default();
        assert!(p.retrieve("anything", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_request_returns_whole_pool() {
        let p = StaticContextProvider::default();
        let all = p.retrieve("anything", 50).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all, CONTRACT_CLAUSES.to_vec());
    }

    #[tokio::test]
    async fn ignores_query_text() {
        let p = StaticContextProvider::default();
        let a = p.retrieve("late fees?", 3).await.unwrap();
        let b = p.retrieve("something else entirely", 3).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn custom_pool() {
        let p = StaticContextProvider::new(["a", "b"]);
        assert_eq!(p.retrieve("q", 1).await.unwrap(), vec!["a".to_string()]);
        assert_eq!(p.retrieve("q", 5).await.unwrap().len(), 2);
    }
}
