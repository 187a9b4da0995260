// ── Multi-ID execution ──
//
// `show 1 2 3`, `update 4 5`, `delete 6 7`: every ID is attempted in order,
// a failure on one never stops the rest. Failures are collected for the
// caller to report as warnings.

use std::future::Future;

use crate::error::CoreError;

/// Result of running one operation over several IDs.
#[derive(Debug)]
pub struct BulkOutcome<T> {
    pub items: Vec<T>,
    pub failures: Vec<CoreError>,
}

impl<T> Default for BulkOutcome<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BulkOutcome<T> {
    pub fn requested(&self) -> usize {
        self.items.len() + self.failures.len()
    }

    /// At least one ID was requested and none of them succeeded.
    pub fn all_failed(&self) -> bool {
        self.items.is_empty() && !self.failures.is_empty()
    }

    pub fn record(&mut self, result: Result<T, CoreError>) {
        match result {
            Ok(item) => self.items.push(item),
            Err(e) => self.failures.push(e),
        }
    }
}

/// Run `op` for every ID sequentially, collecting successes and failures.
pub async fn for_each_id<I, T, F, Fut>(ids: &[I], mut op: F) -> BulkOutcome<T>
where
    F: FnMut(&I) -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let mut outcome = BulkOutcome::default();
    for id in ids {
        let result = op(id).await;
        if let Err(ref e) = result {
            tracing::debug!(error = %e, "bulk item failed");
        }
        outcome.record(result);
    }
    outcome
}

/// Parse a numeric resource ID given on the command line.
pub fn parse_id(raw: &str) -> Result<i32, CoreError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| CoreError::validation("id", format!("'{raw}' is not a valid numeric ID")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn failures_do_not_stop_later_ids() {
        let ids = vec!["1".to_string(), "x".to_string(), "3".to_string()];
        let mut seen = Vec::new();

        let outcome = for_each_id(&ids, |raw| {
            let parsed = parse_id(raw);
            if let Ok(id) = parsed {
                seen.push(id);
            }
            async move { parsed.map(|id| id * 10) }
        })
        .await;

        assert_eq!(seen, vec![1, 3]);
        assert_eq!(outcome.items, vec![10, 30]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.requested(), 3);
        assert!(!outcome.all_failed());
    }

    #[tokio::test]
    async fn all_failed_needs_at_least_one_request() {
        let empty: BulkOutcome<i32> = for_each_id(&Vec::<i32>::new(), |_| async {
            Ok::<i32, CoreError>(0)
        })
        .await;
        assert!(!empty.all_failed());

        let failed: BulkOutcome<i32> = for_each_id(&["a".to_string()], |raw| {
            let parsed = parse_id(raw);
            async move { parsed }
        })
        .await;
        assert!(failed.all_failed());
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id(" 42 ").unwrap(), 42);
        assert!(matches!(
            parse_id("abc"),
            Err(CoreError::Validation { ref field, .. }) if field == "id"
        ));
    }
}
