//! Bounded-concurrency mapping over async fallible operations.
//!
//! Backend stores tolerate only a limited number of simultaneous search or
//! delete calls, so fan-out always goes through [`try_map_bounded`] instead
//! of joining an unbounded set of futures.

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};

/// Ceiling for simultaneous in-flight calls against a backend store.
pub const MAX_CONCURRENT_OPERATIONS: usize = 10;

/// Applies `f` to every item with at most `limit` invocations in flight.
///
/// Items are started in input order as slots free up; outputs are collected
/// in completion order. Every item is processed exactly once unless a
/// mapped call fails: the first error is returned, in-flight calls are
/// cancelled by drop, and items not yet started are never started.
///
/// A `limit` of zero is treated as one.
pub async fn try_map_bounded<I, T, F, Fut, U, E>(items: I, limit: usize, f: F) -> Result<Vec<U>, E>
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
{
    stream::iter(items.into_iter().map(f))
        .buffer_unordered(limit.max(1))
        .try_collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Tracks the number of concurrently running calls and the high-water
    /// mark they reach.
    #[derive(Default)]
    struct InFlight {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl InFlight {
        fn enter(&self) {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
        }

        fn exit(&self) {
            self.current.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_limit() {
        let in_flight = Arc::new(InFlight::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let result = try_map_bounded(0..25, 4, |n: usize| {
            let in_flight = Arc::clone(&in_flight);
            let calls = Arc::clone(&calls);
            async move {
                in_flight.enter();
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.exit();
                Ok::<_, String>(n)
            }
        })
        .await
        .unwrap();

        assert_eq!(result.len(), 25);
        assert_eq!(calls.load(Ordering::SeqCst), 25);
        assert!(in_flight.peak.load(Ordering::SeqCst) <= 4);
        // With 25 items and 4 slots the pool should actually fill up.
        assert_eq!(in_flight.peak.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_every_item_mapped_exactly_once() {
        let result = try_map_bounded(1..=8, 3, |n: u32| async move { Ok::<_, String>(n * 2) })
            .await
            .unwrap();

        let mut sorted = result;
        sorted.sort_unstable();
        assert_eq!(sorted, vec![2, 4, 6, 8, 10, 12, 14, 16]);
    }

    #[tokio::test]
    async fn test_first_error_propagates() {
        let started = Arc::new(AtomicUsize::new(0));

        let result = try_map_bounded(0..100, 2, |n: usize| {
            let started = Arc::clone(&started);
            async move {
                started.fetch_add(1, Ordering::SeqCst);
                if n == 3 {
                    Err(format!("item {n} failed"))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), "item 3 failed");
        // Fail-fast: nowhere near all 100 items get started.
        assert!(started.load(Ordering::SeqCst) < 100);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let result: Result<Vec<u32>, String> =
            try_map_bounded(std::iter::empty::<u32>(), 5, |n| async move { Ok(n) }).await;
        assert_eq!(result.unwrap(), Vec::<u32>::new());
    }

    #[tokio::test]
    async fn test_limit_larger_than_input() {
        let result = try_map_bounded(0..3, 64, |n: u32| async move { Ok::<_, String>(n) })
            .await
            .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_zero_limit_clamped_to_one() {
        let in_flight = Arc::new(InFlight::default());

        try_map_bounded(0..5, 0, |n: usize| {
            let in_flight = Arc::clone(&in_flight);
            async move {
                in_flight.enter();
                tokio::task::yield_now().await;
                in_flight.exit();
                Ok::<_, String>(n)
            }
        })
        .await
        .unwrap();

        assert_eq!(in_flight.peak.load(Ordering::SeqCst), 1);
    }
}
