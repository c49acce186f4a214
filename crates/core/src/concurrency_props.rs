//! Property-based tests for the bounded-concurrency mapper.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use crate::concurrency::try_map_bounded;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every item is mapped exactly once, for any input size and limit.
    #[test]
    fn prop_exactly_once(len in 0usize..48, limit in 1usize..12) {
        let rt = runtime();

        let counts: Arc<Vec<AtomicUsize>> =
            Arc::new((0..len).map(|_| AtomicUsize::new(0)).collect());

        let result = rt.block_on({
            let counts = Arc::clone(&counts);
            async move {
                try_map_bounded(0..len, limit, |i| {
                    let counts = Arc::clone(&counts);
                    async move {
                        counts[i].fetch_add(1, Ordering::SeqCst);
                        Ok::<_, String>(i)
                    }
                })
                .await
            }
        });

        let mut outputs = result.unwrap();
        outputs.sort_unstable();
        prop_assert_eq!(outputs, (0..len).collect::<Vec<_>>());
        for count in counts.iter() {
            prop_assert_eq!(count.load(Ordering::SeqCst), 1);
        }
    }

    /// A failing item always surfaces its error, regardless of limit.
    #[test]
    fn prop_failure_surfaces(len in 1usize..32, limit in 1usize..12, bad in 0usize..32) {
        let bad = bad % len;
        let rt = runtime();

        let result = rt.block_on(async move {
            try_map_bounded(0..len, limit, |i| async move {
                if i == bad { Err(format!("bad item {i}")) } else { Ok(i) }
            })
            .await
        });

        prop_assert!(result.is_err());
    }
}
