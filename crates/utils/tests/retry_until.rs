//! Validation predicates and unbounded budgets.

use futures::FutureExt;
use rand::Rng;
use reattempt_utils::resilience::{
    create_retry, fibonacci_delay, jitter, linear_delay, FibonacciDelayOptions, JitterSource,
    LinearDelayOptions, RetryOptions,
};
use std::convert::Infallible;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[tokio::test(start_paused = true)]
async fn test_unbounded_resolves_once_until_passes() {
    let retry = create_retry(RetryOptions::new().unbounded());

    let value = retry
        .run_with(
            || async { Ok::<f64, Infallible>(rand::thread_rng().gen::<f64>()) },
            RetryOptions::new().until(|result: &f64| *result > 0.9),
        )
        .await
        .unwrap();

    assert!(value > 0.9);
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_outlasts_any_fixed_budget() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();
    let retry = create_retry(RetryOptions::new().unbounded().delay_ms(1));

    let value = retry
        .run(move || {
            let count = counter_clone.fetch_add(1, Ordering::SeqCst);
            async move {
                if count < 250 {
                    Err("not ready")
                } else {
                    Ok(count)
                }
            }
        })
        .await
        .unwrap();

    assert_eq!(value, 250);
    assert_eq!(counter.load(Ordering::SeqCst), 251);
}

#[tokio::test(start_paused = true)]
async fn test_async_until_is_awaited() {
    let counter = AtomicU32::new(0);
    let value = create_retry(RetryOptions::new().no_delay())
        .run_with(
            || {
                let count = counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, Infallible>(count) }
            },
            RetryOptions::new().until_async(|value: &u32| {
                let value = *value;
                async move {
                    tokio::task::yield_now().await;
                    value == 2
                }
                .boxed()
            }),
        )
        .await
        .unwrap();

    assert_eq!(value, 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_calls_do_not_share_context() {
    let retry = create_retry(
        RetryOptions::new()
            .times(10)
            .delay_strategy(jitter(JitterSource::Strategy(linear_delay(
                LinearDelayOptions::default(),
            )))),
    );

    let mut handles = Vec::new();
    for target in 0..8u32 {
        let retry = retry.clone();
        handles.push(tokio::spawn(async move {
            let calls = AtomicU32::new(0);
            retry
                .run(|| {
                    let call = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if call < target {
                            Err("again")
                        } else {
                            Ok(call)
                        }
                    }
                })
                .await
        }));
    }

    for (target, handle) in handles.into_iter().enumerate() {
        let value = handle.await.unwrap().unwrap();
        assert_eq!(value, target as u32);
    }
}

#[tokio::test(start_paused = true)]
async fn test_fibonacci_delay_drives_waits() {
    let start = tokio::time::Instant::now();
    let counter = AtomicU32::new(0);

    let value = create_retry(
        RetryOptions::new().delay_strategy(fibonacci_delay(FibonacciDelayOptions {
            scale: Some(10),
            ..Default::default()
        })),
    )
    .run(|| {
        let call = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if call < 3 {
                Err("down")
            } else {
                Ok(call)
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(value, 3);
    // 10 + 20 + 30
    let elapsed = start.elapsed().as_millis();
    assert!((60..70).contains(&elapsed), "elapsed {elapsed}ms");
}
