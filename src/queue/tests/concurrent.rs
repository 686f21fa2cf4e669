//! Tests for concurrent producers and consumers

#[cfg(test)]
mod tests {
    use crate::queue::api::{WorkQueue, Worker};
    use crate::queue::tests::{within, COMPLETES_WITHIN, STAYS_BLOCKED_FOR};
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc, Mutex};
    use std::thread;
    use std::time::Duration;
    use tokio::task::JoinSet;

    #[test]
    fn test_blocked_consumer_woken_by_add() {
        let queue = Arc::new(WorkQueue::new());
        let (tx, rx) = mpsc::channel();

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let _ = tx.send(queue.get());
            })
        };

        assert!(rx.recv_timeout(STAYS_BLOCKED_FOR).is_err());
        queue.add(5);

        assert_eq!(rx.recv_timeout(COMPLETES_WITHIN).unwrap(), Some(5));
        consumer.join().unwrap();
    }

    #[test]
    fn test_each_add_wakes_a_consumer() {
        let queue = Arc::new(WorkQueue::new());
        let (tx, rx) = mpsc::channel();

        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let tx = tx.clone();
                thread::spawn(move || {
                    if let Some(item) = queue.get() {
                        let _ = tx.send(item);
                    }
                })
            })
            .collect();
        drop(tx);

        thread::sleep(STAYS_BLOCKED_FOR);
        for i in 0..3 {
            queue.add(i);
        }

        let mut received: Vec<i32> = (0..3)
            .map(|_| rx.recv_timeout(COMPLETES_WITHIN).unwrap())
            .collect();
        received.sort_unstable();
        assert_eq!(received, vec![0, 1, 2]);

        for consumer in consumers {
            consumer.join().unwrap();
        }
    }

    #[test]
    fn test_multiple_producers_and_consumers_deliver_every_item_once() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 250;

        let queue = Arc::new(WorkQueue::named("stress"));

        let consumers: Vec<_> = (0..4)
            .map(|id| {
                Worker::new(format!("consumer-{}", id), Arc::clone(&queue))
                    .spawn(|_item: &usize| -> Result<(), String> { Ok(()) })
                    .unwrap()
            })
            .collect();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        queue.add(p * PER_PRODUCER + i);
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        let drainer = Arc::clone(&queue);
        within(COMPLETES_WITHIN, move || drainer.shut_down_with_drain());

        let processed: usize = consumers
            .into_iter()
            .map(|c| c.join().unwrap().processed)
            .sum();
        assert_eq!(processed, PRODUCERS * PER_PRODUCER);
    }

    #[test]
    fn test_item_never_processed_concurrently() {
        let queue = Arc::new(WorkQueue::new());
        let in_flight = Arc::new(Mutex::new(HashSet::new()));
        let overlaps = Arc::new(AtomicUsize::new(0));
        let deliveries = Arc::new(Mutex::new(HashMap::new()));

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let in_flight = Arc::clone(&in_flight);
                let overlaps = Arc::clone(&overlaps);
                let deliveries = Arc::clone(&deliveries);
                thread::spawn(move || {
                    while let Some(item) = queue.get() {
                        if !in_flight.lock().unwrap().insert(item) {
                            overlaps.fetch_add(1, Ordering::SeqCst);
                        }
                        *deliveries.lock().unwrap().entry(item).or_insert(0usize) += 1;
                        thread::sleep(Duration::from_micros(50));
                        in_flight.lock().unwrap().remove(&item);
                        queue.done(&item);
                    }
                })
            })
            .collect();

        // A small key space hammered by several producers forces re-adds
        // while the same key is being processed
        let producers: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for round in 0..500 {
                        queue.add(round % 5);
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        let drainer = Arc::clone(&queue);
        within(COMPLETES_WITHIN, move || drainer.shut_down_with_drain());
        for consumer in consumers {
            consumer.join().unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
        let deliveries = deliveries.lock().unwrap();
        // Every key was seen, and duplicates collapsed well below the add count
        assert_eq!(deliveries.len(), 5);
        let total: usize = deliveries.values().sum();
        assert!(total <= 1500, "got {} deliveries for 1500 adds", total);
    }

    #[test]
    fn test_add_after_last_done_is_not_lost() {
        // Repeatedly race a re-add against done; the item must always be
        // delivered again
        for _ in 0..200 {
            let queue = Arc::new(WorkQueue::new());
            queue.add(1);
            let item = queue.get().unwrap();

            let adder = {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.add(1))
            };
            queue.done(&item);
            adder.join().unwrap();

            assert_eq!(queue.len(), 1);
            assert_eq!(queue.stats().processing, 0);
        }
    }

    #[tokio::test]
    async fn test_consumers_on_blocking_tasks() {
        let queue = Arc::new(WorkQueue::named("tokio"));
        let mut tasks = JoinSet::new();

        for _ in 0..3 {
            let queue = Arc::clone(&queue);
            tasks.spawn_blocking(move || {
                let mut handled = 0;
                while let Some(item) = queue.get_guarded() {
                    assert!(*item < 100);
                    handled += 1;
                }
                handled
            });
        }

        for i in 0..100u32 {
            queue.add(i);
        }
        let drainer = Arc::clone(&queue);
        tokio::task::spawn_blocking(move || drainer.shut_down_with_drain())
            .await
            .unwrap();

        let mut total = 0;
        while let Some(result) = tasks.join_next().await {
            total += result.unwrap();
        }
        assert_eq!(total, 100);
    }
}
