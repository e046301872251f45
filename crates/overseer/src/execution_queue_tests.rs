use super::*;

#[test]
fn push_returns_one_based_position() {
    let queue = ExecutionQueue::new();
    assert_eq!(queue.push("req-1".to_string()), 1);
    assert_eq!(queue.push("req-2".to_string()), 2);
}

#[test]
fn try_pop_is_fifo() {
    let queue = ExecutionQueue::new();
    queue.push("req-1".to_string());
    queue.push("req-2".to_string());
    assert_eq!(queue.try_pop(), Some("req-1".to_string()));
    assert_eq!(queue.try_pop(), Some("req-2".to_string()));
    assert_eq!(queue.try_pop(), None);
}

#[tokio::test(start_paused = true)]
async fn pop_waits_until_an_item_is_pushed() {
    let queue = std::sync::Arc::new(ExecutionQueue::new());
    let waiter = queue.clone();
    let handle = tokio::spawn(async move { waiter.pop().await });

    tokio::time::sleep(std::time::Duration::from_millis(250)).await;
    queue.push("req-late".to_string());

    let popped = handle.await.unwrap();
    assert_eq!(popped, "req-late");
}

#[test]
fn is_empty_reflects_queue_state() {
    let queue = ExecutionQueue::new();
    assert!(queue.is_empty());
    queue.push("req-1".to_string());
    assert!(!queue.is_empty());
    assert_eq!(queue.len(), 1);
}
