//! Table queue flows through the dispatcher

use crate::fixtures::{ChatFixture, GROUP_CHAT_ID};

#[tokio::test]
async fn test_booking_order_and_views() {
    let chat = ChatFixture::new();

    assert_eq!(chat.say("x", "/queue").await, "The queue is empty.");
    assert_eq!(
        chat.say("x", "/book").await,
        "Table should be empty. You may start playing, @x"
    );
    assert_eq!(
        chat.say("x", "/queue").await,
        "Expected that x is playing now.\nThe waiting list is empty."
    );
    assert_eq!(
        chat.say("y", "/book").await,
        "Table is booked.\nExpected that x is playing now.\nThe waiting list:\ny"
    );
    chat.say("z", "/book").await;

    assert_eq!(
        chat.say("w", "/queue").await,
        "Expected that x is playing now.\nThe waiting list:\ny\nz"
    );
}

#[tokio::test]
async fn test_owner_leaving_calls_the_next_player() {
    let chat = ChatFixture::new();
    chat.say("x", "/book").await;
    let y_booking = chat.send("y", "/book").await.reply.reply_to_message_id;
    chat.say("z", "/book").await;

    let response = chat.send("x", "/leave").await;
    assert_eq!(response.reply.text, "Thanks for letting us know, @x.");

    let notification = response.notification.expect("y should be called");
    assert_eq!(notification.chat_id, GROUP_CHAT_ID);
    assert_eq!(notification.reply_to_message_id, y_booking);
    assert_eq!(notification.text, "You're the next in the queue, @y.");

    assert_eq!(
        chat.say("x", "/queue").await,
        "Expected that y is playing now.\nThe waiting list:\nz"
    );
}

#[tokio::test]
async fn test_waiter_leaving_calls_nobody() {
    let chat = ChatFixture::new();
    chat.say("x", "/book").await;
    chat.say("y", "/book").await;
    chat.say("z", "/book").await;

    let response = chat.send("y", "/leave").await;
    assert!(response.notification.is_none());
    assert_eq!(
        chat.say("x", "/queue").await,
        "Expected that x is playing now.\nThe waiting list:\nz"
    );
}

#[tokio::test]
async fn test_private_booking_is_called_in_private() {
    let chat = ChatFixture::new();
    chat.say("x", "/book").await;
    chat.whisper("y", "/book").await;

    let notification = chat.send("x", "/leave").await.notification.unwrap();
    assert_ne!(notification.chat_id, GROUP_CHAT_ID);
}

#[tokio::test]
async fn test_double_booking_is_rejected() {
    let chat = ChatFixture::new();
    chat.say("x", "/book").await;
    chat.say("y", "/book").await;

    assert_eq!(
        chat.say("x", "/book").await,
        "But you should be playing right now, huh?"
    );
    assert_eq!(
        chat.say("y", "/book").await,
        "But you're already in the queue, number 1 in the waiting list."
    );
    assert_eq!(
        chat.say("x", "/queue").await,
        "Expected that x is playing now.\nThe waiting list:\ny"
    );
}

#[tokio::test]
async fn test_leaving_without_a_booking() {
    let chat = ChatFixture::new();
    assert_eq!(chat.say("x", "/leave").await, "But the queue is empty...");

    chat.say("y", "/book").await;
    assert_eq!(chat.say("x", "/leave").await, "But you aren't in the queue now.");
    assert_eq!(
        chat.say("x", "/queue").await,
        "Expected that y is playing now.\nThe waiting list is empty."
    );
}

#[tokio::test]
async fn test_clean_queue() {
    let chat = ChatFixture::new();
    assert_eq!(chat.say("x", "/clean_queue").await, "But the queue is empty...");

    chat.say("x", "/book").await;
    chat.say("y", "/book").await;

    let response = chat.send("z", "/clean_queue").await;
    assert_eq!(
        response.reply.text,
        "Ok, going to clean up the queue with all these guys: @x, @y."
    );
    assert!(response.notification.is_none());
    assert_eq!(chat.say("z", "/queue").await, "The queue is empty.");
    assert!(chat.store.inner().is_empty());
}

#[tokio::test]
async fn test_outage_does_not_lose_the_queue() {
    let chat = ChatFixture::new();
    chat.say("x", "/book").await;

    chat.store.set_down(true);
    assert!(chat.say("y", "/book").await.contains("try again later"));
    assert!(chat.say("x", "/leave").await.contains("try again later"));
    chat.store.set_down(false);

    assert_eq!(
        chat.say("x", "/queue").await,
        "Expected that x is playing now.\nThe waiting list is empty."
    );
}
