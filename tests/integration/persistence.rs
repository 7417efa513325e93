//! Restarting the bot over the same data directory

use crate::fixtures::test_config;
use std::path::PathBuf;
use std::sync::Arc;
use table_ladder::transport::InboundMessage;
use table_ladder::{Dispatcher, FsObjectStore};

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("table-ladder-it-{}", uuid::Uuid::new_v4()));
        Self(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn start(dir: &TempDir) -> Dispatcher {
    Dispatcher::from_config(Arc::new(FsObjectStore::new(dir.0.clone())), &test_config())
}

async fn say(dispatcher: &Dispatcher, id: i64, sender: &str, text: &str) -> String {
    let message = InboundMessage {
        message_id: id,
        chat_id: crate::fixtures::GROUP_CHAT_ID,
        chat_title: Some(crate::fixtures::GROUP.to_string()),
        sender: Some(sender.to_string()),
        text: text.to_string(),
    };
    dispatcher.dispatch(&message).await.unwrap().reply.text
}

#[tokio::test]
async fn test_state_survives_restart() {
    let dir = TempDir::new();

    {
        let bot = start(&dir);
        say(&bot, 1, "alice", "/register_me").await;
        say(&bot, 2, "bob", "/register_me").await;
        say(&bot, 3, "alice", "/played @bob 3-0").await;
        say(&bot, 4, "alice", "/book").await;
    }

    let bot = start(&dir);
    assert_eq!(
        say(&bot, 5, "alice", "/my_rating").await,
        "Your rating is 1028 | 1 | 0."
    );
    assert_eq!(say(&bot, 6, "bob", "/stats_vs @alice").await, "bob - 0 | 1 - alice");
    assert_eq!(
        say(&bot, 7, "bob", "/queue").await,
        "Expected that alice is playing now.\nThe waiting list is empty."
    );

    let top = say(&bot, 8, "bob", "/top").await;
    assert!(top.contains("alice 🥇 = 1028 | 1 | 0"), "{}", top);
    assert!(top.contains("bob 🥈 = 972 | 0 | 1"), "{}", top);
}

#[tokio::test]
async fn test_notification_after_restart() {
    let dir = TempDir::new();

    {
        let bot = start(&dir);
        say(&bot, 10, "a_first", "/book").await;
    }
    // Filesystem timestamps may be coarse; keep the two bookings apart
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    {
        let bot = start(&dir);
        say(&bot, 11, "b_second", "/book").await;
    }

    let bot = start(&dir);
    let message = InboundMessage {
        message_id: 12,
        chat_id: crate::fixtures::GROUP_CHAT_ID,
        chat_title: Some(crate::fixtures::GROUP.to_string()),
        sender: Some("a_first".to_string()),
        text: "/leave".to_string(),
    };
    let response = bot.dispatch(&message).await.unwrap();

    let notification = response.notification.unwrap();
    assert_eq!(notification.reply_to_message_id, 11);
    assert_eq!(notification.text, "You're the next in the queue, @b_second.");
}
