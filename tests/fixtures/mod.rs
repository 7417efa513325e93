//! Test fixtures and fake stores for integration testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use table_ladder::config::{AccessSettings, AppConfig};
use table_ladder::storage::{InMemoryObjectStore, ObjectMeta, ObjectStore, StoreError, StoreResult};
use table_ladder::transport::{InboundMessage, TransportResponse};
use table_ladder::Dispatcher;

pub const GROUP: &str = "Office Ping Pong";
pub const ADMIN: &str = "boss";
pub const GROUP_CHAT_ID: i64 = -1001;

/// Object store that can be switched into an outage
#[derive(Debug, Default)]
pub struct FlakyObjectStore {
    inner: InMemoryObjectStore,
    down: AtomicBool,
}

impl FlakyObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &InMemoryObjectStore {
        &self.inner
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(StoreError::Backend {
                message: "store is down".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ObjectStore for FlakyObjectStore {
    async fn put(&self, key: &str, body: &[u8]) -> StoreResult<()> {
        self.check()?;
        self.inner.put(key, body).await
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.delete(key).await
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectMeta>> {
        self.check()?;
        self.inner.list(prefix).await
    }
}

/// Configuration with an admin and a group chat
pub fn test_config() -> AppConfig {
    AppConfig {
        access: AccessSettings {
            admin_handle: Some(ADMIN.to_string()),
            group_name: Some(GROUP.to_string()),
        },
        ..AppConfig::default()
    }
}

/// A group chat driven through the dispatcher
pub struct ChatFixture {
    pub dispatcher: Dispatcher,
    pub store: Arc<FlakyObjectStore>,
    next_message_id: AtomicI64,
}

impl ChatFixture {
    pub fn new() -> Self {
        let store = Arc::new(FlakyObjectStore::new());
        let dispatcher = Dispatcher::from_config(store.clone(), &test_config());
        Self {
            dispatcher,
            store,
            next_message_id: AtomicI64::new(1),
        }
    }

    fn message(&self, sender: &str, chat_title: Option<&str>, text: &str) -> InboundMessage {
        InboundMessage {
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
            chat_id: if chat_title.is_some() { GROUP_CHAT_ID } else { 42 },
            chat_title: chat_title.map(str::to_string),
            sender: Some(sender.to_string()),
            text: text.to_string(),
        }
    }

    /// Post `text` in the group chat and return the full response
    pub async fn send(&self, sender: &str, text: &str) -> TransportResponse {
        let message = self.message(sender, Some(GROUP), text);
        self.dispatcher
            .dispatch(&message)
            .await
            .expect("commands are always answered")
    }

    /// Post `text` in the group chat and return the reply text
    pub async fn say(&self, sender: &str, text: &str) -> String {
        self.send(sender, text).await.reply.text
    }

    /// Post `text` in a private chat with the bot and return the reply text
    pub async fn whisper(&self, sender: &str, text: &str) -> String {
        let message = self.message(sender, None, text);
        self.dispatcher
            .dispatch(&message)
            .await
            .expect("commands are always answered")
            .reply
            .text
    }

    /// Register every handle in the group
    pub async fn register_all(&self, handles: &[&str]) {
        for handle in handles {
            let reply = self.say(handle, "/register_me").await;
            assert!(reply.starts_with("Registered"), "{}", reply);
        }
    }
}
