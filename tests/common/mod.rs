// Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::oneshot;
use user_directory::source::{Address, Company};
use user_directory::{FetchError, Record, RecordSource};

pub type Reply = Result<Vec<Record>, FetchError>;

pub fn mk_record(id: i64, name: &str) -> Record {
    Record {
        id,
        name: name.to_string(),
        username: name.split_whitespace().next().unwrap_or(name).to_lowercase(),
        email: format!("user{id}@example.org"),
        address: Address { city: format!("City{id}") },
        phone: format!("555-01{id:02}"),
        website: format!("site{id}.example.org"),
        company: Company { name: format!("Company{id}") },
    }
}

/// Answers each call with the next scripted reply, immediately.
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self { replies: Mutex::new(replies.into()), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch_all(&self) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(FetchError::transport("no scripted reply left")))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Each call waits on its own gate; the test decides when and how it resolves.
pub struct GatedSource {
    gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
}

impl GatedSource {
    pub fn new(n: usize) -> (Vec<oneshot::Sender<Reply>>, Self) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) = (0..n).map(|_| oneshot::channel()).unzip();
        (senders, Self { gates: Mutex::new(receivers) })
    }
}

#[async_trait::async_trait]
impl RecordSource for GatedSource {
    async fn fetch_all(&self) -> Reply {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx.await.unwrap_or(Err(FetchError::Unknown)),
            None => Err(FetchError::transport("no gate left")),
        }
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

/// Yield to other local tasks until `cond` holds.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
