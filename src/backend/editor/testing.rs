// src/backend/editor/testing.rs
// In-memory collaborators for driving an editor session in tests.

use crate::editor::gateway::{BackingStore, ImageBlob, UploadGateway};
use crate::error::InvitationError;
use crate::models::{InvitationId, InvitationPayload};
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCall {
    Create(InvitationPayload),
    Update(InvitationId, InvitationPayload),
    Get(InvitationId),
}

/// Records every call; optionally parks the next write on a gate or fails
/// reads and writes with a fixed error.
#[derive(Default)]
pub struct FakeStore {
    pub records: RefCell<BTreeMap<InvitationId, InvitationPayload>>,
    pub calls: RefCell<Vec<StoreCall>>,
    pub fail_writes_with: RefCell<Option<InvitationError>>,
    pub fail_reads_with: RefCell<Option<InvitationError>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    next_id: Cell<InvitationId>,
}

impl FakeStore {
    pub fn with_record(id: InvitationId, payload: InvitationPayload) -> Self {
        let store = Self::default();
        store.records.borrow_mut().insert(id, payload);
        store.next_id.set(id);
        store
    }

    /// The next write waits until the returned sender fires.
    pub fn hold_next_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn writes(&self) -> Vec<StoreCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !matches!(c, StoreCall::Get(_)))
            .cloned()
            .collect()
    }

    async fn pass_gate(&self) {
        let gate = self.gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
    }
}

impl BackingStore for FakeStore {
    async fn create(&self, record: InvitationPayload) -> Result<InvitationId, InvitationError> {
        self.calls.borrow_mut().push(StoreCall::Create(record.clone()));
        self.pass_gate().await;
        if let Some(err) = self.fail_writes_with.borrow().clone() {
            return Err(err);
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.records.borrow_mut().insert(id, record);
        Ok(id)
    }

    async fn update(&self, id: InvitationId, record: InvitationPayload) -> Result<(), InvitationError> {
        self.calls.borrow_mut().push(StoreCall::Update(id, record.clone()));
        self.pass_gate().await;
        if let Some(err) = self.fail_writes_with.borrow().clone() {
            return Err(err);
        }
        self.records.borrow_mut().insert(id, record);
        Ok(())
    }

    async fn get(&self, id: InvitationId) -> Result<InvitationPayload, InvitationError> {
        self.calls.borrow_mut().push(StoreCall::Get(id));
        if let Some(err) = self.fail_reads_with.borrow().clone() {
            return Err(err);
        }
        self.records
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| InvitationError::NotFound(format!("id {}", id)))
    }

    async fn get_by_slug(&self, slug: &str, published_only: bool) -> Result<InvitationPayload, InvitationError> {
        self.records
            .borrow()
            .values()
            .find(|r| r.slug == slug && (r.is_published || !published_only))
            .cloned()
            .ok_or_else(|| InvitationError::NotFound(format!("slug '{}'", slug)))
    }
}

/// Each upload waits for the test to resolve it by filename.
#[derive(Default)]
pub struct ManualGateway {
    waiting: RefCell<HashMap<String, oneshot::Receiver<Result<String, InvitationError>>>>,
    pub uploads: Cell<usize>,
}

impl ManualGateway {
    pub fn expect(&self, filename: &str) -> oneshot::Sender<Result<String, InvitationError>> {
        let (tx, rx) = oneshot::channel();
        self.waiting.borrow_mut().insert(filename.to_string(), rx);
        tx
    }
}

impl UploadGateway for ManualGateway {
    async fn upload(&self, blob: ImageBlob) -> Result<String, InvitationError> {
        self.uploads.set(self.uploads.get() + 1);
        let rx = self.waiting.borrow_mut().remove(&blob.filename);
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(InvitationError::UploadError("upload dropped".to_string()))),
            None => Ok(format!("/assets/{}", blob.filename)),
        }
    }
}

/// Yields to the executor once.
pub async fn yield_now() {
    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                return Poll::Ready(());
            }
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    YieldNow(false).await
}

pub fn png(name: &str) -> ImageBlob {
    ImageBlob::new(name, "image/png", vec![1, 2, 3])
}
