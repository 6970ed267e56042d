//! Runs collection requests off the UI thread.
//!
//! The UI loop hands a [`Request`] to the [`Dispatcher`], which executes it on
//! a small tokio runtime and sends back a [`Completion`]. The loop drains
//! completions between frames, so all state changes stay on the UI thread.
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

use crate::api::{Usuario, UsuarioApi, UsuarioDraft, UsuarioId};
use crate::error::ApiError;

/// A request against the collection endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    List,
    Create(UsuarioDraft),
    Update { id: UsuarioId, draft: UsuarioDraft },
    Delete { id: UsuarioId },
}

impl Request {
    pub fn label(&self) -> &'static str {
        match self {
            Request::List => "loading",
            Request::Create(_) => "creating",
            Request::Update { .. } => "saving",
            Request::Delete { .. } => "deleting",
        }
    }
}

/// Outcome of a [`Request`], tagged with the id it targeted.
#[derive(Debug)]
pub enum Completion {
    Listed(Result<Vec<Usuario>, ApiError>),
    Created(Result<Usuario, ApiError>),
    Updated { id: UsuarioId, result: Result<Usuario, ApiError> },
    Deleted { id: UsuarioId, result: Result<(), ApiError> },
}

/// Execute one request. Never fails itself: errors travel inside the
/// completion.
pub async fn execute(api: &dyn UsuarioApi, request: Request) -> Completion {
    match request {
        Request::List => Completion::Listed(api.list().await),
        Request::Create(draft) => Completion::Created(api.create(&draft).await),
        Request::Update { id, draft } => {
            let result = api.update(&id, &draft).await;
            Completion::Updated { id, result }
        }
        Request::Delete { id } => {
            let result = api.delete(&id).await;
            Completion::Deleted { id, result }
        }
    }
}

pub struct Dispatcher {
    runtime: Runtime,
    api: Arc<dyn UsuarioApi>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn UsuarioApi>) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("usuarios-http")
            .enable_all()
            .build()?;
        let (tx, rx) = unbounded_channel();
        Ok(Self { runtime, api, tx, rx })
    }

    pub fn endpoint(&self) -> String {
        self.api.endpoint()
    }

    /// Start `request` in the background; its completion shows up in
    /// [`Dispatcher::try_next`].
    pub fn dispatch(&self, request: Request) {
        debug!(?request, "dispatching");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let completion = execute(api.as_ref(), request).await;
            if tx.send(completion).is_err() {
                warn!("completion dropped: ui loop is gone");
            }
        });
    }

    /// Next finished request, without blocking.
    pub fn try_next(&mut self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished request.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<Completion> {
        let rx = &mut self.rx;
        self.runtime.block_on(async move { tokio::time::timeout(timeout, rx.recv()).await.ok().flatten() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed;

    #[async_trait]
    impl UsuarioApi for Fixed {
        fn endpoint(&self) -> String {
            "memory://fixed".into()
        }

        async fn list(&self) -> Result<Vec<Usuario>, ApiError> {
            Ok(vec![Usuario::new(1, "Ana", "Ruiz")])
        }

        async fn create(&self, draft: &UsuarioDraft) -> Result<Usuario, ApiError> {
            Ok(Usuario::new(2, draft.nombre.clone(), draft.apellidos.clone()))
        }

        async fn update(&self, id: &UsuarioId, draft: &UsuarioDraft) -> Result<Usuario, ApiError> {
            Ok(Usuario { id: id.clone(), nombre: draft.nombre.clone(), apellidos: draft.apellidos.clone() })
        }

        async fn delete(&self, id: &UsuarioId) -> Result<(), ApiError> {
            Err(ApiError::Status { method: "DELETE", url: format!("memory://fixed/{id}"), status: 404, body: String::new() })
        }
    }

    #[test]
    fn completions_come_back_through_the_channel() {
        let mut d = Dispatcher::new(Arc::new(Fixed)).unwrap();
        assert!(d.try_next().is_none());

        d.dispatch(Request::List);
        match d.next_timeout(Duration::from_secs(5)) {
            Some(Completion::Listed(Ok(rows))) => assert_eq!(rows, vec![Usuario::new(1, "Ana", "Ruiz")]),
            other => panic!("unexpected completion: {other:?}"),
        }

        d.dispatch(Request::Delete { id: UsuarioId::Number(5) });
        match d.next_timeout(Duration::from_secs(5)) {
            Some(Completion::Deleted { id, result: Err(e) }) => {
                assert_eq!(id, UsuarioId::Number(5));
                assert_eq!(e.status(), Some(404));
            }
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn labels_describe_the_pending_work() {
        assert_eq!(Request::List.label(), "loading");
        assert_eq!(Request::Delete { id: UsuarioId::Number(1) }.label(), "deleting");
    }
}
