use tokio::sync::watch;

/// Observable state cell owned by one container.
///
/// The container is the only writer. Renderers either take a
/// [`snapshot`](Store::snapshot) or [`subscribe`](Store::subscribe) and are
/// woken after every [`update`](Store::update).
#[derive(Debug)]
pub struct Store<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> Store<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Reads without cloning the whole state.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Applies `f` and notifies subscribers, even when nobody is listening.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }
}

impl<S: Clone + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
