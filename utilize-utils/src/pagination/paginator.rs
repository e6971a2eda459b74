//! Event-driven pager: consumes button clicks and re-renders the current page.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use utilize_core::{EventSource, UtilizeError, UtilizeResult};

use super::{
    event::ComponentEvent,
    state::{ButtonRow, NavAction, PagerState},
};

/// Displays pages in response to pager events.
#[async_trait]
pub trait PageRenderer<T, E>: Send + Sync
where
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Show `page` with `row` in reply to the click `event`.
    async fn render(&self, event: &E, page: &T, row: &ButtonRow) -> anyhow::Result<()>;

    /// Answer a click from someone other than the pager owner.
    async fn reject(&self, _event: &E) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once when the event source ends; `row` is fully disabled.
    async fn finish(&self, _page: &T, _row: &ButtonRow) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Builder for a button-driven pager.
///
/// ```ignore
/// let running = Paginator::new(renderer)
///     .set_pages(pages)?
///     .attach(collector)
///     .owner(author_id)
///     .start()?;
/// ```
pub struct Paginator<T, E>
where
    T: Send + Sync + 'static,
    E: ComponentEvent,
{
    renderer: Arc<dyn PageRenderer<T, E>>,
    state: Option<PagerState<T>>,
    events: Option<Box<dyn EventSource<E>>>,
    owner: Option<u64>,
}

impl<T, E> Paginator<T, E>
where
    T: Send + Sync + 'static,
    E: ComponentEvent,
{
    pub fn new(renderer: impl PageRenderer<T, E> + 'static) -> Self {
        Self {
            renderer: Arc::new(renderer),
            state: None,
            events: None,
            owner: None,
        }
    }

    /// Set the pages to browse. At least one page is required.
    pub fn set_pages(mut self, pages: impl Into<Arc<[T]>>) -> UtilizeResult<Self> {
        self.state = Some(PagerState::new(pages)?);
        Ok(self)
    }

    /// Set the source of button clicks.
    pub fn attach(mut self, events: impl EventSource<E> + 'static) -> Self {
        self.events = Some(Box::new(events));
        self
    }

    /// Only apply clicks from this user; others are passed to [`PageRenderer::reject`].
    pub fn owner(mut self, user_id: u64) -> Self {
        self.owner = Some(user_id);
        self
    }

    /// State before start, if pages were set.
    pub fn state(&self) -> Option<&PagerState<T>> {
        self.state.as_ref()
    }

    /// Spawn the event loop on the current tokio runtime.
    pub fn start(self) -> UtilizeResult<RunningPaginator<T>> {
        let Some(state) = self.state else {
            return Err(UtilizeError::precondition(
                "pages are not set; call set_pages() before start()",
            ));
        };
        let Some(events) = self.events else {
            return Err(UtilizeError::precondition(
                "no event source attached; call attach() before start()",
            ));
        };
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            UtilizeError::precondition("start() must be called inside a tokio runtime")
        })?;

        let pages = Arc::clone(state.pages());
        let (index_tx, index_rx) = watch::channel(state.current_index());
        let task = runtime.spawn(drive(state, events, self.renderer, self.owner, index_tx));

        Ok(RunningPaginator {
            pages,
            index: index_rx,
            task,
        })
    }
}

async fn drive<T, E>(
    mut state: PagerState<T>,
    mut events: Box<dyn EventSource<E>>,
    renderer: Arc<dyn PageRenderer<T, E>>,
    owner: Option<u64>,
    index_tx: watch::Sender<usize>,
) -> usize
where
    T: Send + Sync + 'static,
    E: ComponentEvent,
{
    while let Some(event) = events.next_event().await {
        let Some(action) = event.custom_id().and_then(NavAction::from_custom_id) else {
            continue;
        };

        if let Some(owner) = owner
            && event.actor_id() != Some(owner)
        {
            if let Err(source) = renderer.reject(&event).await {
                warn!(?source, "failed to answer foreign pager click");
            }
            continue;
        }

        let index = state.apply(action);
        index_tx.send_replace(index);

        if let Err(source) = renderer
            .render(&event, state.current_page(), &state.buttons())
            .await
        {
            warn!(?source, index, "failed to render pager page");
        }
    }

    let index = state.current_index();
    debug!(index, "pager event source ended");

    if let Err(source) = renderer
        .finish(state.current_page(), &state.buttons().disabled())
        .await
    {
        warn!(?source, "failed to disable pager controls");
    }

    index
}

/// Handle to a started pager.
pub struct RunningPaginator<T> {
    pages: Arc<[T]>,
    index: watch::Receiver<usize>,
    task: JoinHandle<usize>,
}

impl<T> RunningPaginator<T> {
    pub fn current_index(&self) -> usize {
        *self.index.borrow()
    }

    pub fn current_page(&self) -> &T {
        &self.pages[self.current_index()]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn buttons(&self) -> ButtonRow {
        ButtonRow::for_page(self.current_index(), self.pages.len())
    }

    /// Wait for the next page change. `None` once the pager has stopped.
    pub async fn changed(&mut self) -> Option<usize> {
        self.index.changed().await.ok()?;
        Some(*self.index.borrow_and_update())
    }

    /// Stop listening without waiting for the source to end.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the event source to end and return the final index.
    pub async fn join(self) -> anyhow::Result<usize> {
        Ok(self.task.await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::sync::mpsc;

    use super::*;
    use crate::pagination::state::label_custom_id;

    struct Click {
        custom_id: String,
        actor: u64,
    }

    impl Click {
        fn new(action: NavAction) -> Self {
            Self::by(action, 1)
        }

        fn by(action: NavAction, actor: u64) -> Self {
            Self {
                custom_id: action.custom_id(),
                actor,
            }
        }

        fn raw(custom_id: &str) -> Self {
            Self {
                custom_id: custom_id.to_owned(),
                actor: 1,
            }
        }
    }

    impl ComponentEvent for Click {
        fn custom_id(&self) -> Option<&str> {
            Some(&self.custom_id)
        }

        fn actor_id(&self) -> Option<u64> {
            Some(self.actor)
        }
    }

    #[derive(Default)]
    struct Log {
        renders: Vec<(&'static str, String)>,
        rejected: usize,
        finished: Option<(&'static str, ButtonRow)>,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Log>>);

    #[async_trait]
    impl PageRenderer<&'static str, Click> for Recorder {
        async fn render(
            &self,
            _event: &Click,
            page: &&'static str,
            row: &ButtonRow,
        ) -> anyhow::Result<()> {
            self.0
                .lock()
                .unwrap()
                .renders
                .push((*page, row.label().to_owned()));
            Ok(())
        }

        async fn reject(&self, _event: &Click) -> anyhow::Result<()> {
            self.0.lock().unwrap().rejected += 1;
            Ok(())
        }

        async fn finish(&self, page: &&'static str, row: &ButtonRow) -> anyhow::Result<()> {
            self.0.lock().unwrap().finished = Some((*page, row.clone()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn start_requires_pages_and_source() {
        let (_tx, rx) = mpsc::unbounded_channel::<Click>();
        let missing_pages = Paginator::<&'static str, Click>::new(Recorder::default())
            .attach(rx)
            .start();
        assert!(matches!(missing_pages, Err(UtilizeError::Precondition(_))));

        let missing_source = Paginator::<&'static str, Click>::new(Recorder::default())
            .set_pages(vec!["a"])
            .unwrap()
            .start();
        assert!(matches!(missing_source, Err(UtilizeError::Precondition(_))));
    }

    #[test]
    fn empty_pages_are_rejected() {
        let result = Paginator::<&'static str, Click>::new(Recorder::default()).set_pages(vec![]);
        assert!(matches!(result, Err(UtilizeError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn clicks_move_through_pages_and_rerender() {
        let recorder = Recorder::default();
        let (tx, rx) = mpsc::unbounded_channel::<Click>();
        let running = Paginator::<&'static str, Click>::new(recorder.clone())
            .set_pages(vec!["a", "b", "c"])
            .unwrap()
            .attach(rx)
            .start()
            .unwrap();

        assert_eq!(running.current_page(), &"a");

        for click in [
            Click::new(NavAction::Next),
            Click::new(NavAction::Next),
            Click::new(NavAction::Next),
            Click::raw(&label_custom_id()),
            Click::raw("somebody-else:button"),
            Click::new(NavAction::Prev),
            Click::new(NavAction::First),
        ] {
            tx.send(click).unwrap();
        }
        drop(tx);

        assert_eq!(running.join().await.unwrap(), 0);

        let log = recorder.0.lock().unwrap();
        let expected = [
            ("b", "[2/3]"),
            ("c", "[3/3]"),
            ("c", "[3/3]"),
            ("b", "[2/3]"),
            ("a", "[1/3]"),
        ];
        assert_eq!(log.renders.len(), expected.len());
        for ((page, label), (want_page, want_label)) in log.renders.iter().zip(expected) {
            assert_eq!(*page, want_page);
            assert_eq!(label, want_label);
        }

        let (page, row) = log.finished.as_ref().unwrap();
        assert_eq!(*page, "a");
        assert!(row.buttons.iter().all(|button| !button.enabled));
    }

    #[tokio::test]
    async fn clicks_from_other_users_are_rejected() {
        let recorder = Recorder::default();
        let (tx, rx) = mpsc::unbounded_channel::<Click>();
        let running = Paginator::<&'static str, Click>::new(recorder.clone())
            .set_pages(vec!["a", "b"])
            .unwrap()
            .attach(rx)
            .owner(1)
            .start()
            .unwrap();

        tx.send(Click::by(NavAction::Last, 2)).unwrap();
        drop(tx);

        assert_eq!(running.join().await.unwrap(), 0);
        let log = recorder.0.lock().unwrap();
        assert_eq!(log.rejected, 1);
        assert!(log.renders.is_empty());
    }

    #[tokio::test]
    async fn running_handle_tracks_the_current_page() {
        let (tx, rx) = mpsc::unbounded_channel::<Click>();
        let mut running = Paginator::<&'static str, Click>::new(Recorder::default())
            .set_pages(vec!["a", "b", "c"])
            .unwrap()
            .attach(rx)
            .start()
            .unwrap();

        tx.send(Click::new(NavAction::Last)).unwrap();
        assert_eq!(running.changed().await, Some(2));
        assert_eq!(running.current_page(), &"c");
        assert_eq!(running.buttons().label(), "[3/3]");

        drop(tx);
        assert_eq!(running.changed().await, None);
    }
}
