//! Application controller
//!
//! Owns the widget state and the fetch task, and processes commands from
//! the frontend. The frontend drives it: `handle_command` for user input,
//! `tick` from its render loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use quotidian::fetch::{FetchEvent, FetchHandle, FetchTask, FetchUpdate, RetryPolicy};
use quotidian::quote::{random_category, random_fallback, FallbackReason, FetchedQuote, QuoteOrigin};
use quotidian::source::QuoteSource;
use quotidian::theme::ThemeCycler;

use crate::config::display::{COPY_FEEDBACK_MS, FADE_MS, OFFLINE_NOTICE_SECS};
use crate::data::favourites::FavouritesStore;
use crate::data::slot::KvSlot;

use super::clipboard::ClipboardSink;
use super::state::{AppCommand, AppSnapshot, DisplayedQuote, Notice};

const FETCHING_TEXT: &str = "Fetching quote\u{2026}";

/// Loading text once `failed` attempts have failed
fn retrying_text(failed: u32, max_retries: u32) -> String {
    format!("Retrying\u{2026} ({}/{})", failed, max_retries)
}

/// Timing knobs for the controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub policy: RetryPolicy,
    /// How long the outgoing quote fades before the new one lands
    pub fade: Duration,
    /// Lifetime of offline and error notices
    pub offline_notice: Duration,
    /// Lifetime of the copy confirmation
    pub copy_feedback: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            policy: RetryPolicy::default(),
            fade: Duration::from_millis(FADE_MS),
            offline_notice: Duration::from_secs(OFFLINE_NOTICE_SECS),
            copy_feedback: Duration::from_millis(COPY_FEEDBACK_MS),
        }
    }
}

/// A quote waiting for the fade to finish
struct PendingDisplay {
    fetched: FetchedQuote,
    due: Instant,
}

pub struct QuoteController<S: KvSlot> {
    source: Arc<dyn QuoteSource>,
    favourites: FavouritesStore<S>,
    clipboard: Box<dyn ClipboardSink>,
    options: ControllerOptions,
    snapshot: AppSnapshot,
    updates_tx: Sender<FetchUpdate>,
    updates_rx: Receiver<FetchUpdate>,
    task: Option<FetchHandle>,
    /// Monotonically increasing counter to discard stale fetch updates
    generation: u64,
    pending: Option<PendingDisplay>,
    themes: ThemeCycler,
    copied_until: Option<Instant>,
}

impl<S: KvSlot> QuoteController<S> {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        favourites: FavouritesStore<S>,
        clipboard: Box<dyn ClipboardSink>,
        options: ControllerOptions,
    ) -> Self {
        let (updates_tx, updates_rx) = unbounded();
        let mut controller = Self {
            source,
            favourites,
            clipboard,
            options,
            snapshot: AppSnapshot::default(),
            updates_tx,
            updates_rx,
            task: None,
            generation: 0,
            pending: None,
            themes: ThemeCycler::new(),
            copied_until: None,
        };
        controller.refresh_favourites();
        controller
    }

    pub fn snapshot(&self) -> &AppSnapshot {
        &self.snapshot
    }

    pub fn favourites(&self) -> &FavouritesStore<S> {
        &self.favourites
    }

    /// Handle a single command. Returns true if the frontend should exit.
    pub fn handle_command(&mut self, cmd: AppCommand) -> bool {
        let now = Instant::now();
        match cmd {
            AppCommand::Shutdown => {
                if let Some(task) = self.task.take() {
                    task.abort();
                }
                self.pending = None;
                return true;
            }

            AppCommand::NewQuote => self.request_quote(now),
            AppCommand::Copy => self.copy_current(now),
            AppCommand::DismissNotice => self.dismiss_notice(now),

            AppCommand::ToggleFavourite => self.toggle_favourite(now),
            AppCommand::OpenFavourites => {
                self.snapshot.drawer_open = true;
                self.refresh_favourites();
            }
            AppCommand::CloseFavourites => {
                self.snapshot.drawer_open = false;
                self.snapshot.favourites.clear();
                self.snapshot.copied_favourite = None;
            }
            AppCommand::RemoveFavourite(index) => self.remove_favourite(index, now),
            AppCommand::CopyFavourite(index) => self.copy_favourite(index, now),
            AppCommand::ClearFavourites => {
                if let Err(e) = self.favourites.clear() {
                    warn!(error = %e, "could not clear favourites");
                    self.show_error("Couldn't update favourites.", e.to_string(), now);
                }
                self.refresh_favourites();
            }
        }
        false
    }

    /// Advance time: apply fetch progress, land faded quotes and expire
    /// timed feedback.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(update) = self.updates_rx.try_recv() {
            self.handle_fetch_update(update, now);
        }

        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            if let Some(pending) = self.pending.take() {
                self.apply_display(pending.fetched);
            }
        }

        if self.snapshot.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.snapshot.notice = None;
        }

        if self.copied_until.is_some_and(|until| now >= until) {
            self.copied_until = None;
            self.snapshot.copied = false;
            self.snapshot.copied_favourite = None;
        }
    }

    /// Start a fetch sequence unless one is already in flight.
    ///
    /// Each call increments `generation`; updates from earlier sequences are
    /// discarded in `handle_fetch_update`.
    fn request_quote(&mut self, now: Instant) {
        if self.snapshot.is_fetching {
            debug!("quote request ignored, fetch already in flight");
            return;
        }

        self.generation += 1;
        self.snapshot.is_fetching = true;
        self.snapshot.is_fading = true;
        self.snapshot.notice = None;
        self.snapshot.loading_text = Some(FETCHING_TEXT.to_string());

        let task = FetchTask::new(Arc::clone(&self.source), self.options.policy)
            .with_generation(self.generation);
        match task.spawn(self.updates_tx.clone()) {
            Ok(handle) => {
                debug!(generation = self.generation, source = self.source.name(), "fetch started");
                self.task = Some(handle);
            }
            Err(e) => {
                error!(error = %e, "could not start fetch, showing fallback");
                let quote = random_fallback(&mut rand::rng());
                self.snapshot.notice = Some(Notice::offline(now, self.options.offline_notice));
                self.schedule_display(FetchedQuote::fallback(quote, FallbackReason::Exhausted), now);
            }
        }
    }

    fn handle_fetch_update(&mut self, update: FetchUpdate, now: Instant) {
        if update.generation != self.generation {
            debug!(
                generation = update.generation,
                current = self.generation,
                "discarding stale fetch update"
            );
            return;
        }

        match update.event {
            FetchEvent::Attempt { attempt } => {
                let max_retries = self.options.policy.max_retries;
                self.snapshot.loading_text = Some(if attempt <= 1 {
                    FETCHING_TEXT.to_string()
                } else {
                    retrying_text(attempt - 1, max_retries)
                });
                if self.snapshot.notice.as_ref().is_some_and(Notice::is_retrying) {
                    self.snapshot.notice = None;
                }
            }
            FetchEvent::RetryScheduled { attempt, max_retries, delay } => {
                info!(attempt, max_retries, "fetch failed, retry scheduled");
                self.snapshot.loading_text = Some(retrying_text(attempt, max_retries));
                self.snapshot.notice = Some(Notice::retrying(attempt, max_retries, delay, now));
            }
            FetchEvent::Countdown { attempt, remaining_secs } => {
                if let Some(notice) = self.snapshot.notice.as_mut() {
                    notice.set_countdown(attempt, remaining_secs);
                }
            }
            FetchEvent::Finished(fetched) => {
                self.task = None;
                if fetched.origin == QuoteOrigin::Fallback(FallbackReason::Exhausted) {
                    warn!("all attempts failed, showing fallback");
                    self.snapshot.notice = Some(Notice::offline(now, self.options.offline_notice));
                } else {
                    self.snapshot.notice = None;
                }
                self.schedule_display(fetched, now);
            }
        }
    }

    /// Dismissing the retry notice abandons the sequence and shows a
    /// fallback immediately.
    fn dismiss_notice(&mut self, now: Instant) {
        let Some(notice) = self.snapshot.notice.take() else {
            return;
        };
        if !notice.is_retrying() {
            return;
        }

        if let Some(task) = self.task.take() {
            task.abort();
            // Anything the old task already queued is now stale
            self.generation += 1;
            info!("retry dismissed, showing fallback");
            let quote = random_fallback(&mut rand::rng());
            self.schedule_display(FetchedQuote::fallback(quote, FallbackReason::Dismissed), now);
        }
    }

    fn schedule_display(&mut self, fetched: FetchedQuote, now: Instant) {
        if self.options.fade.is_zero() {
            self.apply_display(fetched);
        } else {
            self.snapshot.is_fading = true;
            self.pending = Some(PendingDisplay {
                fetched,
                due: now + self.options.fade,
            });
        }
    }

    fn apply_display(&mut self, fetched: FetchedQuote) {
        let mut rng = rand::rng();
        let category = random_category(&mut rng);
        self.themes.advance_with(&mut rng);

        self.snapshot.is_saved = self
            .favourites
            .contains(&fetched.quote.text, &fetched.quote.author);
        self.snapshot.theme_index = self.themes.index();
        self.snapshot.current = Some(DisplayedQuote {
            quote: fetched.quote,
            origin: fetched.origin,
            category,
        });
        self.snapshot.is_fading = false;
        self.snapshot.is_fetching = false;
        self.snapshot.loading_text = None;
        self.snapshot.copied = false;
        if self.snapshot.copied_favourite.is_none() {
            self.copied_until = None;
        }
    }

    fn copy_current(&mut self, now: Instant) {
        if self.snapshot.is_fetching {
            return;
        }
        let Some(current) = &self.snapshot.current else {
            return;
        };

        let text = current.quote.to_clipboard_text();
        if self.write_clipboard(&text, now) {
            self.snapshot.copied = true;
            self.copied_until = Some(now + self.options.copy_feedback);
        }
    }

    fn copy_favourite(&mut self, index: usize, now: Instant) {
        let Some(record) = self.snapshot.favourites.get(index) else {
            return;
        };

        let text = record.quote().to_clipboard_text();
        if self.write_clipboard(&text, now) {
            self.snapshot.copied_favourite = Some(index);
            self.copied_until = Some(now + self.options.copy_feedback);
        }
    }

    fn write_clipboard(&mut self, text: &str, now: Instant) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "copy failed");
                self.show_error("Couldn't copy to clipboard.", e.to_string(), now);
                false
            }
        }
    }

    fn toggle_favourite(&mut self, now: Instant) {
        if self.snapshot.is_fetching {
            return;
        }
        let Some(current) = &self.snapshot.current else {
            return;
        };

        let (text, author) = (current.quote.text.clone(), current.quote.author.clone());
        if let Err(e) = self.favourites.toggle(&text, &author) {
            warn!(error = %e, "could not update favourites");
            self.show_error("Couldn't update favourites.", e.to_string(), now);
        }
        self.refresh_favourites();
    }

    fn remove_favourite(&mut self, index: usize, now: Instant) {
        let Some(record) = self.snapshot.favourites.get(index) else {
            return;
        };

        let (text, author) = (record.text.clone(), record.author.clone());
        if let Err(e) = self.favourites.remove(&text, &author) {
            warn!(error = %e, "could not remove favourite");
            self.show_error("Couldn't update favourites.", e.to_string(), now);
        }
        self.snapshot.copied_favourite = None;
        self.refresh_favourites();
    }

    /// Re-read the store into the heart state, count and drawer list
    fn refresh_favourites(&mut self) {
        let list = self.favourites.list();
        self.snapshot.favourite_count = list.len();
        self.snapshot.is_saved = self
            .snapshot
            .current
            .as_ref()
            .is_some_and(|c| list.iter().any(|f| f.matches(&c.quote.text, &c.quote.author)));
        if self.snapshot.drawer_open {
            self.snapshot.favourites = list;
        }
    }

    fn show_error(&mut self, message: &str, detail: String, now: Instant) {
        // A live retry notice is more important than a side failure
        if self.snapshot.notice.as_ref().is_some_and(Notice::is_retrying) {
            return;
        }
        self.snapshot.notice = Some(Notice::error(message, detail, now, self.options.offline_notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NoticeKind;
    use crate::data::slot::MemorySlot;
    use crate::error::{AppError, Result};
    use quotidian::error::{QuoteError, Result as QuoteResult};
    use quotidian::quote::{is_fallback, Quote, CATEGORIES};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Source that answers from a closure and counts calls
    struct FnSource<F> {
        answer: F,
        calls: AtomicU32,
        latency: Duration,
    }

    impl<F> QuoteSource for FnSource<F>
    where
        F: Fn(u32) -> QuoteResult<Quote> + Send + Sync,
    {
        fn name(&self) -> &'static str {
            "test"
        }

        fn fetch(&self) -> QuoteResult<Quote> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !self.latency.is_zero() {
                std::thread::sleep(self.latency);
            }
            (self.answer)(call)
        }
    }

    fn source<F>(latency: Duration, answer: F) -> Arc<FnSource<F>>
    where
        F: Fn(u32) -> QuoteResult<Quote> + Send + Sync,
    {
        Arc::new(FnSource {
            answer,
            calls: AtomicU32::new(0),
            latency,
        })
    }

    fn ok_quote(_call: u32) -> QuoteResult<Quote> {
        Ok(Quote::new("Stay hungry.", "Jobs"))
    }

    fn server_down(_call: u32) -> QuoteResult<Quote> {
        Err(QuoteError::Status(503))
    }

    /// Clipboard the test can inspect after handing it to the controller
    #[derive(Clone, Default)]
    struct SharedClipboard(Arc<Mutex<Vec<String>>>);

    impl ClipboardSink for SharedClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct NoClipboard;

    impl ClipboardSink for NoClipboard {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Err(AppError::Clipboard("no display".into()))
        }
    }

    fn fast_options(retry_delay: Duration) -> ControllerOptions {
        ControllerOptions {
            policy: RetryPolicy::default()
                .with_retry_delay(retry_delay)
                .with_request_timeout(Duration::from_secs(2))
                .with_countdown_tick(Duration::from_millis(10)),
            fade: Duration::ZERO,
            offline_notice: Duration::from_secs(5),
            copy_feedback: Duration::from_millis(2200),
        }
    }

    fn controller(
        source: Arc<dyn QuoteSource>,
        slot: MemorySlot,
        clipboard: Box<dyn ClipboardSink>,
        options: ControllerOptions,
    ) -> QuoteController<MemorySlot> {
        QuoteController::new(source, FavouritesStore::new(slot), clipboard, options)
    }

    /// Tick until the fetch settles, recording retry notices seen on the way
    fn settle(ctrl: &mut QuoteController<MemorySlot>) -> Vec<u32> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut retries = Vec::new();
        while ctrl.snapshot().is_fetching {
            assert!(Instant::now() < deadline, "fetch never settled");
            ctrl.tick(Instant::now());
            if let Some(Notice {
                kind: NoticeKind::Retrying { attempt, .. },
                ..
            }) = &ctrl.snapshot().notice
            {
                if retries.last() != Some(attempt) {
                    retries.push(*attempt);
                }
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        retries
    }

    fn saved(entries: &[(&str, &str)]) -> MemorySlot {
        let json: Vec<_> = entries
            .iter()
            .map(|(q, a)| {
                serde_json::json!({"quote": q, "author": a, "savedAt": "2024-05-01T10:00:00Z"})
            })
            .collect();
        MemorySlot::with_contents(serde_json::to_string(&json).unwrap())
    }

    #[test]
    fn test_new_quote_displays_remote_quote() {
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src.clone(),
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(20)),
        );

        assert!(!ctrl.handle_command(AppCommand::NewQuote));
        assert!(ctrl.snapshot().is_fetching);
        assert_eq!(ctrl.snapshot().loading_text.as_deref(), Some("Fetching quote\u{2026}"));

        let retries = settle(&mut ctrl);
        assert!(retries.is_empty());

        let snap = ctrl.snapshot();
        let current = snap.current.as_ref().unwrap();
        assert_eq!(current.quote, Quote::new("Stay hungry.", "Jobs"));
        assert_eq!(current.origin, QuoteOrigin::Remote);
        assert!(CATEGORIES.contains(&current.category));
        assert!(snap.loading_text.is_none());
        assert!(snap.notice.is_none());
        // The cycler starts on the first theme and never repeats it
        assert_ne!(snap.theme_index, 0);
        assert_eq!(src.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_request_while_in_flight_is_ignored() {
        let src = source(Duration::from_millis(80), ok_quote);
        let mut ctrl = controller(
            src.clone(),
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(20)),
        );

        ctrl.handle_command(AppCommand::NewQuote);
        let generation = ctrl.generation;
        ctrl.handle_command(AppCommand::NewQuote);
        ctrl.handle_command(AppCommand::NewQuote);
        assert_eq!(ctrl.generation, generation);

        settle(&mut ctrl);
        assert_eq!(src.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_exhaustion_shows_offline_fallback() {
        let src = source(Duration::ZERO, server_down);
        let mut ctrl = controller(
            src.clone(),
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(60)),
        );

        ctrl.handle_command(AppCommand::NewQuote);
        let retries = settle(&mut ctrl);
        assert_eq!(retries, vec![1, 2, 3]);
        assert_eq!(src.calls.load(Ordering::SeqCst), 4);

        let snap = ctrl.snapshot();
        let current = snap.current.as_ref().unwrap();
        assert_eq!(current.origin, QuoteOrigin::Fallback(FallbackReason::Exhausted));
        assert!(is_fallback(&current.quote));

        let notice = snap.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Offline);
        assert_eq!(notice.message, "No internet connection.");
        assert_eq!(notice.detail, "Showing a saved quote instead.");

        // Offline notice goes away by itself
        ctrl.tick(Instant::now() + Duration::from_secs(6));
        assert!(ctrl.snapshot().notice.is_none());
    }

    #[test]
    fn test_retry_loading_text() {
        // Latency keeps each attempt's text visible for at least one tick
        let src = source(Duration::from_millis(30), |call| {
            if call == 1 {
                Err(QuoteError::Status(500))
            } else {
                Ok(Quote::new("Second time lucky.", "Anon"))
            }
        });
        let mut ctrl = controller(
            src,
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(60)),
        );

        ctrl.handle_command(AppCommand::NewQuote);
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut texts = Vec::new();
        let mut during_wait = None;
        while ctrl.snapshot().is_fetching {
            assert!(Instant::now() < deadline);
            ctrl.tick(Instant::now());
            let snap = ctrl.snapshot();
            if let Some(text) = &snap.loading_text {
                if texts.last() != Some(text) {
                    texts.push(text.clone());
                }
                if during_wait.is_none() && snap.notice.as_ref().is_some_and(Notice::is_retrying) {
                    during_wait = Some(text.clone());
                }
            }
            std::thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(texts.first().map(String::as_str), Some("Fetching quote\u{2026}"));
        // The retry text shows as soon as the retry is scheduled
        assert_eq!(during_wait.as_deref(), Some("Retrying\u{2026} (1/3)"));
        assert_eq!(texts.last().map(String::as_str), Some("Retrying\u{2026} (1/3)"));
        let current = ctrl.snapshot().current.as_ref().unwrap();
        assert_eq!(current.origin, QuoteOrigin::Remote);
        assert!(ctrl.snapshot().notice.is_none());
    }

    #[test]
    fn test_dismiss_retry_notice_shows_fallback_and_stops() {
        let src = source(Duration::ZERO, server_down);
        let mut ctrl = controller(
            src.clone(),
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_secs(10)),
        );

        ctrl.handle_command(AppCommand::NewQuote);
        let deadline = Instant::now() + Duration::from_secs(5);
        while !ctrl.snapshot().notice.as_ref().is_some_and(Notice::is_retrying) {
            assert!(Instant::now() < deadline, "retry notice never appeared");
            ctrl.tick(Instant::now());
            std::thread::sleep(Duration::from_millis(2));
        }

        ctrl.handle_command(AppCommand::DismissNotice);
        let snap = ctrl.snapshot();
        assert!(!snap.is_fetching);
        assert!(snap.notice.is_none());
        let current = snap.current.clone().unwrap();
        assert_eq!(current.origin, QuoteOrigin::Fallback(FallbackReason::Dismissed));
        assert!(is_fallback(&current.quote));

        std::thread::sleep(Duration::from_millis(50));
        ctrl.tick(Instant::now());
        assert_eq!(ctrl.snapshot().current, Some(current));
        assert!(ctrl.snapshot().notice.is_none());
        assert_eq!(src.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dismiss_without_retry_notice_is_noop() {
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(20)),
        );

        ctrl.handle_command(AppCommand::DismissNotice);
        assert!(ctrl.snapshot().current.is_none());
        assert!(!ctrl.snapshot().is_fetching);
    }

    #[test]
    fn test_stale_updates_are_discarded() {
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(20)),
        );

        ctrl.updates_tx
            .send(FetchUpdate {
                generation: 41,
                event: FetchEvent::Finished(FetchedQuote::remote(Quote::new("Old", "News"))),
            })
            .unwrap();
        ctrl.tick(Instant::now());
        assert!(ctrl.snapshot().current.is_none());
    }

    #[test]
    fn test_fade_delays_display() {
        let src = source(Duration::ZERO, ok_quote);
        let mut options = fast_options(Duration::from_millis(20));
        options.fade = Duration::from_millis(400);
        let mut ctrl = controller(src, MemorySlot::new(), Box::new(SharedClipboard::default()), options);

        ctrl.handle_command(AppCommand::NewQuote);
        let deadline = Instant::now() + Duration::from_secs(5);
        while ctrl.pending.is_none() {
            assert!(Instant::now() < deadline);
            ctrl.tick(Instant::now());
            std::thread::sleep(Duration::from_millis(2));
        }

        let due = ctrl.pending.as_ref().unwrap().due;
        assert!(ctrl.snapshot().is_fading);
        assert!(ctrl.snapshot().is_fetching);
        assert!(ctrl.snapshot().current.is_none());

        ctrl.tick(due);
        assert!(!ctrl.snapshot().is_fading);
        assert!(!ctrl.snapshot().is_fetching);
        assert!(ctrl.snapshot().current.is_some());
    }

    #[test]
    fn test_toggle_favourite() {
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(20)),
        );

        // Nothing to save yet
        ctrl.handle_command(AppCommand::ToggleFavourite);
        assert_eq!(ctrl.snapshot().favourite_count, 0);

        ctrl.handle_command(AppCommand::NewQuote);
        settle(&mut ctrl);
        assert!(!ctrl.snapshot().is_saved);

        ctrl.handle_command(AppCommand::ToggleFavourite);
        assert!(ctrl.snapshot().is_saved);
        assert_eq!(ctrl.snapshot().favourite_count, 1);
        assert!(ctrl.favourites().contains("Stay hungry.", "Jobs"));

        ctrl.handle_command(AppCommand::ToggleFavourite);
        assert!(!ctrl.snapshot().is_saved);
        assert_eq!(ctrl.snapshot().favourite_count, 0);
    }

    #[test]
    fn test_displayed_quote_reflects_saved_state() {
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            saved(&[("Stay hungry.", "Jobs")]),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(20)),
        );
        assert_eq!(ctrl.snapshot().favourite_count, 1);

        ctrl.handle_command(AppCommand::NewQuote);
        settle(&mut ctrl);
        assert!(ctrl.snapshot().is_saved);
    }

    #[test]
    fn test_drawer_remove_and_clear() {
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            saved(&[("A", "X"), ("B", "Y"), ("C", "Z")]),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_millis(20)),
        );

        assert!(ctrl.snapshot().favourites.is_empty());
        ctrl.handle_command(AppCommand::OpenFavourites);
        assert!(ctrl.snapshot().drawer_open);
        assert_eq!(ctrl.snapshot().favourites.len(), 3);

        ctrl.handle_command(AppCommand::RemoveFavourite(1));
        let texts: Vec<_> = ctrl.snapshot().favourites.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "C"]);
        assert_eq!(ctrl.snapshot().favourite_count, 2);

        // Out of range is ignored
        ctrl.handle_command(AppCommand::RemoveFavourite(9));
        assert_eq!(ctrl.snapshot().favourite_count, 2);

        ctrl.handle_command(AppCommand::ClearFavourites);
        assert!(ctrl.snapshot().favourites.is_empty());
        assert_eq!(ctrl.snapshot().favourite_count, 0);

        ctrl.handle_command(AppCommand::CloseFavourites);
        assert!(!ctrl.snapshot().drawer_open);
    }

    #[test]
    fn test_copy_current_quote() {
        let clipboard = SharedClipboard::default();
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            MemorySlot::new(),
            Box::new(clipboard.clone()),
            fast_options(Duration::from_millis(20)),
        );

        // Nothing shown yet
        ctrl.handle_command(AppCommand::Copy);
        assert!(clipboard.0.lock().unwrap().is_empty());

        ctrl.handle_command(AppCommand::NewQuote);
        settle(&mut ctrl);
        ctrl.handle_command(AppCommand::Copy);

        assert_eq!(
            clipboard.0.lock().unwrap().as_slice(),
            &["\"Stay hungry.\" \u{2014} Jobs".to_string()]
        );
        assert!(ctrl.snapshot().copied);
        assert_eq!(ctrl.snapshot().copy_label(), "\u{2713} Copied!");

        ctrl.tick(Instant::now() + Duration::from_secs(3));
        assert!(!ctrl.snapshot().copied);
    }

    #[test]
    fn test_copy_ignored_while_fetching() {
        let clipboard = SharedClipboard::default();
        let src = source(Duration::from_millis(80), ok_quote);
        let mut ctrl = controller(
            src,
            MemorySlot::new(),
            Box::new(clipboard.clone()),
            fast_options(Duration::from_millis(20)),
        );

        ctrl.handle_command(AppCommand::NewQuote);
        settle(&mut ctrl);
        ctrl.handle_command(AppCommand::NewQuote);
        ctrl.handle_command(AppCommand::Copy);
        assert!(clipboard.0.lock().unwrap().is_empty());
        settle(&mut ctrl);
    }

    #[test]
    fn test_copy_favourite() {
        let clipboard = SharedClipboard::default();
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            saved(&[("A", "X"), ("B", "Y")]),
            Box::new(clipboard.clone()),
            fast_options(Duration::from_millis(20)),
        );

        ctrl.handle_command(AppCommand::OpenFavourites);
        ctrl.handle_command(AppCommand::CopyFavourite(1));
        assert_eq!(clipboard.0.lock().unwrap().as_slice(), &["\"B\" \u{2014} Y".to_string()]);
        assert_eq!(ctrl.snapshot().copied_favourite, Some(1));
    }

    #[test]
    fn test_clipboard_failure_shows_error_notice() {
        let src = source(Duration::ZERO, ok_quote);
        let mut ctrl = controller(
            src,
            MemorySlot::new(),
            Box::new(NoClipboard),
            fast_options(Duration::from_millis(20)),
        );

        ctrl.handle_command(AppCommand::NewQuote);
        settle(&mut ctrl);
        ctrl.handle_command(AppCommand::Copy);

        assert!(!ctrl.snapshot().copied);
        let notice = ctrl.snapshot().notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Couldn't copy to clipboard.");
    }

    #[test]
    fn test_shutdown_aborts_fetch() {
        let src = source(Duration::ZERO, server_down);
        let mut ctrl = controller(
            src.clone(),
            MemorySlot::new(),
            Box::new(SharedClipboard::default()),
            fast_options(Duration::from_secs(10)),
        );

        ctrl.handle_command(AppCommand::NewQuote);
        assert!(ctrl.handle_command(AppCommand::Shutdown));
        assert!(ctrl.task.is_none());
    }
}
