//! Main application state management

use chrono::{DateTime, Local};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::{
    countdown_state::{format_time, TickOutcome},
    ClockState, CountdownState, DurationSelection,
};
use crate::{
    api::responses::{button_label, StatusResponse, View},
    events::AppEvent,
    services::{PlaybackController, PlaybackError},
    tasks::ticker::{Tick, TickSource, Ticker, TICK_PERIOD},
};

/// What a toggle press ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    StoppedAlarm,
    StoppedCountdown,
    StartedCountdown,
}

/// Main application state owning the clock, the duration selector, the
/// countdown engine and the alarm.
///
/// It is owned by the event loop and only ever mutated from there. Periodic
/// sources are held as [`Ticker`] guards, so dropping the state releases them.
pub struct AppState {
    clock: ClockState,
    duration: DurationSelection,
    countdown: CountdownState,
    playback: PlaybackController,
    clock_ticker: Option<Ticker>,
    countdown_ticker: Option<Ticker>,
    /// Where tickers deliver their ticks
    events_tx: mpsc::UnboundedSender<AppEvent>,
    /// Channel for view updates
    view_tx: watch::Sender<View>,
}

impl AppState {
    /// Create a new AppState with an idle countdown and a silent alarm
    pub fn new(
        playback: PlaybackController,
        duration: DurationSelection,
        events_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let clock = ClockState::default();
        let countdown = CountdownState::new();
        let view = build_view(&clock, &duration, &countdown, playback.is_playing());
        let (view_tx, _) = watch::channel(view);

        Self {
            clock,
            duration,
            countdown,
            playback,
            clock_ticker: None,
            countdown_ticker: None,
            events_tx,
            view_tx,
        }
    }

    /// Start the clock driver. Calling it again while mounted does nothing.
    pub fn mount(&mut self) {
        if self.clock_ticker.is_some() {
            return;
        }
        self.clock.update(Local::now());
        self.clock_ticker = Some(Ticker::spawn(
            Tick {
                source: TickSource::Clock,
                generation: 0,
            },
            TICK_PERIOD,
            self.events_tx.clone(),
        ));
        info!("Clock driver started");
        self.publish();
    }

    /// Release every periodic source and silence the alarm
    pub fn unmount(&mut self) {
        if let Some(ticker) = self.clock_ticker.take() {
            ticker.stop();
            info!("Clock driver stopped");
        }
        if self.countdown.stop() {
            info!("Countdown cancelled on teardown");
        }
        self.release_countdown_ticker();
        self.playback.stop();
        self.publish();
    }

    pub fn is_mounted(&self) -> bool {
        self.clock_ticker.is_some()
    }

    /// Route a tick to the component that owns its source
    pub fn on_tick(&mut self, tick: Tick) {
        match tick.source {
            TickSource::Clock => self.on_clock_tick(Local::now()),
            TickSource::Countdown => {
                self.on_countdown_tick(tick.generation);
            }
        }
    }

    /// Overwrite the current time and check on the alarm sound
    pub fn on_clock_tick(&mut self, now: DateTime<Local>) {
        self.clock.update(now);
        self.playback.refresh();
        self.publish();
    }

    /// Advance the countdown by one second, starting the alarm on expiry
    pub fn on_countdown_tick(&mut self, generation: u64) -> TickOutcome {
        let outcome = self.countdown.tick(generation);
        match outcome {
            TickOutcome::Decremented { remaining_seconds } => {
                debug!("Countdown: {}", format_time(remaining_seconds));
            }
            TickOutcome::Expired => {
                self.release_countdown_ticker();
                info!("Countdown finished, sounding the alarm");
                if let Err(e) = self.start_alarm() {
                    warn!("Alarm could not start: {}", e);
                }
            }
            TickOutcome::Stale => {
                debug!("Ignoring stale countdown tick (generation {})", generation);
            }
        }
        self.publish();
        outcome
    }

    /// Stop the alarm if it sounds, else stop a running countdown, else start one
    pub fn toggle(&mut self) -> ToggleAction {
        if self.playback.is_playing() {
            self.stop_alarm();
            ToggleAction::StoppedAlarm
        } else if self.countdown.is_active() {
            self.stop_countdown();
            ToggleAction::StoppedCountdown
        } else {
            self.start_countdown();
            ToggleAction::StartedCountdown
        }
    }

    /// Start counting down from the current selection, replacing any running countdown.
    ///
    /// Returns the generation of the new run.
    pub fn start_countdown(&mut self) -> u64 {
        let selection = self.duration;
        let generation = self.countdown.start(selection);

        self.release_countdown_ticker();
        self.countdown_ticker = Some(Ticker::spawn(
            Tick {
                source: TickSource::Countdown,
                generation,
            },
            TICK_PERIOD,
            self.events_tx.clone(),
        ));

        info!(
            "Countdown started for {} ({} seconds)",
            format_time(selection.total_seconds()),
            selection.total_seconds()
        );
        self.publish();
        generation
    }

    /// Cancel the countdown without sounding the alarm. Returns `false` if none was running.
    pub fn stop_countdown(&mut self) -> bool {
        let stopped = self.countdown.stop();
        self.release_countdown_ticker();
        if stopped {
            info!("Countdown stopped");
            self.publish();
        }
        stopped
    }

    /// Start the alarm sound
    pub fn start_alarm(&mut self) -> Result<(), PlaybackError> {
        let result = self.playback.start();
        self.publish();
        result
    }

    /// Silence the alarm. Returns `false` if it was not playing.
    pub fn stop_alarm(&mut self) -> bool {
        let stopped = self.playback.stop();
        if stopped {
            self.publish();
        }
        stopped
    }

    /// Edit the duration selector. A running countdown is unaffected.
    pub fn update_duration<F>(&mut self, action: &str, updater: F) -> DurationSelection
    where
        F: FnOnce(&mut DurationSelection),
    {
        updater(&mut self.duration);
        debug!(
            "Duration selector ({}): {}h {}m",
            action,
            self.duration.hours.get(),
            self.duration.minutes.get()
        );
        self.publish();
        self.duration
    }

    fn release_countdown_ticker(&mut self) {
        if let Some(ticker) = self.countdown_ticker.take() {
            ticker.stop();
        }
    }

    /// Push the current view to watchers if it changed
    fn publish(&self) {
        let view = self.view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }

    /// Subscribe to view updates
    pub fn subscribe_view(&self) -> watch::Receiver<View> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> View {
        build_view(
            &self.clock,
            &self.duration,
            &self.countdown,
            self.playback.is_playing(),
        )
    }

    pub fn duration(&self) -> DurationSelection {
        self.duration
    }

    pub fn countdown(&self) -> &CountdownState {
        &self.countdown
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn is_alarm_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn is_countdown_ticking(&self) -> bool {
        self.countdown_ticker
            .as_ref()
            .is_some_and(|ticker| ticker.is_running())
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            view: self.view(),
            countdown: self.countdown.phase(),
            remaining_seconds: self.countdown.remaining_seconds(),
            alarm_playing: self.playback.is_playing(),
            asset_dir: self.playback.asset_dir().display().to_string(),
        }
    }
}

fn build_view(
    clock: &ClockState,
    duration: &DurationSelection,
    countdown: &CountdownState,
    alarm_playing: bool,
) -> View {
    View {
        clock: clock.formatted(),
        background: clock.background(),
        hours: duration.hours,
        minutes: duration.minutes,
        button_label: button_label(countdown.is_active(), alarm_playing),
        time_remaining: countdown.display(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::responses::{START_LABEL, STOP_LABEL},
        services::{AudioBackend, PlaybackHandle, PlaybackStatus},
        state::{Hours, Minutes},
    };
    use std::{
        path::Path,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
    };

    struct SilentHandle;

    impl PlaybackHandle for SilentHandle {
        fn poll(&mut self) -> PlaybackStatus {
            PlaybackStatus::Playing
        }

        fn stop(&mut self) {}
    }

    struct SilentBackend;

    impl AudioBackend for SilentBackend {
        fn play(&mut self, _path: &Path) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
            Ok(Box::new(SilentHandle))
        }
    }

    /// Plays until `ended` is set, then reports the natural end of the sound
    struct EndingHandle {
        ended: Arc<AtomicBool>,
    }

    impl PlaybackHandle for EndingHandle {
        fn poll(&mut self) -> PlaybackStatus {
            if self.ended.load(Ordering::SeqCst) {
                PlaybackStatus::Finished
            } else {
                PlaybackStatus::Playing
            }
        }

        fn stop(&mut self) {}
    }

    struct EndingBackend {
        ended: Arc<AtomicBool>,
    }

    impl AudioBackend for EndingBackend {
        fn play(&mut self, _path: &Path) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
            Ok(Box::new(EndingHandle {
                ended: self.ended.clone(),
            }))
        }
    }

    struct Fixture {
        state: AppState,
        _events_rx: mpsc::UnboundedReceiver<AppEvent>,
        _assets: tempfile::TempDir,
    }

    fn fixture(with_asset: bool) -> Fixture {
        let assets = tempfile::tempdir().unwrap();
        if with_asset {
            std::fs::write(assets.path().join("AlarmSound.mp3"), b"ID3").unwrap();
        }
        let playback =
            PlaybackController::new(Box::new(SilentBackend), assets.path().to_path_buf(), false);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Fixture {
            state: AppState::new(playback, DurationSelection::default(), events_tx),
            _events_rx: events_rx,
            _assets: assets,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn start_uses_the_selection_at_that_instant() {
        let mut f = fixture(true);
        f.state.update_duration("hours", |d| d.hours = Hours::new(1).unwrap());
        f.state.start_countdown();
        assert_eq!(f.state.countdown().remaining_seconds(), Some(3600));

        f.state.update_duration("mins", |d| d.minutes = Minutes::new(45).unwrap());
        assert_eq!(f.state.countdown().remaining_seconds(), Some(3600));
        assert_eq!(f.state.duration().total_seconds(), 6300);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_walks_through_the_three_actions() {
        let mut f = fixture(true);
        assert_eq!(f.state.view().button_label, START_LABEL);

        assert_eq!(f.state.toggle(), ToggleAction::StartedCountdown);
        assert!(f.state.is_countdown_ticking());
        assert_eq!(f.state.view().button_label, STOP_LABEL);
        assert_eq!(f.state.view().time_remaining, "00:00:00");

        assert_eq!(f.state.toggle(), ToggleAction::StoppedCountdown);
        assert!(!f.state.is_countdown_ticking());
        assert_eq!(f.state.view().time_remaining, "");

        f.state.start_alarm().unwrap();
        assert_eq!(f.state.toggle(), ToggleAction::StoppedAlarm);
        assert_eq!(f.state.view().button_label, START_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn silencing_leaves_a_running_countdown_alone() {
        let mut f = fixture(true);
        f.state.start_countdown();
        f.state.start_alarm().unwrap();

        assert_eq!(f.state.toggle(), ToggleAction::StoppedAlarm);
        assert!(!f.state.is_alarm_playing());
        assert!(f.state.countdown().is_active());
        assert_eq!(f.state.view().button_label, STOP_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_idle_components_is_a_no_op() {
        let mut f = fixture(true);
        let before = f.state.view();
        assert!(!f.state.stop_countdown());
        assert!(!f.state.stop_alarm());
        assert_eq!(f.state.view(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_expires_on_the_first_tick() {
        let mut f = fixture(true);
        let generation = f.state.start_countdown();
        assert!(f.state.countdown().is_active());
        assert!(!f.state.is_alarm_playing());

        assert_eq!(f.state.on_countdown_tick(generation), TickOutcome::Expired);
        assert!(!f.state.countdown().is_active());
        assert!(!f.state.is_countdown_ticking());
        assert!(f.state.is_alarm_playing());
        assert_eq!(f.state.view().button_label, STOP_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_asset_completes_the_countdown_silently() {
        let mut f = fixture(false);
        let generation = f.state.start_countdown();

        assert_eq!(f.state.on_countdown_tick(generation), TickOutcome::Expired);
        assert!(!f.state.is_alarm_playing());
        assert_eq!(f.state.view().button_label, START_LABEL);
        assert!(matches!(
            f.state.start_alarm(),
            Err(PlaybackError::NotFound { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn sound_ending_on_its_own_restores_the_start_label() {
        let assets = tempfile::tempdir().unwrap();
        std::fs::write(assets.path().join("AlarmSound.mp3"), b"ID3").unwrap();
        let ended = Arc::new(AtomicBool::new(false));
        let backend = EndingBackend {
            ended: ended.clone(),
        };
        let playback =
            PlaybackController::new(Box::new(backend), assets.path().to_path_buf(), false);
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let mut state = AppState::new(playback, DurationSelection::default(), events_tx);
        let mut view_rx = state.subscribe_view();

        let generation = state.start_countdown();
        assert_eq!(state.on_countdown_tick(generation), TickOutcome::Expired);
        assert_eq!(view_rx.borrow_and_update().button_label, STOP_LABEL);

        // Still sounding: a clock tick changes nothing
        state.on_clock_tick(Local::now());
        assert!(state.is_alarm_playing());

        ended.store(true, Ordering::SeqCst);
        state.on_clock_tick(Local::now());
        assert!(!state.is_alarm_playing());
        assert_eq!(state.view().button_label, START_LABEL);
        assert_eq!(view_rx.borrow_and_update().button_label, START_LABEL);
        assert_eq!(state.toggle(), ToggleAction::StartedCountdown);
    }

    #[tokio::test(start_paused = true)]
    async fn view_updates_reach_subscribers() {
        let mut f = fixture(true);
        let mut view_rx = f.state.subscribe_view();
        view_rx.borrow_and_update();

        f.state.update_duration("mins", |d| d.minutes = Minutes::new(5).unwrap());
        assert!(view_rx.has_changed().unwrap());
        assert_eq!(view_rx.borrow_and_update().minutes.get(), 5);

        // Same view again: no notification
        f.state.update_duration("mins", |d| d.minutes = Minutes::new(5).unwrap());
        assert!(!view_rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_releases_everything() {
        let mut f = fixture(true);
        f.state.mount();
        assert!(f.state.is_mounted());
        f.state.start_countdown();
        f.state.start_alarm().unwrap();

        f.state.unmount();
        assert!(!f.state.is_mounted());
        assert!(!f.state.is_countdown_ticking());
        assert!(!f.state.countdown().is_active());
        assert!(!f.state.is_alarm_playing());
    }
}
