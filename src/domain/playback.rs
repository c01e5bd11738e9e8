// SPDX-License-Identifier: MPL-2.0
//! Video playback state machine and observers.
//!
//! A [`PlaybackSession`] is the playback surface of a video item. Interested
//! parties (progress bars, play buttons) subscribe with a callback instead of
//! polling, and every subscription is dropped when the session is torn down.

use std::fmt;
use std::time::Duration;

/// Represents the current playback state of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Video is stopped (at beginning or end).
    #[default]
    Stopped,
    /// Video is currently playing.
    Playing,
    /// Video is paused at current position.
    Paused,
}

impl PlaybackState {
    /// Returns true if the video is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the video is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if the video is stopped.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Notification delivered to playback subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    StateChanged(PlaybackState),
    Progress {
        position: Duration,
        duration: Option<Duration>,
    },
}

/// Handle returned by [`PlaybackSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&PlaybackEvent) + Send>;

/// Playback surface bound to a video URL.
pub struct PlaybackSession {
    url: String,
    state: PlaybackState,
    position: Duration,
    duration: Option<Duration>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("url", &self.url)
            .field("state", &self.state)
            .field("position", &self.position)
            .field("duration", &self.duration)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PlaybackSession {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: PlaybackState::Stopped,
            position: Duration::ZERO,
            duration: None,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn position(&self) -> Duration {
        self.position
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Playback progress in `0.0..=1.0`, or `None` while the duration is unknown.
    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        let duration = self.duration.filter(|d| !d.is_zero())?;
        Some((self.position.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0))
    }

    /// Registers a callback invoked on every state or progress change.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&PlaybackEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn play(&mut self) {
        self.set_state(PlaybackState::Playing);
    }

    pub fn pause(&mut self) {
        if self.state.is_playing() {
            self.set_state(PlaybackState::Paused);
        }
    }

    pub fn toggle(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seeks to a fraction of the known duration. Ignored while the duration is unknown.
    pub fn seek(&mut self, fraction: f32) {
        let Some(duration) = self.duration else {
            return;
        };
        let position = duration.mul_f32(fraction.clamp(0.0, 1.0));
        self.report_progress(position, Some(duration));
    }

    /// Records progress reported by the player backend.
    pub fn report_progress(&mut self, position: Duration, duration: Option<Duration>) {
        self.position = position;
        if duration.is_some() {
            self.duration = duration;
        }
        self.notify(PlaybackEvent::Progress {
            position: self.position,
            duration: self.duration,
        });
    }

    /// Marks the end of the stream.
    pub fn finish(&mut self) {
        self.position = Duration::ZERO;
        self.set_state(PlaybackState::Stopped);
    }

    /// Stops playback and drops every observer.
    pub fn teardown(&mut self) {
        if !self.state.is_stopped() {
            self.set_state(PlaybackState::Stopped);
        }
        self.observers.clear();
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.notify(PlaybackEvent::StateChanged(state));
    }

    fn notify(&mut self, event: PlaybackEvent) {
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(
        session: &mut PlaybackSession,
    ) -> (SubscriptionId, Arc<Mutex<Vec<PlaybackEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let id = session.subscribe(move |event| sink.lock().expect("lock").push(*event));
        (id, events)
    }

    #[test]
    fn default_state_is_stopped() {
        assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
        assert!(PlaybackSession::new("file.mp4").state().is_stopped());
    }

    #[test]
    fn toggle_alternates_between_playing_and_paused() {
        let mut session = PlaybackSession::new("file.mp4");
        session.toggle();
        assert!(session.state().is_playing());
        session.toggle();
        assert!(session.state().is_paused());
    }

    #[test]
    fn subscribers_receive_state_and_progress() {
        let mut session = PlaybackSession::new("file.mp4");
        let (_, events) = recorder(&mut session);

        session.play();
        session.report_progress(Duration::from_secs(5), Some(Duration::from_secs(10)));

        let events = events.lock().expect("lock");
        assert_eq!(events[0], PlaybackEvent::StateChanged(PlaybackState::Playing));
        assert!(matches!(events[1], PlaybackEvent::Progress { .. }));
        assert_eq!(session.progress(), Some(0.5));
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut session = PlaybackSession::new("file.mp4");
        let (id, events) = recorder(&mut session);

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.play();
        assert!(events.lock().expect("lock").is_empty());
    }

    #[test]
    fn seek_requires_known_duration() {
        let mut session = PlaybackSession::new("file.mp4");
        session.seek(0.5);
        assert_eq!(session.position(), Duration::ZERO);

        session.report_progress(Duration::ZERO, Some(Duration::from_secs(8)));
        session.seek(0.25);
        assert_eq!(session.position(), Duration::from_secs(2));
    }

    #[test]
    fn teardown_stops_and_clears_observers() {
        let mut session = PlaybackSession::new("file.mp4");
        let (_, events) = recorder(&mut session);
        session.play();

        session.teardown();

        assert!(session.state().is_stopped());
        assert_eq!(session.observer_count(), 0);
        assert_eq!(
            events.lock().expect("lock").last(),
            Some(&PlaybackEvent::StateChanged(PlaybackState::Stopped))
        );
    }
}
