//! Onboarding host state: wizard selection, transition controller, fade.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wattstep_core::{StepTransition, TransitionTiming, Visual};

use crate::config::HostConfig;
use crate::steps::{StepContent, Wizard};
use crate::visual::{FadeTracker, VisualHints};

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Prev,
    First,
    Last,
    /// Zero-based step index.
    Jump(usize),
    Quit,
}

impl NavAction {
    /// Maps a key press to an action; unbound keys map to `None`.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Self::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char(' ') => {
                Some(Self::Next)
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => Some(Self::Prev),
            KeyCode::Home => Some(Self::First),
            KeyCode::End => Some(Self::Last),
            KeyCode::Char(c @ '1'..='9') => Some(Self::Jump(c as usize - '1' as usize)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The rendering host for one onboarding session.
///
/// Owns the controller for as long as the wizard is on screen and disposes it
/// on [`App::shutdown`] (or when dropped).
pub struct App {
    wizard: Wizard,
    transition: StepTransition,
    fade: FadeTracker,
    should_quit: bool,
}

impl App {
    pub fn new(config: &HostConfig, start_index: usize, now: Instant) -> Self {
        let wizard = Wizard::new(config.steps.clone(), start_index);
        let transition = StepTransition::new_at(wizard.current_key(), config.transition, now);
        let fade = FadeTracker::new(
            transition.current_visual(),
            fade_length(transition.timing()),
            now,
        );
        Self {
            wizard,
            transition,
            fade,
            should_quit: false,
        }
    }

    /// Applies a key press at `now`.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if let Some(action) = NavAction::from_key(key) {
            self.apply(action, now);
        }
    }

    pub fn apply(&mut self, action: NavAction, now: Instant) {
        let moved = match action {
            NavAction::Next => self.wizard.next(),
            NavAction::Prev => self.wizard.prev(),
            NavAction::First => self.wizard.first(),
            NavAction::Last => self.wizard.last(),
            NavAction::Jump(index) => self.wizard.select(index),
            NavAction::Quit => {
                self.should_quit = true;
                false
            }
        };
        if moved {
            tracing::debug!(index = self.wizard.index(), ?action, "wizard navigated");
            self.transition.update_at(self.wizard.current_key(), now);
            self.fade.observe(self.transition.current_visual(), now);
        }
    }

    /// Advances timers to `now`. Returns `true` if the visual changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.transition.tick(now);
        if changed {
            self.fade.observe(self.transition.current_visual(), now);
        }
        changed
    }

    /// Releases the controller. Further navigation still moves the wizard
    /// but no longer changes what is displayed.
    pub fn shutdown(&mut self) {
        self.transition.dispose();
    }

    /// Returns `true` while a transition timer is pending or a fade is still
    /// running at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.phase().is_animating() || self.fade.is_animating(now)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn visual(&self) -> Visual {
        self.transition.current_visual()
    }

    pub fn hints(&self, now: Instant) -> VisualHints {
        self.fade.hints(now)
    }

    /// Content of the step currently displayed (not necessarily selected).
    pub fn displayed_content(&self) -> Option<&StepContent> {
        self.wizard.content(self.visual().key)
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn transition(&self) -> &StepTransition {
        &self.transition
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.transition.dispose();
    }
}

/// A visual fade spans the controller's fade delay so the old step has
/// faded out by the time it is swapped.
fn fade_length(timing: TransitionTiming) -> Duration {
    timing.fade_delay()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(NavAction::from_key(key(KeyCode::Right)), Some(NavAction::Next));
        assert_eq!(NavAction::from_key(key(KeyCode::Enter)), Some(NavAction::Next));
        assert_eq!(NavAction::from_key(key(KeyCode::Char('h'))), Some(NavAction::Prev));
        assert_eq!(NavAction::from_key(key(KeyCode::Home)), Some(NavAction::First));
        assert_eq!(NavAction::from_key(key(KeyCode::End)), Some(NavAction::Last));
        assert_eq!(NavAction::from_key(key(KeyCode::Char('3'))), Some(NavAction::Jump(2)));
        assert_eq!(NavAction::from_key(key(KeyCode::Esc)), Some(NavAction::Quit));
        assert_eq!(
            NavAction::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(NavAction::Quit)
        );
        assert_eq!(NavAction::from_key(key(KeyCode::Char('x'))), None);
        assert_eq!(NavAction::from_key(key(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_app_mounts_then_navigates() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        assert_eq!(app.visual(), Visual::hidden(1));

        assert!(app.tick(t0 + ms(50)));
        assert_eq!(app.visual(), Visual::shown(1));
        assert_eq!(app.displayed_content().map(|s| s.title.as_str()), Some("Welcome"));

        let mut press = key(KeyCode::Right);
        press.kind = KeyEventKind::Press;
        app.handle_key(press, t0 + ms(100));
        assert_eq!(app.wizard().index(), 1);
        assert_eq!(app.visual(), Visual::hidden(1));

        assert!(!app.tick(t0 + ms(299)));
        assert!(app.tick(t0 + ms(300)));
        assert_eq!(app.visual(), Visual::shown(2));
        assert_eq!(
            app.displayed_content().map(|s| s.title.as_str()),
            Some("Connect your meter")
        );
    }

    #[test]
    fn test_rapid_navigation_skips_middle_step() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        app.tick(t0 + ms(50));

        app.apply(NavAction::Next, t0 + ms(100));
        app.apply(NavAction::Next, t0 + ms(150));
        assert!(!app.tick(t0 + ms(300)));
        assert_eq!(app.visual(), Visual::hidden(1));

        assert!(app.tick(t0 + ms(350)));
        assert_eq!(app.visual(), Visual::shown(3));
    }

    #[test]
    fn test_clamped_navigation_does_not_restart_fade() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        app.tick(t0 + ms(50));

        app.apply(NavAction::Prev, t0 + ms(100));
        assert_eq!(app.visual(), Visual::shown(1));
        assert!(app.transition().is_settled());
    }

    #[test]
    fn test_fade_hints_follow_visibility() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        assert_eq!(app.hints(t0).opacity, 0.0);

        app.tick(t0 + ms(50));
        assert!((app.hints(t0 + ms(250)).opacity - 1.0).abs() < 0.001);

        app.apply(NavAction::Next, t0 + ms(300));
        let fading = app.hints(t0 + ms(400)).opacity;
        assert!(fading > 0.0 && fading < 1.0);
    }

    #[test]
    fn test_is_animating_until_fade_completes() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        assert!(app.is_animating(t0));

        app.tick(t0 + ms(50));
        assert!(app.is_animating(t0 + ms(100)));
        assert!(!app.is_animating(t0 + ms(250)));

        app.apply(NavAction::Next, t0 + ms(300));
        assert!(app.is_animating(t0 + ms(300)));
        app.tick(t0 + ms(500));
        assert!(app.is_animating(t0 + ms(600)));
        assert!(!app.is_animating(t0 + ms(700)));
    }

    #[test]
    fn test_fade_length_follows_configured_delay() {
        let t0 = Instant::now();
        let mut config = HostConfig::default();
        config.transition = TransitionTiming::new(ms(50), ms(400));
        let mut app = App::new(&config, 0, t0);
        app.tick(t0 + ms(50));

        assert!(app.hints(t0 + ms(250)).opacity < 1.0);
        assert!((app.hints(t0 + ms(450)).opacity - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_quit_and_shutdown() {
        let t0 = Instant::now();
        let mut app = App::new(&HostConfig::default(), 0, t0);
        app.apply(NavAction::Quit, t0);
        assert!(app.should_quit());

        app.shutdown();
        assert!(app.transition().is_disposed());
        app.apply(NavAction::Next, t0 + ms(10));
        assert!(!app.tick(t0 + ms(1_000)));
        assert_eq!(app.visual(), Visual::hidden(1));
    }
}
