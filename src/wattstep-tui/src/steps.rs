//! Onboarding step content and wizard navigation.
//!
//! Steps are display data only: the transition controller never sees them,
//! it only sees the [`StepKey`] the wizard derives from the selected index.

use serde::{Deserialize, Serialize};
use wattstep_core::StepKey;

/// Title and body of one onboarding step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl StepContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Built-in onboarding flow used when the configuration defines no steps.
pub fn default_steps() -> Vec<StepContent> {
    vec![
        StepContent::new(
            "Welcome",
            "Track what your home uses, when it uses it, and what it costs.\n\
             This short setup takes about two minutes.",
        ),
        StepContent::new(
            "Connect your meter",
            "Enter the serial number printed on the front of your smart meter.\n\
             Readings start arriving within 24 hours.",
        ),
        StepContent::new(
            "Choose your tariff",
            "Pick the tariff on your latest bill so cost estimates match what\n\
             your supplier charges.",
        ),
        StepContent::new(
            "Invite a friend",
            "Share your referral link. You both get credit once their first\n\
             bill is paid.",
        ),
        StepContent::new(
            "You're all set",
            "Your dashboard fills in as readings arrive. Questions? Reach\n\
             support from the help menu at any time.",
        ),
    ]
}

/// Ordered list of steps with a selected index.
///
/// Keys are 1-based (`index + 1`). Navigation is clamped to the valid range;
/// the transition controller has no notion of it.
#[derive(Debug, Clone)]
pub struct Wizard {
    steps: Vec<StepContent>,
    index: usize,
}

impl Wizard {
    /// Creates a wizard starting at `start_index` (clamped).
    pub fn new(steps: Vec<StepContent>, start_index: usize) -> Self {
        let index = start_index.min(steps.len().saturating_sub(1));
        Self { steps, index }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Key of the selected step.
    pub fn current_key(&self) -> StepKey {
        Self::key_for(self.index)
    }

    pub fn key_for(index: usize) -> StepKey {
        index as StepKey + 1
    }

    /// Content for a key, if it names a step.
    pub fn content(&self, key: StepKey) -> Option<&StepContent> {
        let index = usize::try_from(key.checked_sub(1)?).ok()?;
        self.steps.get(index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.steps.len()
    }

    /// Selects `index` if it exists. Returns `true` if the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.steps.len() || index == self.index {
            return false;
        }
        self.index = index;
        true
    }

    pub fn next(&mut self) -> bool {
        self.select(self.index + 1)
    }

    pub fn prev(&mut self) -> bool {
        match self.index.checked_sub(1) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    pub fn first(&mut self) -> bool {
        self.select(0)
    }

    pub fn last(&mut self) -> bool {
        self.select(self.steps.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard(n: usize) -> Wizard {
        let steps = (0..n)
            .map(|i| StepContent::new(format!("Step {i}"), ""))
            .collect();
        Wizard::new(steps, 0)
    }

    #[test]
    fn test_default_steps_are_populated() {
        let steps = default_steps();
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|s| !s.title.is_empty() && !s.body.is_empty()));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut w = wizard(3);
        assert!(w.is_first());
        assert!(!w.prev());
        assert!(w.next());
        assert!(w.next());
        assert!(w.is_last());
        assert!(!w.next());
        assert_eq!(w.current_key(), 3);

        assert!(w.first());
        assert_eq!(w.current_key(), 1);
        assert!(!w.first());
        assert!(w.last());
        assert_eq!(w.index(), 2);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut w = wizard(2);
        assert!(!w.select(5));
        assert_eq!(w.index(), 0);
    }

    #[test]
    fn test_start_index_is_clamped() {
        let w = Wizard::new(default_steps(), 42);
        assert_eq!(w.index(), 4);
        assert_eq!(w.current_key(), 5);
    }

    #[test]
    fn test_content_lookup_by_key() {
        let w = wizard(2);
        assert_eq!(w.content(1).map(|s| s.title.as_str()), Some("Step 0"));
        assert_eq!(w.content(2).map(|s| s.title.as_str()), Some("Step 1"));
        assert!(w.content(0).is_none());
        assert!(w.content(3).is_none());
        assert!(w.content(-1).is_none());
        assert!(w.content(i64::MIN).is_none());
    }
}
