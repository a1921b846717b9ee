//! Scripted, terminal-free run of the transition contract.
//!
//! Drives a [`TransitionHandle`] through a sequence of `KEY@DELAY_MS` updates
//! and records every visual it publishes, with the time since mount.
//!
//! ```text
//! $ wattstep timeline --initial 1 --step 2@100 --step 3@150
//! +    0ms visible=false key=1
//! +   50ms visible=true  key=1
//! +  100ms visible=false key=1
//! +  450ms visible=true  key=3
//! ```

use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use tokio::time::Instant;
use wattstep_core::{StepKey, TransitionHandle, TransitionTiming, Visual};

use crate::config::ConfigError;

/// One scripted update: wait `delay` after the previous one, then request `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    pub key: StepKey,
    pub delay: Duration,
}

impl FromStr for TimelineStep {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTimelineStep(s.to_string());
        let (key, delay) = s.trim().split_once('@').ok_or_else(invalid)?;
        let key = key.trim().parse::<StepKey>().map_err(|_| invalid())?;
        let delay_ms = delay.trim().parse::<u64>().map_err(|_| invalid())?;
        Ok(Self {
            key,
            delay: Duration::from_millis(delay_ms),
        })
    }
}

/// A published visual and when it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub at: Duration,
    pub visual: Visual,
}

impl std::fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "+{:>5}ms visible={:<5} key={}",
            self.at.as_millis(),
            self.visual.visible,
            self.visual.key
        )
    }
}

/// Runs the script and returns every observed visual, writing each to `out`.
///
/// Returns once the script is exhausted and the controller has settled.
pub async fn run_timeline<W: Write>(
    initial: StepKey,
    script: &[TimelineStep],
    timing: TransitionTiming,
    out: &mut W,
) -> Result<Vec<TimelineEntry>> {
    let started = Instant::now();
    let handle = TransitionHandle::spawn(initial, timing);
    let mut visuals = handle.subscribe();

    let mut entries = Vec::new();
    record(&mut entries, started, *visuals.borrow_and_update(), out)?;

    let mut pending = script.iter();
    let mut next = pending.next();
    let mut next_at = next.map(|step| started + step.delay);

    loop {
        if next.is_none() && handle.is_settled() && !visuals.has_changed().unwrap_or(false) {
            break;
        }

        tokio::select! {
            changed = visuals.changed() => {
                if changed.is_err() {
                    break;
                }
                let visual = *visuals.borrow_and_update();
                record(&mut entries, started, visual, out)?;
            }
            _ = sleep_until_opt(next_at) => {
                if let Some(step) = next {
                    tracing::debug!(key = step.key, "timeline update");
                    handle.update(step.key);
                }
                let previous = next_at.unwrap_or(started);
                next = pending.next();
                next_at = next.map(|step| previous + step.delay);
            }
        }
    }

    handle.dispose();
    Ok(entries)
}

fn record<W: Write>(
    entries: &mut Vec<TimelineEntry>,
    started: Instant,
    visual: Visual,
    out: &mut W,
) -> Result<()> {
    let entry = TimelineEntry {
        at: started.elapsed(),
        visual,
    };
    writeln!(out, "{entry}")?;
    entries.push(entry);
    Ok(())
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn step(key: StepKey, delay_ms: u64) -> TimelineStep {
        TimelineStep {
            key,
            delay: Duration::from_millis(delay_ms),
        }
    }

    fn visuals(entries: &[TimelineEntry]) -> Vec<Visual> {
        entries.iter().map(|e| e.visual).collect()
    }

    fn assert_near(actual: Duration, expected_ms: u64) {
        let actual_ms = actual.as_millis() as u64;
        assert!(
            actual_ms.abs_diff(expected_ms) <= 2,
            "expected ~{expected_ms}ms, got {actual_ms}ms"
        );
    }

    #[test]
    fn test_parse_timeline_step() {
        assert_eq!("2@150".parse::<TimelineStep>().unwrap(), step(2, 150));
        assert_eq!(" -4 @ 0 ".parse::<TimelineStep>().unwrap(), step(-4, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_steps() {
        for bad in ["", "2", "2@", "@150", "two@150", "2@-5", "2@1.5"] {
            let err = bad.parse::<TimelineStep>().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimelineStep(_)), "{bad}");
        }
    }

    #[test]
    fn test_entry_display() {
        let entry = TimelineEntry {
            at: Duration::from_millis(50),
            visual: Visual::shown(3),
        };
        assert_eq!(entry.to_string(), "+   50ms visible=true  key=3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeline_mount_only() {
        let mut out = Vec::new();
        let entries = run_timeline(1, &[], TransitionTiming::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(visuals(&entries), vec![Visual::hidden(1), Visual::shown(1)]);
        assert_near(entries[1].at, 50);

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeline_single_change() {
        let mut out = Vec::new();
        let entries = run_timeline(1, &[step(2, 100)], TransitionTiming::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(
            visuals(&entries),
            vec![
                Visual::hidden(1),
                Visual::shown(1),
                Visual::hidden(1),
                Visual::shown(2)
            ]
        );
        assert_near(entries[2].at, 100);
        assert_near(entries[3].at, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeline_rapid_changes_skip_intermediate() {
        let mut out = Vec::new();
        let script = [step(2, 100), step(3, 150)];
        let entries = run_timeline(1, &script, TransitionTiming::default(), &mut out)
            .await
            .unwrap();

        assert!(entries.iter().all(|e| e.visual.key != 2));
        let last = entries.last().unwrap();
        assert_eq!(last.visual, Visual::shown(3));
        assert_near(last.at, 450);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeline_repeated_key_is_quiet() {
        let mut out = Vec::new();
        let script = [step(1, 100), step(1, 100)];
        let entries = run_timeline(1, &script, TransitionTiming::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(visuals(&entries), vec![Visual::hidden(1), Visual::shown(1)]);
    }
}
