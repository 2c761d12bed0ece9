//! src/demo/screen.rs
//!
//! The customization screen: owns the control values, the control focus, the
//! host side of the plot selection, and the deferred remount of the
//! indicator.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;
use tracing::{debug, info, trace};

use crate::panels::indicator::LatestValueIndicator;
use crate::panels::plot::PlotProps;
use crate::timer::{Scheduler, TaskHandle};

use super::controls::{CONTROLS, ControlId, ControlKind, ControlValue};
use super::state::DemoState;

/// Work deferred onto a later frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Set the indicator mount gate again after a refresh.
    MountIndicator,
}

/// Text of the custom latest-value indicator.
pub const CUSTOM_INDICATOR_TEXT: &str = "CUSTOM";

/// Shared handle to the host-owned selection.
pub type Selection = Rc<Cell<Option<usize>>>;

pub struct DemoScreen {
    pub state: DemoState,
    focus: usize,
    scheduler: Scheduler<Deferred>,
    refresh_delay: Duration,
    /// Remount tasks that have not fired yet.
    mount_tasks: Vec<TaskHandle>,
    /// Bumped by every refresh so the plot remounts even if it never drew
    /// the hidden state.
    mount_generation: u64,
    selection: Selection,
}

impl DemoScreen {
    pub fn new(state: DemoState, refresh_delay: Duration) -> Self {
        Self {
            state,
            focus: 0,
            scheduler: Scheduler::new(),
            refresh_delay,
            mount_tasks: Vec::new(),
            mount_generation: 0,
            selection: Rc::new(Cell::new(None)),
        }
    }

    /// Handle for the plot's selection callback.
    pub fn selection_handle(&self) -> Selection {
        self.selection.clone()
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection.get()
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            debug!("selection cleared");
        }
    }

    pub fn focused(&self) -> ControlId {
        CONTROLS[self.focus].id
    }

    pub fn focus(&mut self, id: ControlId) {
        self.focus = id as usize;
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % CONTROLS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + CONTROLS.len() - 1) % CONTROLS.len();
    }

    /// Bound write: store the value and, for refresh controls, remount the
    /// indicator.
    pub fn write(&mut self, id: ControlId, value: ControlValue, now: Instant) {
        let spec = id.spec();
        let value = match value {
            ControlValue::Number(v) => ControlValue::Number(spec.clamp(v)),
            flag => flag,
        };
        if !self.state.set(id, value) {
            debug!(?id, ?value, "ignored write of the wrong kind");
            return;
        }
        trace!(?id, ?value, "control written");
        if spec.refresh {
            self.refresh_plot(now);
        }
    }

    /// Move a slider by `steps`; on a toggle, right sets and left clears.
    pub fn step(&mut self, id: ControlId, steps: i32, now: Instant) {
        match (id.spec().kind, self.state.get(id)) {
            (ControlKind::Slider { .. }, ControlValue::Number(v)) => {
                let next = id.spec().stepped(v, steps);
                self.write(id, ControlValue::Number(next), now);
            }
            (ControlKind::Toggle, _) if steps != 0 => {
                self.write(id, ControlValue::Flag(steps > 0), now);
            }
            _ => {}
        }
    }

    pub fn toggle(&mut self, id: ControlId, now: Instant) {
        if let ControlValue::Flag(b) = self.state.get(id) {
            self.write(id, ControlValue::Flag(!b), now);
        }
    }

    /// Set a slider from a position along its track.
    pub fn set_ratio(&mut self, id: ControlId, ratio: f64, now: Instant) {
        let spec = id.spec();
        if spec.is_slider() {
            self.write(id, ControlValue::Number(spec.from_ratio(ratio)), now);
        }
    }

    /// Hide the indicator now and mount it again after the refresh delay, so
    /// it restarts with the current glow timings.
    pub fn refresh_plot(&mut self, now: Instant) {
        self.mount_generation = self.mount_generation.wrapping_add(1);
        info!(delay = ?self.refresh_delay, generation = self.mount_generation, "refresh plot");
        self.state.indicator_mounted = false;
        let handle = self
            .scheduler
            .schedule(now, self.refresh_delay, Deferred::MountIndicator);
        self.mount_tasks.push(handle);
    }

    /// Apply deferred work that is due. Returns the number of tasks run.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.scheduler.poll(now);
        for (handle, task) in &due {
            self.mount_tasks.retain(|h| h != handle);
            match task {
                Deferred::MountIndicator => {
                    if !self.state.indicator_mounted {
                        debug!("indicator remount fired");
                    }
                    self.state.indicator_mounted = true;
                }
            }
        }
        due.len()
    }

    /// When the next deferred task is due, so the loop can wake for it.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Cancel pending remounts; called when the screen goes away.
    pub fn teardown(&mut self) {
        let dropped = self
            .mount_tasks
            .drain(..)
            .filter(|h| self.scheduler.cancel(*h))
            .count();
        if dropped > 0 {
            debug!(dropped, "cancelled pending remounts");
        }
    }

    /// Props for the plot, rebuilt from the current values.
    pub fn plot_props(&self, now: Instant, color: Color) -> PlotProps {
        PlotProps {
            config: self.state.plot_config(),
            occupied_width: self.state.relative_width,
            show_glowing_indicator: self.state.indicator_visible(),
            mount_generation: self.mount_generation,
            indicator: if self.state.use_custom_indicator {
                LatestValueIndicator::custom(CUSTOM_INDICATOR_TEXT)
            } else {
                LatestValueIndicator::Glowing
            },
            selection: self.selection(),
            color,
            now,
        }
    }

    /// Apply a key press. Returns true when the screen should close.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let magnitude = if key.modifiers.contains(KeyModifiers::SHIFT) {
            10
        } else {
            1
        };
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => self.focus_prev(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.focus_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
                self.step(self.focused(), -magnitude, now)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
                self.step(self.focused(), magnitude, now)
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(self.focused(), now),
            KeyCode::Char('r') => self.refresh_plot(now),
            KeyCode::Esc => self.clear_selection(),
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    fn screen() -> DemoScreen {
        DemoScreen::new(DemoState::new(false), DELAY)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn refresh_writes_converge_to_mounted() {
        let t0 = Instant::now();
        let mut s = screen();
        for i in 0..5u64 {
            let at = t0 + Duration::from_millis(10 * i);
            s.write(ControlId::GlowingDuration, ControlValue::Number(1.0 + i as f64 / 10.0), at);
            assert!(!s.state.indicator_mounted);
        }
        assert_eq!(s.pending_tasks(), 5);

        s.tick(t0 + Duration::from_millis(50));
        assert!(!s.state.indicator_visible());

        // the first task remounts, the rest are no-ops
        assert_eq!(s.tick(t0 + Duration::from_millis(100)), 1);
        assert!(s.state.indicator_mounted);
        assert_eq!(s.tick(t0 + Duration::from_millis(140)), 4);
        assert!(s.state.indicator_visible());
        assert_eq!(s.pending_tasks(), 0);
    }

    #[test]
    fn every_refresh_starts_a_new_mount_generation() {
        let t0 = Instant::now();
        let mut s = screen();
        let start = s.plot_props(t0, Color::Green).mount_generation;
        s.write(ControlId::GlowingScaleEffect, ControlValue::Number(8.0), t0);
        s.handle_key(key(KeyCode::Char('r'), KeyModifiers::NONE), t0);
        s.write(ControlId::LineWidth, ControlValue::Number(3.0), t0);

        let later = t0 + DELAY;
        s.tick(later);
        let props = s.plot_props(later, Color::Green);
        assert_eq!(props.mount_generation, start + 2);
        assert!(props.show_glowing_indicator);
    }

    #[test]
    fn refresh_preserves_user_choice() {
        let t0 = Instant::now();
        let mut s = screen();
        s.toggle(ControlId::ShowGlowingIndicator, t0);
        s.write(ControlId::DelayBetweenGlows, ControlValue::Number(0.2), t0);
        s.tick(t0 + DELAY);
        assert!(s.state.indicator_mounted);
        assert!(!s.state.indicator_visible());
    }

    #[test]
    fn plain_controls_do_not_refresh() {
        let t0 = Instant::now();
        let mut s = screen();
        s.write(ControlId::LineWidth, ControlValue::Number(9.0), t0);
        s.toggle(ControlId::AdjustTop, t0);
        s.step(ControlId::SegmentAnimationDuration, 3, t0);
        assert_eq!(s.pending_tasks(), 0);
        assert!(s.state.indicator_mounted);
        assert_eq!(s.state.line_width, 9.0);
        assert!(s.state.adjust_top);
    }

    #[test]
    fn writes_are_clamped_to_the_slider_range() {
        let t0 = Instant::now();
        let mut s = screen();
        s.write(ControlId::LineWidth, ControlValue::Number(50.0), t0);
        assert_eq!(s.state.line_width, 20.0);
        s.set_ratio(ControlId::IndicatorWidth, 0.5, t0);
        assert_eq!(s.state.indicator_width, 12.0);
        s.set_ratio(ControlId::AdjustTop, 0.5, t0);
        assert!(!s.state.adjust_top);
    }

    #[test]
    fn teardown_drops_pending_remount() {
        let t0 = Instant::now();
        let mut s = screen();
        s.refresh_plot(t0);
        s.write(ControlId::GlowingDuration, ControlValue::Number(1.2), t0);
        assert_eq!(s.pending_tasks(), 2);
        s.teardown();
        assert_eq!(s.pending_tasks(), 0);
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.tick(t0 + DELAY), 0);
        assert!(!s.state.indicator_mounted);
    }

    #[test]
    fn props_follow_state() {
        let t0 = Instant::now();
        let mut s = screen();
        s.write(ControlId::RelativeWidth, ControlValue::Number(0.4), t0);
        s.toggle(ControlId::UseCustomIndicator, t0);
        s.selection_handle().set(Some(7));

        let props = s.plot_props(t0, Color::Green);
        assert_eq!(props.occupied_width, 0.4);
        assert_eq!(props.indicator, LatestValueIndicator::custom(CUSTOM_INDICATOR_TEXT));
        assert_eq!(props.selection, Some(7));
        assert!(props.show_glowing_indicator);

        s.clear_selection();
        assert_eq!(s.plot_props(t0, Color::Green).selection, None);
    }

    #[test]
    fn keys_move_focus_and_adjust() {
        let t0 = Instant::now();
        let mut s = screen();
        assert_eq!(s.focused(), ControlId::RelativeWidth);
        s.handle_key(key(KeyCode::Up, KeyModifiers::NONE), t0);
        assert_eq!(s.focused(), ControlId::DelayBetweenGlows);
        s.handle_key(key(KeyCode::Down, KeyModifiers::NONE), t0);

        s.focus(ControlId::LineWidth);
        s.handle_key(key(KeyCode::Right, KeyModifiers::NONE), t0);
        assert_eq!(s.state.line_width, 2.0);
        s.handle_key(key(KeyCode::Right, KeyModifiers::SHIFT), t0);
        assert_eq!(s.state.line_width, 7.0);

        s.focus(ControlId::AdjustBottom);
        s.handle_key(key(KeyCode::Char(' '), KeyModifiers::NONE), t0);
        assert!(s.state.adjust_bottom);

        assert!(!s.handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), t0));
        assert!(s.handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE), t0));
        assert!(s.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL), t0));
    }
}
