//! The detail sheet state machine.
//!
//! `DetailSheet` owns the sheet's vertical offset and its open/closed/dragging
//! lifecycle. The host only tells it which station is shown ([`DetailSheet::show`])
//! and forwards input; the sheet reports back through [`SheetEvent`] values.
//!
//! ```text
//! Closed --show(id)--> Settling(Partial) --settled--> Open(Partial)
//!   ^                        |    ^                        |
//!   |                    drag claim   \--release/resolve---+-- Dragging
//!   +--settled(Closed)-- Settling(Closed) <--show(None)----+
//! ```

use crate::gesture::GestureTracker;
use crate::snap::{self, SnapPoint, SnapPoints};
use crate::spring::AnimationDriver;
use std::time::Duration;

/// Lifecycle of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetPhase {
    Closed,
    /// Animating toward a snap point.
    Settling(SnapPoint),
    /// Resting on `Full` or `Partial`.
    Open(SnapPoint),
    Dragging,
}

/// Notifications for the host screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetEvent {
    /// The sheet came to rest off-screen while showing a station.
    Closed,
    Refill(String),
    AddComment { station_id: String, text: String },
}

#[derive(Debug, Clone)]
pub struct DetailSheet {
    points: SnapPoints,
    driver: AnimationDriver,
    gesture: GestureTracker,
    phase: SheetPhase,
    station_id: Option<String>,
    liked: bool,
    favorited: bool,
    draft: String,
}

impl DetailSheet {
    /// A closed sheet laid out for `points`.
    pub fn new(points: SnapPoints) -> Self {
        Self {
            points,
            driver: AnimationDriver::new(points.closed),
            gesture: GestureTracker::new(),
            phase: SheetPhase::Closed,
            station_id: None,
            liked: false,
            favorited: false,
            draft: String::new(),
        }
    }

    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    pub fn points(&self) -> SnapPoints {
        self.points
    }

    /// Current vertical offset to render.
    pub fn offset(&self) -> f64 {
        self.driver.position()
    }

    pub fn station_id(&self) -> Option<&str> {
        self.station_id.as_deref()
    }

    /// Whether the host needs to keep ticking the animation clock.
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Point the sheet at a station, or at nothing.
    ///
    /// A different station resets the per-station toggles and brings the sheet
    /// to `Partial` from wherever it is. The same station again is a no-op.
    pub fn show(&mut self, station_id: Option<&str>) {
        match station_id {
            Some(id) if self.station_id.as_deref() == Some(id) => {}
            Some(id) => {
                log::debug!("sheet showing station {}", id);
                self.driver.stop();
                self.gesture.cancel();
                self.station_id = Some(id.to_string());
                self.liked = false;
                self.favorited = false;
                self.draft.clear();
                self.settle(SnapPoint::Partial);
            }
            None => {
                self.station_id = None;
                self.gesture.cancel();
                if self.phase != SheetPhase::Closed {
                    self.settle(SnapPoint::Closed);
                }
            }
        }
    }

    /// Viewport changed; recompute snap points and keep a resting sheet on its point.
    pub fn resize(&mut self, points: SnapPoints) {
        if points == self.points {
            return;
        }
        self.points = points;
        match self.phase {
            SheetPhase::Closed => self.driver.set_position(points.closed),
            SheetPhase::Open(point) => self.driver.set_position(points.offset(point)),
            SheetPhase::Settling(point) => self.driver.animate_to(points.offset(point)),
            SheetPhase::Dragging => {}
        }
    }

    /// Pointer went down on the drag handle.
    /// Ignored while closed or while closing with no station attached.
    pub fn drag_start(&mut self) {
        if self.phase != SheetPhase::Closed && self.station_id.is_some() {
            self.gesture.begin();
        }
    }

    /// Pointer moved; `dy` is cumulative since `drag_start`.
    ///
    /// Returns true while the sheet owns the gesture.
    pub fn drag_move(&mut self, dy: f64) -> bool {
        if self.gesture.wants_claim(dy) {
            let baseline = self.driver.stop();
            self.gesture.claim(baseline);
            self.phase = SheetPhase::Dragging;
        }
        match self.gesture.candidate(dy, &self.points) {
            Some(candidate) => {
                self.driver.set_position(candidate);
                true
            }
            None => false,
        }
    }

    /// Pointer lifted with cumulative delta `dy` and velocity `vy` (px/ms).
    pub fn drag_end(&mut self, dy: f64, vy: f64) {
        if let Some(projected) = self.gesture.release(dy, vy) {
            let target = snap::resolve(projected, &self.points);
            log::debug!("drag released at {:.1}, settling to {:?}", projected, target);
            self.settle(target);
        }
    }

    /// Advance the animation clock.
    pub fn tick(&mut self, dt: Duration) -> Option<SheetEvent> {
        self.driver.tick(dt)?;
        match self.phase {
            SheetPhase::Settling(SnapPoint::Closed) => {
                self.phase = SheetPhase::Closed;
                // a sheet closed by the host has no station left to report
                self.station_id.take().map(|_| SheetEvent::Closed)
            }
            SheetPhase::Settling(point) => {
                self.phase = SheetPhase::Open(point);
                None
            }
            _ => None,
        }
    }

    fn settle(&mut self, target: SnapPoint) {
        self.phase = SheetPhase::Settling(target);
        self.driver.animate_to(self.points.offset(target));
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn favorited(&self) -> bool {
        self.favorited
    }

    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
    }

    pub fn toggle_favorite(&mut self) {
        self.favorited = !self.favorited;
    }

    /// Like count including the viewer's own like.
    pub fn like_count(&self, base: u32) -> u32 {
        base + u32::from(self.liked)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Send the comment draft. Blank drafts are kept and nothing is sent.
    pub fn submit_comment(&mut self) -> Option<SheetEvent> {
        let station_id = self.station_id.clone()?;
        if self.draft.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.draft);
        Some(SheetEvent::AddComment { station_id, text })
    }

    pub fn refill(&self) -> Option<SheetEvent> {
        self.station_id.clone().map(SheetEvent::Refill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn sheet() -> DetailSheet {
        DetailSheet::new(SnapPoints::for_sheet_height(800.0))
    }

    /// Tick until the spring rests, collecting events.
    fn settle(sheet: &mut DetailSheet) -> Vec<SheetEvent> {
        let mut events = Vec::new();
        for _ in 0..600 {
            if !sheet.is_animating() {
                break;
            }
            events.extend(sheet.tick(FRAME));
        }
        assert!(!sheet.is_animating(), "sheet never settled");
        events
    }

    fn drag(sheet: &mut DetailSheet, moves: &[f64], vy: f64) -> Vec<SheetEvent> {
        let mut events = Vec::new();
        sheet.drag_start();
        for dy in moves {
            sheet.drag_move(*dy);
            events.extend(sheet.tick(FRAME));
        }
        sheet.drag_end(*moves.last().unwrap_or(&0.0), vy);
        events
    }

    #[test]
    fn starts_closed_off_screen() {
        let sheet = sheet();
        assert_eq!(sheet.phase(), SheetPhase::Closed);
        assert_eq!(sheet.offset(), 820.0);
        assert_eq!(sheet.station_id(), None);
    }

    #[test]
    fn selecting_opens_to_partial() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Partial));
        assert!(settle(&mut sheet).is_empty());
        assert_eq!(sheet.phase(), SheetPhase::Open(SnapPoint::Partial));
        assert_eq!(sheet.offset(), 160.0);
    }

    #[test]
    fn reselecting_same_station_is_a_noop() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        sheet.toggle_like();
        sheet.show(Some("a"));
        assert!(sheet.liked());
        assert_eq!(sheet.phase(), SheetPhase::Open(SnapPoint::Partial));
    }

    #[test]
    fn new_station_resets_toggles_and_repositions() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        drag(&mut sheet, &[-40.0, -120.0, -160.0], 0.0);
        settle(&mut sheet);
        assert_eq!(sheet.phase(), SheetPhase::Open(SnapPoint::Full));
        sheet.toggle_like();
        sheet.toggle_favorite();

        sheet.show(Some("b"));
        assert!(!sheet.liked());
        assert!(!sheet.favorited());
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Partial));
        assert!(settle(&mut sheet).is_empty());
        assert_eq!(sheet.offset(), 160.0);
        assert_eq!(sheet.station_id(), Some("b"));
    }

    #[test]
    fn drag_tracks_directly_without_animation() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        sheet.drag_start();
        assert!(!sheet.drag_move(3.0));
        assert_eq!(sheet.offset(), 160.0);
        assert!(sheet.drag_move(50.0));
        assert_eq!(sheet.phase(), SheetPhase::Dragging);
        assert_eq!(sheet.offset(), 210.0);
        assert!(!sheet.is_animating());
        assert!(sheet.drag_move(-1000.0));
        assert_eq!(sheet.offset(), 0.0);
    }

    #[test]
    fn drag_during_settle_starts_from_live_value() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        for _ in 0..4 {
            sheet.tick(FRAME);
        }
        let live = sheet.offset();
        sheet.drag_start();
        sheet.drag_move(10.0);
        assert_eq!(sheet.offset(), live + 10.0);
        assert!(!sheet.is_animating());
    }

    #[test]
    fn tap_does_not_interrupt_settle() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        sheet.tick(FRAME);
        sheet.drag_start();
        sheet.drag_move(2.0);
        sheet.drag_end(2.0, 0.0);
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Partial));
        assert!(sheet.is_animating());
    }

    #[test]
    fn closing_drag_notifies_once_after_settle() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);

        // dragging all the way to the bottom never notifies mid-drag
        let during = drag(&mut sheet, &[100.0, 400.0, 700.0], 0.0);
        assert!(during.is_empty());
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Closed));

        let events = settle(&mut sheet);
        assert_eq!(events, vec![SheetEvent::Closed]);
        assert_eq!(sheet.phase(), SheetPhase::Closed);
        assert_eq!(sheet.station_id(), None);

        for _ in 0..20 {
            assert_eq!(sheet.tick(FRAME), None);
        }
    }

    #[test]
    fn flick_down_from_partial_closes() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        drag(&mut sheet, &[20.0, 40.0], 6.0);
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Closed));
        assert_eq!(settle(&mut sheet), vec![SheetEvent::Closed]);
    }

    #[test]
    fn short_drag_returns_to_partial() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        drag(&mut sheet, &[20.0, 60.0], 0.0);
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Partial));
        assert!(settle(&mut sheet).is_empty());
        assert_eq!(sheet.phase(), SheetPhase::Open(SnapPoint::Partial));
    }

    #[test]
    fn redirected_close_never_notifies() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        drag(&mut sheet, &[300.0, 600.0], 0.0);
        sheet.tick(FRAME);
        // grabbed again before it finished closing, then thrown back up
        let events = drag(&mut sheet, &[-200.0, -750.0], 0.0);
        assert!(events.is_empty());
        assert!(settle(&mut sheet).is_empty());
        assert_eq!(sheet.phase(), SheetPhase::Open(SnapPoint::Full));
    }

    #[test]
    fn host_deselect_closes_silently() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        sheet.show(None);
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Closed));
        assert!(settle(&mut sheet).is_empty());
        assert_eq!(sheet.phase(), SheetPhase::Closed);
        assert_eq!(sheet.offset(), 820.0);
    }

    #[test]
    fn deselected_sheet_cannot_be_dragged_back_open() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        sheet.show(None);
        sheet.tick(FRAME);
        assert!(drag(&mut sheet, &[-300.0, -900.0], -2.0).is_empty());
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Closed));
        assert!(settle(&mut sheet).is_empty());
        assert_eq!(sheet.phase(), SheetPhase::Closed);
        assert_eq!(sheet.offset(), 820.0);
    }

    #[test]
    fn closed_sheet_ignores_drags() {
        let mut sheet = sheet();
        sheet.drag_start();
        assert!(!sheet.drag_move(-300.0));
        sheet.drag_end(-300.0, -2.0);
        assert_eq!(sheet.phase(), SheetPhase::Closed);
        assert_eq!(sheet.offset(), 820.0);
    }

    #[test]
    fn reopening_after_close_works_for_same_station() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        drag(&mut sheet, &[700.0], 0.0);
        assert_eq!(settle(&mut sheet), vec![SheetEvent::Closed]);
        sheet.show(Some("a"));
        assert_eq!(sheet.phase(), SheetPhase::Settling(SnapPoint::Partial));
    }

    #[test]
    fn resize_keeps_resting_sheet_on_its_point() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        settle(&mut sheet);
        sheet.resize(SnapPoints::for_sheet_height(600.0));
        assert_eq!(sheet.offset(), 120.0);
        sheet.show(None);
        settle(&mut sheet);
        sheet.resize(SnapPoints::for_sheet_height(1000.0));
        assert_eq!(sheet.offset(), 1020.0);
    }

    #[test]
    fn like_count_includes_own_like() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        assert_eq!(sheet.like_count(7), 7);
        sheet.toggle_like();
        assert_eq!(sheet.like_count(7), 8);
        sheet.toggle_like();
        assert_eq!(sheet.like_count(7), 7);
    }

    #[test]
    fn comment_submission() {
        let mut sheet = sheet();
        sheet.show(Some("a"));
        sheet.set_draft("   ");
        assert_eq!(sheet.submit_comment(), None);
        assert_eq!(sheet.draft(), "   ");

        sheet.set_draft("sem ração");
        assert_eq!(
            sheet.submit_comment(),
            Some(SheetEvent::AddComment {
                station_id: "a".to_string(),
                text: "sem ração".to_string(),
            })
        );
        assert_eq!(sheet.draft(), "");
    }

    #[test]
    fn refill_reports_current_station() {
        let mut sheet = sheet();
        assert_eq!(sheet.refill(), None);
        sheet.show(Some("a"));
        assert_eq!(sheet.refill(), Some(SheetEvent::Refill("a".to_string())));
    }
}
