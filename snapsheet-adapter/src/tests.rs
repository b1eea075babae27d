use crate::*;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use snapsheet::{
    DragIndicator, DragOutcome, DragSample, Insets, OffsetObservation, PresentableConfiguration,
    PresentationSize, Rect, ScrollRegion, SheetState, Viewport,
};

#[derive(Debug)]
struct RecordingHost {
    viewport: Viewport,
    origins: Vec<f32>,
    dimming: Vec<bool>,
    indicator: Option<DragIndicator>,
    insets: Vec<f32>,
}

impl RecordingHost {
    fn new(height: f32) -> Self {
        Self {
            viewport: Viewport::new(400.0, height, Insets::default()),
            origins: Vec::new(),
            dimming: Vec::new(),
            indicator: None,
            insets: Vec::new(),
        }
    }

    fn last_origin(&self) -> Option<f32> {
        self.origins.last().copied()
    }
}

impl SheetHost for RecordingHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_sheet_origin(&mut self, origin: f32) {
        self.origins.push(origin);
    }

    fn set_dimming_visible(&mut self, visible: bool) {
        self.dimming.push(visible);
    }

    fn set_drag_indicator(&mut self, indicator: Option<DragIndicator>) {
        self.indicator = indicator;
    }

    fn set_content_bottom_inset(&mut self, inset: f32) {
        self.insets.push(inset);
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Configure,
    WillTransition(PresentationSize),
    DidTransition(PresentationSize),
}

#[derive(Debug, Default)]
struct RegionState {
    frame: Rect,
    offset: f32,
    dragging: bool,
}

struct SharedRegion(Rc<RefCell<RegionState>>);

impl ScrollRegion for SharedRegion {
    fn frame(&self) -> Rect {
        self.0.borrow().frame
    }

    fn content_offset(&self) -> f32 {
        self.0.borrow().offset
    }

    fn set_content_offset(&mut self, offset: f32) {
        self.0.borrow_mut().offset = offset;
    }

    fn is_dragging(&self) -> bool {
        self.0.borrow().dragging
    }
}

struct ScriptedContent {
    sizes: Vec<PresentationSize>,
    calls: Rc<RefCell<Vec<Call>>>,
    veto: Rc<Cell<bool>>,
    measured: Rc<Cell<f32>>,
    region: Option<SharedRegion>,
    dismissable: bool,
    tap_outside: bool,
    tap: TapResponse,
}

impl ScriptedContent {
    fn new(sizes: Vec<PresentationSize>) -> Self {
        Self {
            sizes,
            calls: Rc::new(RefCell::new(Vec::new())),
            veto: Rc::new(Cell::new(false)),
            measured: Rc::new(Cell::new(0.0)),
            region: None,
            dismissable: true,
            tap_outside: true,
            tap: TapResponse::Dismiss,
        }
    }

    fn with_region(mut self, state: Rc<RefCell<RegionState>>) -> Self {
        self.region = Some(SharedRegion(state));
        self
    }

    fn count(calls: &RefCell<Vec<Call>>, call: &Call) -> usize {
        calls.borrow().iter().filter(|c| *c == call).count()
    }
}

impl Presentable for ScriptedContent {
    fn preferred_presentation_size(&self) -> Vec<PresentationSize> {
        self.sizes.clone()
    }

    fn scroll_region(&mut self) -> Option<&mut dyn ScrollRegion> {
        let region: &mut dyn ScrollRegion = self.region.as_mut()?;
        Some(region)
    }

    fn configure(&mut self, config: &mut PresentableConfiguration) {
        self.calls.borrow_mut().push(Call::Configure);
        config.drag_indicator.visible = false;
        config.is_dismissable = self.dismissable;
        config.tap_outside_to_dismiss = self.tap_outside;
    }

    fn measure_content(&mut self, _width: f32) -> f32 {
        self.measured.get()
    }

    fn on_background_tap(&mut self) -> TapResponse {
        self.tap
    }

    fn should_transition(&mut self, _to: &PresentationSize) -> bool {
        !self.veto.get()
    }

    fn will_transition(&mut self, to: &PresentationSize) {
        self.calls
            .borrow_mut()
            .push(Call::WillTransition(to.clone()));
    }

    fn did_transition(&mut self, to: &PresentationSize) {
        self.calls
            .borrow_mut()
            .push(Call::DidTransition(to.clone()));
    }
}

/// Presents `content` on an 800pt container and runs the entry animation to the end.
fn presented(content: ScriptedContent) -> PresentationSession<RecordingHost> {
    let mut s = PresentationSession::new(RecordingHost::new(800.0));
    assert!(s.present(Box::new(content), 0));
    s.tick(300);
    assert_eq!(s.phase(), SessionPhase::Presented);
    s
}

fn content_then_large() -> ScriptedContent {
    ScriptedContent::new(vec![
        PresentationSize::ContentHeight(200.0),
        PresentationSize::Large,
    ])
}

#[test]
fn present_settles_on_first_size_and_transition_reaches_top() {
    let content = content_then_large();
    let calls = content.calls.clone();
    let mut s = PresentationSession::new(RecordingHost::new(800.0));

    assert!(s.present(Box::new(content), 0));
    assert_eq!(s.phase(), SessionPhase::Presenting);
    assert_eq!(s.host().origins.first().copied(), Some(800.0));
    assert_eq!(s.host().dimming, vec![true]);
    assert_eq!(s.host().indicator, None);

    assert_eq!(s.tick(300), Some(600.0));
    assert_eq!(s.phase(), SessionPhase::Presented);
    assert!(!s.is_animating());
    let origins: Vec<f32> = s
        .snap_points()
        .map(|set| set.points().iter().map(|p| p.origin).collect())
        .unwrap_or_default();
    assert_eq!(origins, vec![600.0, 0.0]);

    assert!(s.transition(PresentationSize::Large, 1000));
    let mid = s.tick(1200).unwrap_or(f32::NAN);
    assert!(mid > 0.0 && mid < 600.0);
    assert_eq!(s.tick(1400), Some(0.0));
    assert_eq!(s.tick(1500), None);

    assert_eq!(s.current_origin(), 0.0);
    assert_eq!(s.settled_origin(), 0.0);
    assert_eq!(s.settled_size(), Some(&PresentationSize::Large));
    let large = PresentationSize::Large;
    assert_eq!(ScriptedContent::count(&calls, &Call::WillTransition(large.clone())), 1);
    assert_eq!(ScriptedContent::count(&calls, &Call::DidTransition(large)), 1);
}

#[test]
fn present_is_rejected_while_a_sheet_is_shown() {
    let mut s = presented(content_then_large());
    assert!(!s.present(Box::new(content_then_large()), 500));
    assert_eq!(s.current_origin(), 600.0);
}

#[test]
fn transition_to_unlisted_size_resolves_directly() {
    let mut s = presented(content_then_large());
    assert!(s.transition(PresentationSize::Medium, 1000));
    s.tick(1400);
    assert_eq!(s.current_origin(), 400.0);
}

#[test]
fn vetoed_transition_returns_to_settled_origin() {
    let content = content_then_large();
    let calls = content.calls.clone();
    let veto = content.veto.clone();
    let mut s = presented(content);

    veto.set(true);
    assert!(!s.transition(PresentationSize::Large, 1000));
    s.tick(1400);
    assert_eq!(s.current_origin(), 600.0);
    assert!(
        calls
            .borrow()
            .iter()
            .all(|c| matches!(c, Call::Configure))
    );
}

#[test]
fn layout_if_needed_is_idempotent() {
    let content = content_then_large();
    let calls = content.calls.clone();
    let mut s = presented(content);
    let pushes = s.host().origins.len();

    assert!(!s.layout_if_needed(1000));
    assert!(!s.layout_if_needed(1001));
    assert!(!s.is_animating());
    assert_eq!(s.current_origin(), 600.0);
    assert_eq!(s.host().origins.len(), pushes);
    assert_eq!(ScriptedContent::count(&calls, &Call::Configure), 3);
}

#[test]
fn layout_after_resize_moves_to_new_origin_of_settled_size() {
    let mut s = presented(content_then_large());
    s.host_mut().viewport = Viewport::new(800.0, 400.0, Insets::default());

    assert!(s.layout_if_needed(1000));
    assert!(!s.layout_if_needed(1000));
    s.tick(1400);
    assert_eq!(s.current_origin(), 200.0);
    assert_eq!(
        s.settled_size(),
        Some(&PresentationSize::ContentHeight(200.0))
    );
    assert!(!s.layout_if_needed(1500));
}

#[test]
fn layout_follows_intrinsic_content_growth_without_lifecycle_calls() {
    let content = ScriptedContent::new(vec![PresentationSize::IntrinsicHeight]);
    let measured = content.measured.clone();
    let calls = content.calls.clone();
    measured.set(300.0);
    let mut s = presented(content);
    assert_eq!(s.current_origin(), 500.0);

    measured.set(400.0);
    assert!(s.layout_if_needed(1000));
    s.tick(1400);
    assert_eq!(s.current_origin(), 400.0);
    assert!(
        !calls
            .borrow()
            .iter()
            .any(|c| matches!(c, Call::DidTransition(_)))
    );
}

#[test]
fn layout_while_presenting_retargets_the_entry_animation() {
    let content = ScriptedContent::new(vec![PresentationSize::IntrinsicHeight]);
    let measured = content.measured.clone();
    measured.set(300.0);
    let mut s = PresentationSession::new(RecordingHost::new(800.0));
    assert!(s.present(Box::new(content), 0));

    measured.set(400.0);
    assert!(s.layout_if_needed(150));
    assert_eq!(s.phase(), SessionPhase::Presenting);
    s.tick(450);
    assert_eq!(s.current_origin(), 400.0);
    assert_eq!(s.phase(), SessionPhase::Presented);
}

#[test]
fn drag_up_and_release_settles_on_large() {
    let content = content_then_large();
    let calls = content.calls.clone();
    let mut s = presented(content);

    assert_eq!(s.handle_drag(DragSample::began(10.0, 610.0), 1000), DragOutcome::Began);
    assert_eq!(
        s.handle_drag(DragSample::changed(10.0, 560.0), 1010),
        DragOutcome::Moved {
            origin: 550.0,
            bottom_inset: 50.0
        }
    );
    assert_eq!(s.host().last_origin(), Some(550.0));
    assert_eq!(s.host().insets.last().copied(), Some(50.0));

    s.handle_drag(DragSample::changed(10.0, 310.0), 1020);
    assert_eq!(s.current_origin(), 300.0);
    assert_eq!(s.drag_direction(), snapsheet::DragDirection::Up);

    let out = s.handle_drag(DragSample::ended(10.0, 310.0), 1030);
    assert!(matches!(out, DragOutcome::Settle(ref p) if p.origin == 0.0));
    s.tick(1430);
    assert_eq!(s.current_origin(), 0.0);
    assert_eq!(
        ScriptedContent::count(&calls, &Call::DidTransition(PresentationSize::Large)),
        1
    );
}

#[test]
fn drag_below_threshold_dismisses() {
    let mut s = presented(content_then_large());

    s.handle_drag(DragSample::began(10.0, 610.0), 1000);
    s.handle_drag(DragSample::changed(10.0, 760.0), 1010);
    assert_eq!(s.current_origin(), 750.0);
    assert_eq!(
        s.handle_drag(DragSample::ended(10.0, 760.0), 1020),
        DragOutcome::Dismiss
    );
    assert_eq!(s.phase(), SessionPhase::Dismissing);

    s.tick(1320);
    assert_eq!(s.phase(), SessionPhase::Dismissed);
    assert_eq!(s.current_origin(), 800.0);
    assert_eq!(s.host().dimming, vec![true, false]);
    assert!(s.snap_points().is_none());
}

#[test]
fn non_dismissable_sheet_settles_back() {
    let mut content = content_then_large();
    content.dismissable = false;
    let mut s = presented(content);

    s.handle_drag(DragSample::began(10.0, 610.0), 1000);
    s.handle_drag(DragSample::changed(10.0, 760.0), 1010);
    let out = s.handle_drag(DragSample::ended(10.0, 760.0), 1020);
    assert!(matches!(out, DragOutcome::Settle(ref p) if p.origin == 600.0));
    s.tick(1420);
    assert_eq!(s.phase(), SessionPhase::Presented);
    assert_eq!(s.current_origin(), 600.0);
}

#[test]
fn dismissal_blocks_further_requests_and_runs_completion_once() {
    let mut s = presented(content_then_large());
    let done = Rc::new(Cell::new(0u32));
    let done2 = done.clone();

    assert!(s.dismiss_then(1000, move || done2.set(done2.get() + 1)));
    assert!(!s.transition(PresentationSize::Large, 1050));
    assert!(!s.layout_if_needed(1050));
    assert!(!s.dismiss(1050));
    assert!(!s.present(Box::new(content_then_large()), 1050));
    assert_eq!(
        s.handle_drag(DragSample::began(10.0, 700.0), 1060),
        DragOutcome::Ignored
    );

    s.tick(1300);
    s.tick(1400);
    assert_eq!(done.get(), 1);
    assert_eq!(s.phase(), SessionPhase::Dismissed);

    assert!(s.present(Box::new(content_then_large()), 2000));
}

#[test]
fn background_tap_honours_configuration_and_content() {
    let mut s = presented(content_then_large());
    assert!(s.background_tapped(1000));
    assert_eq!(s.phase(), SessionPhase::Dismissing);

    let mut content = content_then_large();
    content.tap_outside = false;
    let mut s = presented(content);
    assert!(!s.background_tapped(1000));

    let mut content = content_then_large();
    content.tap = TapResponse::Ignore;
    let mut s = presented(content);
    assert!(!s.background_tapped(1000));
    assert_eq!(s.phase(), SessionPhase::Presented);
}

#[test]
fn superseded_transition_never_reports_completion() {
    let content = content_then_large();
    let calls = content.calls.clone();
    let mut s = presented(content);

    assert!(s.transition(PresentationSize::Large, 1000));
    assert!(s.transition(PresentationSize::ContentHeight(200.0), 1200));
    s.tick(1600);
    assert_eq!(s.current_origin(), 600.0);
    assert_eq!(
        ScriptedContent::count(&calls, &Call::DidTransition(PresentationSize::Large)),
        0
    );
    assert_eq!(
        ScriptedContent::count(
            &calls,
            &Call::DidTransition(PresentationSize::ContentHeight(200.0))
        ),
        1
    );
}

#[test]
fn drag_began_interrupts_running_animation_at_live_position() {
    let content = content_then_large();
    let calls = content.calls.clone();
    let mut s = presented(content);

    assert!(s.transition(PresentationSize::Large, 1000));
    s.handle_drag(DragSample::began(10.0, 50.0), 1200);
    assert!(!s.is_animating());
    assert_eq!(s.current_origin(), 75.0);
    assert_eq!(s.tick(1400), None);
    assert_eq!(
        ScriptedContent::count(&calls, &Call::DidTransition(PresentationSize::Large)),
        0
    );
}

#[test]
fn drag_during_entry_animation_marks_session_presented() {
    let mut s = PresentationSession::new(RecordingHost::new(800.0));
    assert!(s.present(Box::new(content_then_large()), 0));
    s.handle_drag(DragSample::began(10.0, 700.0), 150);
    assert_eq!(s.phase(), SessionPhase::Presented);
    assert_eq!(s.current_origin(), 700.0);
}

#[test]
fn scroll_region_is_locked_until_fully_expanded() {
    let region = Rc::new(RefCell::new(RegionState {
        frame: Rect::new(0.0, 20.0, 400.0, 700.0),
        ..RegionState::default()
    }));
    let content = ScriptedContent::new(vec![PresentationSize::Medium, PresentationSize::Large])
        .with_region(region.clone());
    let mut s = presented(content);
    assert!(s.scroll_coordinator().is_attached());
    assert_eq!(s.current_origin(), 400.0);

    {
        let mut r = region.borrow_mut();
        r.dragging = true;
        r.offset = 30.0;
    }
    assert_eq!(s.scroll_offset_changed(), OffsetObservation::Reverted);
    assert_eq!(region.borrow().offset, 0.0);
    region.borrow_mut().dragging = false;

    assert!(s.transition(PresentationSize::Large, 1000));
    s.tick(1400);
    assert_eq!(s.current_origin(), 0.0);

    region.borrow_mut().offset = 30.0;
    assert_eq!(s.scroll_offset_changed(), OffsetObservation::Recorded);

    // Scrolled content inside the region owns the gesture.
    assert_eq!(
        s.handle_drag(DragSample::began(10.0, 100.0), 2000),
        DragOutcome::Ignored
    );
    assert_eq!(
        s.handle_drag(DragSample::changed(10.0, 120.0), 2010),
        DragOutcome::Ignored
    );

    region.borrow_mut().offset = 0.0;
    assert_eq!(s.scroll_offset_changed(), OffsetObservation::Recorded);
    assert_eq!(
        s.handle_drag(DragSample::changed(10.0, 150.0), 2020),
        DragOutcome::Moved {
            origin: 30.0,
            bottom_inset: 370.0
        }
    );

    // Below full expansion the region is pinned at the last recorded offset.
    {
        let mut r = region.borrow_mut();
        r.dragging = true;
        r.offset = 5.0;
    }
    assert_eq!(s.scroll_offset_changed(), OffsetObservation::Reverted);
    assert_eq!(region.borrow().offset, 0.0);
}

#[test]
fn dismissal_detaches_scroll_region() {
    let region = Rc::new(RefCell::new(RegionState::default()));
    let content =
        ScriptedContent::new(vec![PresentationSize::Medium]).with_region(region.clone());
    let mut s = presented(content);
    assert!(s.dismiss(1000));
    assert!(!s.scroll_coordinator().is_attached());
    assert_eq!(s.scroll_offset_changed(), OffsetObservation::Detached);
}

#[test]
fn state_round_trips_through_restore() {
    let mut s = presented(content_then_large());
    s.handle_drag(DragSample::began(10.0, 610.0), 1000);
    s.handle_drag(DragSample::changed(10.0, 560.0), 1010);
    let saved = s.state();
    assert_eq!(saved.origin, 550.0);
    assert_eq!(saved.settled_origin, 600.0);

    s.handle_drag(DragSample::cancelled(10.0, 560.0), 1020);
    s.tick(1500);
    assert!(s.restore_state(saved));
    assert_eq!(s.current_origin(), 550.0);
    assert_eq!(
        s.settled_size(),
        Some(&PresentationSize::ContentHeight(200.0))
    );
}

#[test]
fn visible_indicator_is_pushed_to_host_and_removed_on_dismiss() {
    struct Plain;
    impl Presentable for Plain {
        fn preferred_presentation_size(&self) -> Vec<PresentationSize> {
            vec![PresentationSize::Medium]
        }
    }

    let mut s = PresentationSession::new(RecordingHost::new(800.0));
    assert!(s.present(Box::new(Plain), 0));
    assert_eq!(s.host().indicator, Some(DragIndicator::default()));
    s.tick(300);
    assert!(s.dismiss(400));
    s.tick(700);
    assert_eq!(s.host().indicator, None);
}

fn small_then_medium_with_region(
    region: &Rc<RefCell<RegionState>>,
) -> (PresentationSession<RecordingHost>, Rc<RefCell<Vec<Call>>>) {
    let content = ScriptedContent::new(vec![PresentationSize::Small, PresentationSize::Medium])
        .with_region(region.clone());
    let calls = content.calls.clone();
    let mut s = presented(content);
    assert!(s.transition(PresentationSize::Medium, 1000));
    s.tick(1400);
    assert_eq!(s.current_origin(), 400.0);
    (s, calls)
}

#[test]
fn upward_drag_inside_region_scrolls_content_at_full_expansion() {
    let region = Rc::new(RefCell::new(RegionState {
        frame: Rect::new(0.0, 0.0, 400.0, 400.0),
        ..RegionState::default()
    }));
    let (mut s, calls) = small_then_medium_with_region(&region);

    assert_eq!(s.handle_drag(DragSample::began(10.0, 300.0), 2000), DragOutcome::Began);
    for i in 1..=10 {
        let y = 300.0 - 20.0 * i as f32;
        assert_eq!(
            s.handle_drag(DragSample::changed(10.0, y), 2000 + i),
            DragOutcome::Ignored
        );
    }
    assert_eq!(s.current_origin(), 400.0);

    region.borrow_mut().offset = 200.0;
    assert_eq!(s.scroll_offset_changed(), OffsetObservation::Recorded);

    assert_eq!(
        s.handle_drag(DragSample::ended(10.0, 100.0), 2020),
        DragOutcome::Ignored
    );
    assert!(!s.is_animating());
    assert_eq!(s.current_origin(), 400.0);
    let medium = PresentationSize::Medium;
    assert_eq!(ScriptedContent::count(&calls, &Call::WillTransition(medium.clone())), 1);
    assert_eq!(ScriptedContent::count(&calls, &Call::DidTransition(medium)), 1);
}

#[test]
fn sheet_pulled_down_inside_region_stops_at_largest_origin_on_the_way_back() {
    let region = Rc::new(RefCell::new(RegionState {
        frame: Rect::new(0.0, 0.0, 400.0, 400.0),
        ..RegionState::default()
    }));
    let (mut s, _calls) = small_then_medium_with_region(&region);

    s.handle_drag(DragSample::began(10.0, 300.0), 2000);
    s.handle_drag(DragSample::changed(10.0, 350.0), 2010);
    assert_eq!(s.current_origin(), 450.0);

    s.handle_drag(DragSample::changed(10.0, 250.0), 2020);
    assert_eq!(s.current_origin(), 400.0);

    assert_eq!(
        s.handle_drag(DragSample::changed(10.0, 200.0), 2030),
        DragOutcome::Ignored
    );
    assert_eq!(s.current_origin(), 400.0);
}

#[test]
fn gesture_owned_by_scrolled_region_skips_lifecycle_on_release() {
    let region = Rc::new(RefCell::new(RegionState {
        frame: Rect::new(0.0, 0.0, 400.0, 400.0),
        ..RegionState::default()
    }));
    let (mut s, calls) = small_then_medium_with_region(&region);
    region.borrow_mut().offset = 30.0;
    assert_eq!(s.scroll_offset_changed(), OffsetObservation::Recorded);
    let before = calls.borrow().len();

    assert_eq!(
        s.handle_drag(DragSample::began(10.0, 200.0), 2000),
        DragOutcome::Ignored
    );
    s.handle_drag(DragSample::changed(10.0, 260.0), 2010);
    assert_eq!(
        s.handle_drag(DragSample::ended(10.0, 260.0), 2020),
        DragOutcome::Ignored
    );
    assert_eq!(s.current_origin(), 400.0);
    assert!(!s.is_animating());
    assert_eq!(calls.borrow().len(), before);
}

#[test]
fn motionless_release_between_snaps_settles_without_lifecycle() {
    let content = content_then_large();
    let calls = content.calls.clone();
    let mut s = presented(content);
    assert!(s.restore_state(SheetState {
        origin: 550.0,
        settled_origin: 600.0,
        direction: snapsheet::DragDirection::Up,
    }));

    s.handle_drag(DragSample::began(10.0, 560.0), 1000);
    assert_eq!(
        s.handle_drag(DragSample::ended(10.0, 560.0), 1010),
        DragOutcome::Ignored
    );
    assert!(s.is_animating());
    s.tick(1410);
    assert_eq!(s.current_origin(), 600.0);
    assert!(
        !calls
            .borrow()
            .iter()
            .any(|c| matches!(c, Call::WillTransition(_) | Call::DidTransition(_)))
    );
}

#[test]
fn restoring_an_off_snap_state_forgets_the_old_settled_size() {
    let mut s = presented(content_then_large());
    assert!(s.transition(PresentationSize::Large, 1000));
    s.tick(1400);
    assert_eq!(s.settled_size(), Some(&PresentationSize::Large));

    assert!(s.restore_state(SheetState {
        origin: 550.0,
        settled_origin: 550.0,
        direction: snapsheet::DragDirection::Down,
    }));
    assert_eq!(s.settled_size(), None);

    assert!(s.layout_if_needed(2000));
    s.tick(2400);
    assert_eq!(s.current_origin(), 600.0);
    assert_eq!(
        s.settled_size(),
        Some(&PresentationSize::ContentHeight(200.0))
    );
}
