use alloc::boxed::Box;
use core::fmt;

use snapsheet::{
    DragBounds, DragGestureController, DragOutcome, DragSample, OffsetObservation,
    PresentableConfiguration, PresentationSize, ScrollCoordinator, SheetState, SizeResolver,
    SnapPointSet, Viewport,
};

use crate::{Easing, Presentable, SheetHost, TapResponse, Tween};

/// Animation timing for a [`PresentationSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOptions {
    /// Duration of settle/transition animations between resting origins.
    pub duration_ms: u64,
    pub easing: Easing,
    pub present_duration_ms: u64,
    pub present_easing: Easing,
    pub dismiss_duration_ms: u64,
    pub dismiss_easing: Easing,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            duration_ms: 400,
            easing: Easing::EaseOutCubic,
            present_duration_ms: 300,
            present_easing: Easing::Linear,
            dismiss_duration_ms: 300,
            dismiss_easing: Easing::Linear,
        }
    }
}

impl SessionOptions {
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_present_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.present_duration_ms = duration_ms;
        self.present_easing = easing;
        self
    }

    pub fn with_dismiss_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.dismiss_duration_ms = duration_ms;
        self.dismiss_easing = easing;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionPhase {
    /// Nothing has been presented yet.
    Idle,
    /// The entry animation is running.
    Presenting,
    Presented,
    /// The exit animation is running; position requests are ignored.
    Dismissing,
    Dismissed,
}

/// Callback run once the exit animation has finished.
pub type DismissCompletion = Box<dyn FnOnce()>;

#[derive(Clone, Debug, PartialEq)]
enum Motion {
    Present,
    /// `notify` is set for lifecycle-gated transitions (drag release, `transition`).
    Settle {
        size: PresentationSize,
        notify: bool,
    },
    /// Back to the last settled origin after a vetoed transition.
    Revert,
    Dismiss,
}

#[derive(Clone, Debug)]
struct Animation {
    tween: Tween,
    motion: Motion,
}

/// Orchestrates one presented sheet: geometry, gestures, lifecycle and animation.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `present` / `dismiss` / `transition` / `layout_if_needed` for caller requests
/// - `handle_drag` and `scroll_offset_changed` when input events occur
/// - `tick(now_ms)` each frame while `is_animating()` is true
///
/// Position changes are pushed to the [`SheetHost`]. A new animation always starts from the
/// live sampled position of the one it replaces, so requests never queue.
pub struct PresentationSession<H> {
    host: H,
    options: SessionOptions,
    content: Option<Box<dyn Presentable>>,
    config: PresentableConfiguration,
    viewport: Viewport,
    resolver: Option<SizeResolver>,
    snaps: Option<SnapPointSet>,
    drag: DragGestureController,
    scroll: ScrollCoordinator,
    phase: SessionPhase,
    origin: f32,
    settled_origin: f32,
    settled_size: Option<PresentationSize>,
    animation: Option<Animation>,
    on_dismiss: Option<DismissCompletion>,
}

impl<H: SheetHost> PresentationSession<H> {
    pub fn new(host: H) -> Self {
        Self::with_options(host, SessionOptions::default())
    }

    pub fn with_options(host: H, options: SessionOptions) -> Self {
        let viewport = host.viewport();
        let offscreen = viewport.height.max(0.0);
        Self {
            host,
            options,
            content: None,
            config: PresentableConfiguration::default(),
            viewport,
            resolver: None,
            snaps: None,
            drag: DragGestureController::new(),
            scroll: ScrollCoordinator::new(),
            phase: SessionPhase::Idle,
            origin: offscreen,
            settled_origin: offscreen,
            settled_size: None,
            animation: None,
            on_dismiss: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether a sheet is on screen and accepts position requests.
    pub fn is_presented(&self) -> bool {
        matches!(self.phase, SessionPhase::Presenting | SessionPhase::Presented)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn current_origin(&self) -> f32 {
        self.origin
    }

    pub fn settled_origin(&self) -> f32 {
        self.settled_origin
    }

    pub fn settled_size(&self) -> Option<&PresentationSize> {
        self.settled_size.as_ref()
    }

    pub fn snap_points(&self) -> Option<&SnapPointSet> {
        self.snaps.as_ref()
    }

    pub fn configuration(&self) -> &PresentableConfiguration {
        &self.config
    }

    pub fn drag_direction(&self) -> snapsheet::DragDirection {
        self.drag.direction()
    }

    pub fn scroll_coordinator(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    /// Shows `content`, starting the entry animation from below the container.
    ///
    /// Returns `false` (and does nothing) while another sheet is shown or still dismissing.
    pub fn present(&mut self, content: Box<dyn Presentable>, now_ms: u64) -> bool {
        if self.is_presented() || self.phase == SessionPhase::Dismissing {
            swarn!(phase = ?self.phase, "present ignored: a sheet is already shown");
            return false;
        }

        self.content = Some(content);
        self.drag = DragGestureController::new();
        self.scroll = ScrollCoordinator::new();
        self.animation = None;
        self.on_dismiss = None;
        self.reconfigure();
        self.rebuild();

        if let Some(content) = self.content.as_mut() {
            if let Some(region) = content.scroll_region() {
                self.scroll.attach(region);
            }
        }

        let Some(first) = self.snaps.as_ref().and_then(|s| s.first()).cloned() else {
            self.content = None;
            return false;
        };

        self.host.set_dimming_visible(true);
        self.sync_indicator();

        self.settled_origin = first.origin;
        self.settled_size = Some(first.size);
        let offscreen = self.offscreen_origin();
        self.set_origin(offscreen);
        self.phase = SessionPhase::Presenting;
        self.start(
            first.origin,
            Motion::Present,
            now_ms,
            self.options.present_duration_ms,
            self.options.present_easing,
        );
        sdebug!(
            origin = first.origin,
            snaps = self.snaps.as_ref().map_or(0, |s| s.len()),
            scroll_region = self.scroll.is_attached(),
            "PresentationSession::present"
        );
        true
    }

    /// Starts the exit animation. See [`Self::dismiss_then`].
    pub fn dismiss(&mut self, now_ms: u64) -> bool {
        self.begin_dismissal(now_ms, None)
    }

    /// Starts the exit animation and runs `completion` once it has finished.
    ///
    /// Observation of the scroll region stops immediately. Returns `false` when nothing is shown
    /// or a dismissal is already running.
    pub fn dismiss_then(&mut self, now_ms: u64, completion: impl FnOnce() + 'static) -> bool {
        self.begin_dismissal(now_ms, Some(Box::new(completion)))
    }

    fn begin_dismissal(&mut self, now_ms: u64, completion: Option<DismissCompletion>) -> bool {
        if !self.is_presented() {
            sdebug!(phase = ?self.phase, "dismiss ignored");
            return false;
        }
        self.scroll.detach();
        self.drag.reset();
        self.on_dismiss = completion;
        let offscreen = self.offscreen_origin();
        self.start(
            offscreen,
            Motion::Dismiss,
            now_ms,
            self.options.dismiss_duration_ms,
            self.options.dismiss_easing,
        );
        self.phase = SessionPhase::Dismissing;
        sdebug!(from = self.origin, "PresentationSession::dismiss");
        true
    }

    fn finish_dismissal(&mut self) {
        self.host.set_dimming_visible(false);
        self.host.set_drag_indicator(None);
        self.content = None;
        self.snaps = None;
        self.resolver = None;
        self.settled_size = None;
        self.phase = SessionPhase::Dismissed;
        if let Some(done) = self.on_dismiss.take() {
            done();
        }
    }

    /// Animates to `to`, subject to the content's transition veto and lifecycle hooks.
    ///
    /// `to` does not have to be one of the preferred sizes. Returns `false` when nothing is
    /// shown, a dismissal is running, or the content vetoed the transition (in which case the
    /// sheet animates back to its last settled origin).
    pub fn transition(&mut self, to: PresentationSize, now_ms: u64) -> bool {
        if !self.is_presented() {
            sdebug!(phase = ?self.phase, "transition ignored");
            return false;
        }
        let known = self
            .snaps
            .as_ref()
            .and_then(|s| s.point_for_size(&to))
            .map(|p| p.origin);
        let Some(origin) = known.or_else(|| self.resolve_origin(&to)) else {
            return false;
        };
        self.drag.reset();
        self.transition_to(origin, to, now_ms)
    }

    fn transition_to(&mut self, origin: f32, size: PresentationSize, now_ms: u64) -> bool {
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        if !content.should_transition(&size) {
            sdebug!(size = ?size, "transition vetoed");
            let back = self.settled_origin;
            self.settle(back, Motion::Revert, now_ms);
            return false;
        }
        content.will_transition(&size);
        self.settle(origin, Motion::Settle { size, notify: true }, now_ms);
        true
    }

    /// Re-runs `configure`, rebuilds the snap set and animates to the resulting resting origin.
    ///
    /// The settled origin is kept when it is still a snap origin; otherwise the sheet moves to
    /// the new origin of its settled size, then to the closest snap. Calling this again without
    /// any change in between does nothing. Returns whether an animation was started or
    /// retargeted.
    pub fn layout_if_needed(&mut self, now_ms: u64) -> bool {
        if !self.is_presented() {
            sdebug!(phase = ?self.phase, "layout_if_needed ignored");
            return false;
        }
        self.reconfigure();
        self.rebuild();
        self.sync_indicator();

        let Some((origin, size)) = self.layout_target() else {
            return false;
        };
        self.settled_size = Some(size.clone());

        if self.drag.is_active() {
            // The release will pick a snap from the rebuilt set.
            return false;
        }

        if let Some(anim) = self.animation.as_mut() {
            if anim.tween.to == origin {
                return false;
            }
            if anim.motion == Motion::Present {
                anim.tween
                    .retarget(now_ms, origin, self.options.present_duration_ms);
                self.settled_origin = origin;
                return true;
            }
        } else if self.origin == origin && self.settled_origin == origin {
            return false;
        }

        self.settle(origin, Motion::Settle { size, notify: false }, now_ms);
        true
    }

    /// Rebuilds derived geometry (resolver, snap set) from the current configuration without
    /// moving the sheet.
    pub fn set_needs_layout(&mut self) {
        if self.content.is_none() {
            return;
        }
        self.rebuild();
    }

    /// Handles a tap on the dimmed area around the sheet. Returns whether a dismissal started.
    pub fn background_tapped(&mut self, now_ms: u64) -> bool {
        if !self.is_presented() || !self.config.tap_outside_to_dismiss {
            return false;
        }
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        match content.on_background_tap() {
            TapResponse::Dismiss => self.dismiss(now_ms),
            TapResponse::Ignore => false,
        }
    }

    /// Feeds one pointer sample of the sheet's drag gesture.
    pub fn handle_drag(&mut self, sample: DragSample, now_ms: u64) -> DragOutcome {
        if !self.is_presented() {
            return DragOutcome::Ignored;
        }
        let Some(content) = self.content.as_mut() else {
            return DragOutcome::Ignored;
        };

        if sample.phase.is_terminal() {
            if !self.drag.is_active() {
                return DragOutcome::Ignored;
            }
            if !self.drag.is_engaged() {
                // Every sample went to the content; the sheet never left its resting place.
                self.drag.skip(&sample);
                self.resettle_quietly(now_ms);
                return DragOutcome::Ignored;
            }
        } else {
            let start = match sample.phase {
                snapsheet::GesturePhase::Began => sample.location,
                _ => self.drag.start_location().unwrap_or(sample.location),
            };
            let dy = self.drag.pending_displacement(sample.location);
            let fully_expanded = self
                .snaps
                .as_ref()
                .is_some_and(|s| s.is_fully_expanded(self.origin));
            let region = content.scroll_region();
            let sheet_may_drag = self.scroll.should_begin(
                region.as_deref(),
                sample.phase,
                start,
                dy,
                fully_expanded,
            );
            if !sheet_may_drag || !content.should_continue_drag(&sample) {
                strace!(phase = ?sample.phase, "drag sample left to content");
                self.drag.skip(&sample);
                return DragOutcome::Ignored;
            }
            self.interrupt(now_ms);
        }

        let Some(snaps) = self.snaps.as_ref() else {
            return DragOutcome::Ignored;
        };
        let bounds = DragBounds::new(
            snaps,
            &self.config,
            self.scroll.is_attached(),
            self.viewport.safe_area.bottom.max(0.0),
        );
        let outcome = self.drag.process(&sample, self.origin, &bounds);

        match &outcome {
            DragOutcome::Moved {
                origin,
                bottom_inset,
            } => {
                self.origin = *origin;
                self.host.set_sheet_origin(*origin);
                self.host.set_content_bottom_inset(*bottom_inset);
            }
            DragOutcome::Dismiss => {
                self.dismiss(now_ms);
            }
            DragOutcome::Settle(point) => {
                self.transition_to(point.origin, point.size.clone(), now_ms);
            }
            DragOutcome::Began | DragOutcome::Ignored => {}
        }
        outcome
    }

    /// Call this when the embedded scroll region reports a content-offset change.
    ///
    /// Below full expansion, user-driven changes are reset on the region before this returns.
    pub fn scroll_offset_changed(&mut self) -> OffsetObservation {
        if !self.is_presented() {
            return OffsetObservation::Detached;
        }
        let (Some(content), Some(snaps)) = (self.content.as_mut(), self.snaps.as_ref()) else {
            return OffsetObservation::Detached;
        };
        let Some(region) = content.scroll_region() else {
            return OffsetObservation::Detached;
        };
        self.scroll.observe(region, self.origin, snaps)
    }

    /// Advances the running animation.
    ///
    /// Returns the new origin while animating, `None` otherwise. Completion bookkeeping
    /// (`did_transition`, dismissal teardown) runs on the tick that reaches the end.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let anim = self.animation.as_ref()?;
        let origin = anim.tween.sample(now_ms);
        let done = anim.tween.is_done(now_ms);
        self.set_origin(origin);
        if done {
            if let Some(anim) = self.animation.take() {
                self.finish(anim.motion, anim.tween.to);
            }
        }
        Some(origin)
    }

    /// Captures the live position, e.g. before the host rebuilds its surface.
    pub fn state(&self) -> SheetState {
        SheetState {
            origin: self.origin,
            settled_origin: self.settled_origin,
            direction: self.drag.direction(),
        }
    }

    /// Restores a previously captured position without animating.
    pub fn restore_state(&mut self, state: SheetState) -> bool {
        if !self.is_presented() {
            return false;
        }
        self.animation = None;
        self.phase = SessionPhase::Presented;
        self.drag.reset();
        self.drag.set_direction(state.direction);
        self.settled_origin = state.settled_origin;
        self.settled_size = self
            .snaps
            .as_ref()
            .and_then(|s| s.point_at_origin(state.settled_origin))
            .map(|p| p.size.clone());
        self.set_origin(state.origin);
        true
    }

    /// Moves an idle sheet that rests between snaps to the closest one, without lifecycle calls.
    fn resettle_quietly(&mut self, now_ms: u64) {
        if self.animation.is_some() {
            return;
        }
        let Some(snaps) = self.snaps.as_ref() else {
            return;
        };
        if snaps.point_at_origin(self.origin).is_some() {
            return;
        }
        let Some(point) = snaps.closest(self.origin).cloned() else {
            return;
        };
        self.settle(
            point.origin,
            Motion::Settle {
                size: point.size,
                notify: false,
            },
            now_ms,
        );
    }

    fn finish(&mut self, motion: Motion, to: f32) {
        strace!(motion = ?motion, to, "animation finished");
        match motion {
            Motion::Present => {
                self.phase = SessionPhase::Presented;
            }
            Motion::Settle { size, notify } => {
                self.settled_origin = to;
                if notify {
                    if let Some(content) = self.content.as_mut() {
                        content.did_transition(&size);
                    }
                }
                self.settled_size = Some(size);
            }
            Motion::Revert => {
                self.settled_origin = to;
            }
            Motion::Dismiss => self.finish_dismissal(),
        }
    }

    fn settle(&mut self, to: f32, motion: Motion, now_ms: u64) {
        self.start(
            to,
            motion,
            now_ms,
            self.options.duration_ms,
            self.options.easing,
        );
    }

    /// Replaces any running animation, starting from its live sampled value.
    fn start(&mut self, to: f32, motion: Motion, now_ms: u64, duration_ms: u64, easing: Easing) {
        let from = match self.animation.take() {
            Some(prev) => {
                if prev.motion == Motion::Present && motion != Motion::Present {
                    self.phase = SessionPhase::Presented;
                }
                prev.tween.sample(now_ms)
            }
            None => self.origin,
        };
        self.origin = from;
        strace!(from, to, motion = ?motion, "animation started");
        self.animation = Some(Animation {
            tween: Tween::new(from, to, now_ms, duration_ms, easing),
            motion,
        });
    }

    /// Stops the running animation at its live value (a drag took over).
    fn interrupt(&mut self, now_ms: u64) {
        let Some(anim) = self.animation.take() else {
            return;
        };
        if anim.motion == Motion::Present {
            self.phase = SessionPhase::Presented;
        }
        let live = anim.tween.sample(now_ms);
        strace!(live, "animation interrupted");
        self.set_origin(live);
    }

    fn set_origin(&mut self, origin: f32) {
        self.origin = origin;
        self.host.set_sheet_origin(origin);
        if let Some(snaps) = self.snaps.as_ref() {
            let inset = DragBounds::new(
                snaps,
                &self.config,
                self.scroll.is_attached(),
                self.viewport.safe_area.bottom.max(0.0),
            )
            .bottom_inset(origin);
            self.host.set_content_bottom_inset(inset);
        }
    }

    fn reconfigure(&mut self) {
        let mut config = PresentableConfiguration::default();
        if let Some(content) = self.content.as_mut() {
            content.configure(&mut config);
        }
        self.config = config;
    }

    fn rebuild(&mut self) {
        let Some(content) = self.content.as_mut() else {
            return;
        };
        self.viewport = self.host.viewport();
        let resolver = SizeResolver::new(self.viewport, &self.config);
        let preferred = content.preferred_presentation_size();
        let width = self.viewport.width;
        let snaps = SnapPointSet::build(
            &preferred,
            &resolver,
            self.config.dismiss_scale(),
            || content.measure_content(width),
        );
        self.resolver = Some(resolver);
        self.snaps = Some(snaps);
    }

    fn sync_indicator(&mut self) {
        let indicator = self.config.drag_indicator;
        self.host
            .set_drag_indicator(indicator.visible.then_some(indicator));
    }

    fn resolve_origin(&mut self, size: &PresentationSize) -> Option<f32> {
        let resolver = self.resolver?;
        let content = self.content.as_mut()?;
        let width = self.viewport.width;
        let height = resolver.resolve(size, || content.measure_content(width));
        Some(resolver.origin_for_height(height))
    }

    fn layout_target(&self) -> Option<(f32, PresentationSize)> {
        let snaps = self.snaps.as_ref()?;
        let point = snaps
            .point_at_origin(self.settled_origin)
            .or_else(|| {
                self.settled_size
                    .as_ref()
                    .and_then(|size| snaps.point_for_size(size))
            })
            .or_else(|| snaps.closest(self.settled_origin))
            .or_else(|| snaps.first())?;
        Some((point.origin, point.size.clone()))
    }

    fn offscreen_origin(&self) -> f32 {
        self.resolver
            .map(|r| r.container_height())
            .unwrap_or(self.viewport.height.max(0.0))
    }
}

impl<H: fmt::Debug> fmt::Debug for PresentationSession<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationSession")
            .field("host", &self.host)
            .field("options", &self.options)
            .field("phase", &self.phase)
            .field("origin", &self.origin)
            .field("settled_origin", &self.settled_origin)
            .field("settled_size", &self.settled_size)
            .field("config", &self.config)
            .field("animating", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}
