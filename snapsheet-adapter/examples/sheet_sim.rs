// Example: driving a presentation session with a simulated frame clock.
use snapsheet::{DragSample, Insets, PresentableConfiguration, PresentationSize, Viewport};
use snapsheet_adapter::{Presentable, PresentationSession, SheetHost};

struct PrintHost;

impl SheetHost for PrintHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(390.0, 844.0, Insets::new(47.0, 34.0))
    }

    fn set_sheet_origin(&mut self, _origin: f32) {}

    fn set_dimming_visible(&mut self, visible: bool) {
        println!("dimming visible: {visible}");
    }
}

struct Menu;

impl Presentable for Menu {
    fn preferred_presentation_size(&self) -> Vec<PresentationSize> {
        vec![PresentationSize::ContentHeight(240.0), PresentationSize::Large]
    }

    fn configure(&mut self, config: &mut PresentableConfiguration) {
        config.drag_resistance = 0.2;
    }

    fn did_transition(&mut self, to: &PresentationSize) {
        println!("did transition to {to:?}");
    }
}

fn run_frames<H: SheetHost>(s: &mut PresentationSession<H>, now_ms: &mut u64) {
    while s.is_animating() {
        *now_ms += 16;
        s.tick(*now_ms);
    }
    println!("t={now_ms}ms origin={} phase={:?}", s.current_origin(), s.phase());
}

fn main() {
    let mut now_ms = 0u64;
    let mut session = PresentationSession::new(PrintHost);

    session.present(Box::new(Menu), now_ms);
    run_frames(&mut session, &mut now_ms);

    session.transition(PresentationSize::Large, now_ms);
    run_frames(&mut session, &mut now_ms);

    // Pull the sheet down past the dismiss threshold.
    let top = session.current_origin();
    for (i, y) in [top + 20.0, top + 300.0, top + 700.0].into_iter().enumerate() {
        let sample = if i == 0 {
            DragSample::began(200.0, y)
        } else {
            DragSample::changed(200.0, y)
        };
        session.handle_drag(sample, now_ms);
        now_ms += 16;
    }
    let outcome = session.handle_drag(DragSample::ended(200.0, top + 700.0), now_ms);
    println!("release: {outcome:?}");
    run_frames(&mut session, &mut now_ms);
}
