// Example: resolving preferred sizes into snap points and settling a drag.
use snapsheet::{
    DragBounds, DragGestureController, DragOutcome, DragSample, Insets, PresentableConfiguration,
    PresentationSize, SizeResolver, SnapPointSet, Viewport,
};

fn main() {
    let viewport = Viewport::new(390.0, 844.0, Insets::new(47.0, 34.0));
    let config = PresentableConfiguration::default();
    let resolver = SizeResolver::new(viewport, &config);

    let preferred = [
        PresentationSize::IntrinsicHeight,
        PresentationSize::Medium,
        PresentationSize::Large,
    ];
    let snaps = SnapPointSet::build(&preferred, &resolver, config.dismiss_scale(), || 180.0);

    println!(
        "height bounds: min={} max={}",
        resolver.minimum_height(),
        resolver.maximum_height()
    );
    for p in snaps.points() {
        println!("snap {:?}: height={} origin={}", p.size, p.height, p.origin);
    }
    println!("dismiss below origin {}", snaps.dismissable_origin());

    let bounds = DragBounds::new(&snaps, &config, false, viewport.safe_area.bottom);
    let mut drag = DragGestureController::new();
    let mut origin = snaps.points()[0].origin;

    let samples = [
        DragSample::began(200.0, origin + 10.0),
        DragSample::changed(200.0, origin - 60.0),
        DragSample::changed(200.0, origin - 220.0),
        DragSample::ended(200.0, origin - 220.0),
    ];
    for sample in samples {
        match drag.process(&sample, origin, &bounds) {
            DragOutcome::Moved {
                origin: next,
                bottom_inset,
            } => {
                origin = next;
                println!("moved to {origin} (inset {bottom_inset})");
            }
            DragOutcome::Settle(p) => println!("settle on {:?} at {}", p.size, p.origin),
            DragOutcome::Dismiss => println!("dismiss"),
            DragOutcome::Began | DragOutcome::Ignored => {}
        }
    }
}
