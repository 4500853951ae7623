use crate::model::{GeoPosition, RenderPoint, RenderSnapshot};
use crate::prelude::{RadarConfig, RadarResult};
use crate::radar::events::RadarEvent;
use crate::radar::state::{RadarState, Transition};

/// Capabilities shared by every radar display variant.
///
/// Variants differ only in what they draw; event handling is delegated to
/// the [`RadarState`] each one owns.
pub trait RadarView {
    fn state(&self) -> &RadarState;
    fn state_mut(&mut self) -> &mut RadarState;

    /// Frame the render adapter should draw right now.
    fn redraw(&self) -> RenderSnapshot;

    fn handle(&mut self, event: RadarEvent) -> RadarResult<Transition> {
        self.state_mut().apply(event)
    }

    fn on_new_position(&mut self, fix: GeoPosition) -> RadarResult<Transition> {
        self.handle(RadarEvent::NewPosition(fix))
    }

    fn on_rotation(&mut self, degrees: f64) -> RadarResult<Transition> {
        self.handle(RadarEvent::NewRotation(degrees))
    }

    fn on_zoom_reset(&mut self) -> RadarResult<Transition> {
        self.handle(RadarEvent::ResetZoom)
    }

    fn points(&self) -> Vec<RenderPoint> {
        self.redraw().points
    }
}

impl<V: RadarView + ?Sized> RadarView for Box<V> {
    fn state(&self) -> &RadarState {
        (**self).state()
    }

    fn state_mut(&mut self) -> &mut RadarState {
        (**self).state_mut()
    }

    fn redraw(&self) -> RenderSnapshot {
        (**self).redraw()
    }

    fn handle(&mut self, event: RadarEvent) -> RadarResult<Transition> {
        (**self).handle(event)
    }
}

/// Full brushed trail of the vehicle.
pub struct TrackRadar {
    state: RadarState,
}

impl TrackRadar {
    pub fn new(config: &RadarConfig) -> RadarResult<Self> {
        Ok(Self {
            state: RadarState::new(config)?,
        })
    }
}

impl RadarView for TrackRadar {
    fn state(&self) -> &RadarState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RadarState {
        &mut self.state
    }

    fn redraw(&self) -> RenderSnapshot {
        self.state.render_set()
    }
}

/// Only the newest visible fix, joined to the center.
pub struct BeaconRadar {
    state: RadarState,
}

impl BeaconRadar {
    pub fn new(config: &RadarConfig) -> RadarResult<Self> {
        Ok(Self {
            state: RadarState::new(config)?,
        })
    }
}

impl RadarView for BeaconRadar {
    fn state(&self) -> &RadarState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RadarState {
        &mut self.state
    }

    fn redraw(&self) -> RenderSnapshot {
        let latest = self.state.visible_points().pop().into_iter().collect();
        self.state.snapshot_of(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RadarConfig {
        RadarConfig {
            initial_center: Some(GeoPosition::at(0.0, 0.0)),
            ..Default::default()
        }
    }

    fn feed(view: &mut dyn RadarView) {
        for t in 1..=3 {
            view.on_new_position(GeoPosition::new(0.0001 * t as f64, 0.0, 1.0, t as f64))
                .unwrap();
        }
    }

    #[test]
    fn track_shows_every_fix() {
        let mut track = TrackRadar::new(&config()).unwrap();
        feed(&mut track);
        assert_eq!(track.points().len(), 3);
        assert_eq!(track.redraw().polyline.len(), 4);
    }

    #[test]
    fn beacon_shows_latest_fix_only() {
        let mut beacon = BeaconRadar::new(&config()).unwrap();
        feed(&mut beacon);
        let frame = beacon.redraw();
        assert_eq!(frame.points.len(), 1);
        assert_eq!(frame.points[0].position.timestamp, 3.0);
        assert_eq!(frame.polyline.len(), 2);
    }

    #[test]
    fn beacon_respects_the_brush() {
        let mut beacon = BeaconRadar::new(&config()).unwrap();
        feed(&mut beacon);
        beacon
            .handle(RadarEvent::NewBrushRange { start: 1.0, end: 2.0 })
            .unwrap();
        assert_eq!(beacon.points()[0].position.timestamp, 2.0);
    }

    #[test]
    fn boxed_views_dispatch_to_the_variant() {
        let mut views: Vec<Box<dyn RadarView>> = vec![
            Box::new(TrackRadar::new(&config()).unwrap()),
            Box::new(BeaconRadar::new(&config()).unwrap()),
        ];
        for view in views.iter_mut() {
            feed(view);
        }
        assert_eq!(views[0].points().len(), 3);
        assert_eq!(views[1].points().len(), 1);
    }

    #[test]
    fn rotation_and_reset_go_through_the_state() {
        let mut track = TrackRadar::new(&config()).unwrap();
        track.on_rotation(450.0).unwrap();
        assert_eq!(track.state().rotation(), 90.0);
        track
            .handle(RadarEvent::NewZoomTransform(
                crate::radar::transform::TransformState::new(1.0, 2.0, 3.0, 0.0),
            ))
            .unwrap();
        track.on_zoom_reset().unwrap();
        assert_eq!(track.redraw().transform, "scale(1) translate(0,0) rotate(90)");
    }
}
