use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::runner::ConsoleSession;
use log::{error, info, warn};
use radarcore::radar::{RadarEvent, RadarView, TransformCodec};
use radarcore::GeoPosition;
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

#[derive(Debug, Deserialize)]
struct ZoomRequest {
    transform: String,
}

#[derive(Debug, Deserialize)]
struct BrushRequest {
    start: f64,
    end: f64,
    /// Snap both ends to recorded fix timestamps first.
    #[serde(default)]
    snap: bool,
}

pub type SharedSession = Arc<Mutex<ConsoleSession>>;

pub fn model_of(session: &ConsoleSession) -> VisualizationModel {
    let driver = session.driver();
    VisualizationModel::from_snapshot(
        driver.view().state().phase(),
        driver.snapshot(),
        driver.metrics(),
    )
}

fn brush_event(session: &ConsoleSession, request: &BrushRequest) -> RadarEvent {
    if request.snap {
        if let Ok(Some(range)) = session
            .driver()
            .view()
            .state()
            .snap_brush(request.start, request.end)
        {
            return RadarEvent::NewBrushRange {
                start: range.start,
                end: range.end,
            };
        }
    }
    RadarEvent::NewBrushRange {
        start: request.start,
        end: request.end,
    }
}

fn submit(session: &SharedSession, event: RadarEvent) -> Result<warp::reply::Json, warp::Rejection> {
    let mut guard = session
        .lock()
        .map_err(|_| warp::reject::custom(WarpError))?;
    match guard.submit(event) {
        Ok(accepted) => {
            let status = if accepted > 0 { "ok" } else { "rejected" };
            Ok(warp::reply::json(&json!({
                "status": status,
                "domain": guard.snapshot().domain,
            })))
        }
        Err(err) => {
            error!("bridge submit error: {:#}", err);
            Err(warp::reject::custom(WarpError))
        }
    }
}

/// HTTP bridge exposing the live radar frame and accepting operator events.
pub struct GuiBridge {
    session: SharedSession,
}

impl GuiBridge {
    pub fn new(session: SharedSession) -> Self {
        let session_for_filter = session.clone();
        let session_filter = warp::any().map(move || session_for_filter.clone());

        let render_route = warp::path("render")
            .and(warp::get())
            .and(session_filter.clone())
            .and_then(|session: SharedSession| async move {
                let guard = session
                    .lock()
                    .map_err(|_| warp::reject::custom(WarpError))?;
                Ok::<_, warp::Rejection>(warp::reply::json(&model_of(&guard)))
            });

        let event_route = warp::path("events")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_filter.clone())
            .and_then(|event: RadarEvent, session: SharedSession| async move {
                submit(&session, event)
            });

        let position_route = warp::path("position")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_filter.clone())
            .and_then(|fix: GeoPosition, session: SharedSession| async move {
                submit(&session, RadarEvent::NewPosition(fix))
            });

        let zoom_route = warp::path("zoom")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_filter.clone())
            .and_then(|request: ZoomRequest, session: SharedSession| async move {
                let zoom = TransformCodec::parse(&request.transform);
                submit(&session, RadarEvent::NewZoomTransform(zoom))
            });

        let brush_route = warp::path("brush")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_filter)
            .and_then(|request: BrushRequest, session: SharedSession| async move {
                let event = match session.lock() {
                    Ok(guard) => brush_event(&guard, &request),
                    Err(_) => return Err(warp::reject::custom(WarpError)),
                };
                submit(&session, event)
            });

        thread::spawn(move || {
            let routes = render_route
                .or(event_route)
                .or(position_route)
                .or(zoom_route)
                .or(brush_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { session }
    }

    pub fn submit(&self, event: RadarEvent) -> anyhow::Result<usize> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("console session lock poisoned"))?;
        let accepted = guard.submit(event)?;
        if accepted == 0 {
            warn!("bridge event rejected");
        }
        Ok(accepted)
    }

    pub fn publish_status(&self, message: &str) {
        info!("[GUI] {}", message);
    }
}
