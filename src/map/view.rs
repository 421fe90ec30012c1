// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive map canvas.
//!
//! Paints a Web Mercator graticule with the rendered pins on top, handles
//! panning (drag) and zooming (wheel), runs fly-to animations and reports
//! clicks according to the active subscriptions.

use super::flight::Flight;
use super::{MapEvent, MapSurface};
use crate::models::marker::{LngLat, Marker, MarkerId};
use crate::models::mode::Subscriptions;
use crate::models::viewport::{FlyTo, Viewport};
use crate::util::geometry::{self, ScreenTransform, MAX_LATITUDE};
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

const BACKGROUND: Color32 = Color32::from_rgb(222, 231, 238);
const GRID: Color32 = Color32::from_rgb(190, 204, 216);
const GRID_LABEL: Color32 = Color32::from_rgb(120, 136, 150);
const PIN: Color32 = Color32::from_rgb(52, 120, 246);
const PIN_DELETE: Color32 = Color32::from_rgb(220, 53, 69);

const PIN_HEIGHT: f32 = 22.0;
const PIN_HEAD_RADIUS: f32 = 7.0;
const PIN_HIT_RADIUS: f32 = 11.0;

/// Wheel scroll (in points) needed to change zoom by one level.
const SCROLL_PER_ZOOM: f64 = 200.0;

/// Minimum screen spacing between graticule lines.
const MIN_GRID_SPACING: f64 = 72.0;

/// Candidate graticule spacings in degrees, widest first.
const GRID_STEPS: [f64; 20] = [
    90.0, 45.0, 30.0, 15.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.25, 0.1, 0.05, 0.025, 0.01, 0.005,
    0.0025, 0.001, 0.0005, 0.00025, 0.0001,
];

/// A marker as last drawn by the controller.
#[derive(Debug, Clone)]
struct RenderedMarker {
    id: MarkerId,
    position: LngLat,
    label: String,
}

/// Map canvas state kept between frames.
pub struct MapView {
    camera: Viewport,
    markers: Vec<RenderedMarker>,
    open_popup: Option<MarkerId>,
    requested_flight: Option<FlyTo>,
    flight: Option<Flight>,
}

impl MapView {
    pub fn new(camera: Viewport) -> Self {
        Self {
            camera,
            markers: Vec::new(),
            open_popup: None,
            requested_flight: None,
            flight: None,
        }
    }

    /// Live camera of the canvas.
    #[cfg(test)]
    pub fn camera(&self) -> Viewport {
        self.camera
    }

    #[cfg(test)]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    pub fn is_flying(&self) -> bool {
        self.flight.is_some() || self.requested_flight.is_some()
    }

    /// Start a requested flight and move the camera along the running one.
    ///
    /// Returns `true` while an animation is still in progress.
    pub fn advance(&mut self, now: f64, screen_extent: f64) -> bool {
        if let Some(command) = self.requested_flight.take() {
            self.flight = Some(Flight::new(self.camera, &command, screen_extent, now));
        }

        let Some(flight) = &self.flight else {
            return false;
        };

        self.camera = flight.sample(now);
        if flight.is_finished(now) {
            self.flight = None;
            false
        } else {
            true
        }
    }

    /// Topmost marker whose pin covers `pos`.
    fn marker_at(&self, transform: &ScreenTransform, pos: Pos2) -> Option<MarkerId> {
        self.markers.iter().rev().find_map(|marker| {
            let tip = to_pos(transform.to_screen(marker.position));
            let head = tip - Vec2::new(0.0, PIN_HEIGHT);
            let on_head = head.distance(pos) <= PIN_HIT_RADIUS;
            let on_stem = (pos.x - tip.x).abs() <= 3.0 && pos.y >= head.y && pos.y <= tip.y;
            (on_head || on_stem).then_some(marker.id)
        })
    }

    /// Display the map and collect the notifications of this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, subscriptions: Subscriptions) -> Vec<MapEvent> {
        let mut events = Vec::new();
        let before = self.camera;

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        let now = ui.input(|i| i.time);
        if self.advance(now, rect.width().max(rect.height()) as f64) {
            ui.ctx().request_repaint();
        }

        // Handle pan (drag)
        if response.dragged() {
            self.flight = None;
            let delta = response.drag_delta();
            self.camera = geometry::pan(&self.camera, (delta.x as f64, delta.y as f64));
        }

        // Handle zoom (mouse wheel) towards the cursor
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.flight = None;
                let anchor = response
                    .hover_pos()
                    .map(|p| p - rect.center())
                    .unwrap_or(Vec2::ZERO);
                self.camera = geometry::zoom_around(
                    &self.camera,
                    scroll as f64 / SCROLL_PER_ZOOM,
                    (anchor.x as f64, anchor.y as f64),
                );
            }
        }

        if self.camera != before {
            log::trace!(
                "Viewport moved to ({:.4}, {:.4}) z{:.2}",
                self.camera.center.lng,
                self.camera.center.lat,
                self.camera.zoom
            );
            events.push(MapEvent::Moved(self.camera));
        }

        let transform = ScreenTransform::new(
            &self.camera,
            (rect.center().x as f64, rect.center().y as f64),
        );

        painter.rect_filled(rect, 0.0, BACKGROUND);
        draw_graticule(&painter, rect, &transform);

        let hovered = response.hover_pos().and_then(|p| self.marker_at(&transform, p));
        for marker in &self.markers {
            let tip = to_pos(transform.to_screen(marker.position));
            let armed = subscriptions.marker_click && hovered == Some(marker.id);
            draw_pin(&painter, tip, if armed { PIN_DELETE } else { PIN });
        }

        if let Some(marker) = self
            .open_popup
            .and_then(|id| self.markers.iter().find(|m| m.id == id))
        {
            let tip = to_pos(transform.to_screen(marker.position));
            draw_popup(&painter, tip, &marker.label);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let hit = self.marker_at(&transform, pos);
                if subscriptions.marker_click {
                    if let Some(id) = hit {
                        events.push(MapEvent::MarkerClicked(id));
                    }
                } else if subscriptions.map_click {
                    events.push(MapEvent::Clicked(transform.to_lng_lat((pos.x as f64, pos.y as f64))));
                } else {
                    // Without subscriptions a click only toggles label popups
                    self.open_popup = match hit {
                        Some(id) if self.open_popup != Some(id) => Some(id),
                        _ => None,
                    };
                }
            }
        }

        if response.hovered() {
            let icon = if response.dragged() {
                egui::CursorIcon::Grabbing
            } else if subscriptions.map_click {
                egui::CursorIcon::Crosshair
            } else if hovered.is_some() {
                egui::CursorIcon::PointingHand
            } else {
                egui::CursorIcon::Grab
            };
            ui.ctx().set_cursor_icon(icon);
        }

        events
    }
}

impl MapSurface for MapView {
    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, id: MarkerId, marker: &Marker) {
        self.markers.push(RenderedMarker {
            id,
            position: marker.position(),
            label: marker.label.clone(),
        });
    }

    fn fly_to(&mut self, command: FlyTo) {
        self.requested_flight = Some(command);
    }
}

fn to_pos(point: (f64, f64)) -> Pos2 {
    Pos2::new(point.0 as f32, point.1 as f32)
}

/// Draw longitude/latitude lines with a spacing that follows the zoom level.
fn draw_graticule(painter: &egui::Painter, rect: Rect, transform: &ScreenTransform) {
    let ppd = transform.pixels_per_degree();
    let step = GRID_STEPS
        .iter()
        .copied()
        .filter(|step| step * ppd >= MIN_GRID_SPACING)
        .last()
        .unwrap_or(GRID_STEPS[0]);
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };

    let stroke = Stroke::new(1.0, GRID);
    let font = FontId::monospace(10.0);

    let top_left = transform.to_lng_lat((rect.left() as f64, rect.top() as f64));
    let bottom_right = transform.to_lng_lat((rect.right() as f64, rect.bottom() as f64));

    let first = (top_left.lng / step).ceil() as i64;
    let last = (bottom_right.lng / step).floor() as i64;
    for k in first..=last.min(first + 200) {
        let lng = k as f64 * step;
        let (x, _) = transform.to_screen(LngLat::new(lng, 0.0));
        let x = x as f32;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        painter.text(
            Pos2::new(x + 3.0, rect.bottom() - 3.0),
            Align2::LEFT_BOTTOM,
            format!("{:.*}°", decimals, geometry::normalize(LngLat::new(lng, 0.0)).lng),
            font.clone(),
            GRID_LABEL,
        );
    }

    let south = bottom_right.lat.max(-MAX_LATITUDE);
    let north = top_left.lat.min(MAX_LATITUDE);
    let first = (south / step).ceil() as i64;
    let last = (north / step).floor() as i64;
    for k in first..=last.min(first + 200) {
        let lat = k as f64 * step;
        let (_, y) = transform.to_screen(LngLat::new(0.0, lat));
        let y = y as f32;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        painter.text(
            Pos2::new(rect.left() + 3.0, y - 2.0),
            Align2::LEFT_BOTTOM,
            format!("{:.*}°", decimals, lat),
            font.clone(),
            GRID_LABEL,
        );
    }
}

/// Draw a pin whose tip sits on the marked coordinate.
fn draw_pin(painter: &egui::Painter, tip: Pos2, color: Color32) {
    let head = tip - Vec2::new(0.0, PIN_HEIGHT);
    painter.line_segment([head, tip], Stroke::new(2.5, color));
    painter.circle_filled(head, PIN_HEAD_RADIUS, color);
    painter.circle_stroke(head, PIN_HEAD_RADIUS, Stroke::new(1.5, Color32::WHITE));
    painter.circle_filled(head, 2.5, Color32::WHITE);
}

/// Draw a label bubble above a pin.
fn draw_popup(painter: &egui::Painter, tip: Pos2, label: &str) {
    let galley = painter.layout_no_wrap(
        label.to_string(),
        FontId::proportional(13.0),
        Color32::from_gray(30),
    );
    let size = galley.size() + Vec2::new(14.0, 8.0);
    let bottom = tip.y - PIN_HEIGHT - PIN_HEAD_RADIUS - 6.0;
    let bubble = Rect::from_min_size(Pos2::new(tip.x - size.x / 2.0, bottom - size.y), size);

    painter.rect(
        bubble,
        4.0,
        Color32::WHITE,
        Stroke::new(1.0, Color32::from_gray(160)),
    );
    painter.galley(bubble.min + Vec2::new(7.0, 4.0), galley, Color32::from_gray(30));
}
