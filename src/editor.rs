//! Landmark editor state: photo dimensions, viewport fit, the two markers
//! and the events emitted when a drag completes.
//!
//! The editor knows nothing about egui painting. The app feeds it load,
//! resize and drag events and reads marker positions back to draw them.

use log::{debug, info, warn};

use crate::geometry::{CrownChinPointPair, Point, Size};
use crate::marker::{Landmark, Marker};
use crate::viewport::ViewportFit;

/// Images must be larger than this on both axes before markers are placed.
pub const MIN_IMAGE_SIDE: f32 = 100.0;

/// Emitted once per completed marker drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkEvent {
    pub moved: Landmark,
    pub landmarks: CrownChinPointPair,
}

#[derive(Debug)]
pub struct LandmarkEditor {
    image_size: Option<Size>,
    container: Size,
    fit: Option<ViewportFit>,
    landmarks: CrownChinPointPair,
    crown: Marker,
    chin: Marker,
    visible: bool,
    events: Vec<LandmarkEvent>,
}

impl LandmarkEditor {
    pub fn new(marker_size: Size) -> Self {
        Self {
            image_size: None,
            container: Size::default(),
            fit: None,
            landmarks: CrownChinPointPair::default(),
            crown: Marker::new(Landmark::Crown, marker_size),
            chin: Marker::new(Landmark::Chin, marker_size),
            visible: false,
            events: Vec::new(),
        }
    }

    /// Records the dimensions of a freshly decoded photo.
    ///
    /// Photos at or below the size threshold are accepted but never fitted,
    /// so the markers stay hidden.
    pub fn set_image_size(&mut self, size: Size) {
        self.image_size = Some(size);
        if size.exceeds(MIN_IMAGE_SIDE) {
            self.refit();
        } else {
            info!(
                "photo {}x{} is below the {}px threshold, landmarks hidden",
                size.width, size.height, MIN_IMAGE_SIDE
            );
            self.fit = None;
        }
        self.render_landmarks();
    }

    /// Container resized: recompute the fit and move the markers.
    pub fn resize(&mut self, container: Size) {
        if self.container == container {
            return;
        }
        self.container = container;
        self.refit();
        self.render_landmarks();
    }

    pub fn set_landmarks(&mut self, landmarks: CrownChinPointPair) {
        self.landmarks = landmarks;
        self.render_landmarks();
    }

    fn refit(&mut self) {
        self.fit = match self.image_size {
            Some(image) if image.exceeds(MIN_IMAGE_SIDE) => ViewportFit::compute(image, self.container),
            _ => None,
        };
        if let Some(fit) = &self.fit {
            debug!(
                "viewport fit: ratio {:.4}, offset ({:.1}, {:.1}) in {}x{}",
                fit.ratio, fit.left, fit.top, self.container.width, self.container.height
            );
        }
    }

    /// Places both markers over their landmarks, or hides them when the
    /// landmarks or the photo are not ready.
    pub fn render_landmarks(&mut self) {
        let ready = self.landmarks.is_set()
            && self.image_size.is_some_and(|s| s.exceeds(MIN_IMAGE_SIDE));
        match (ready, self.fit) {
            (true, Some(fit)) => {
                let crown = fit.pixel_to_screen(self.landmarks.crown, self.crown.size);
                let chin = fit.pixel_to_screen(self.landmarks.chin, self.chin.size);
                self.crown.translate_to(crown);
                self.chin.translate_to(chin);
                self.visible = true;
            }
            _ => self.visible = false,
        }
    }

    pub fn drag_marker(&mut self, which: Landmark, delta: egui::Vec2) {
        if !self.visible {
            return;
        }
        self.marker_mut(which).drag_by(delta);
    }

    /// Finishes a drag: restricts the marker to the container, converts
    /// both markers back to image pixels and queues an event.
    ///
    /// A drop that lands on a zero image coordinate would leave the pair
    /// unset, so the marker snaps back to its previous landmark instead.
    pub fn end_drag(&mut self, which: Landmark) {
        if !self.visible || !self.marker(which).dragging {
            return;
        }
        let container = self.container;
        self.marker_mut(which).end_drag(container);
        match self.read_back() {
            Some(landmarks) if landmarks.is_set() => {
                self.landmarks = landmarks;
                info!(
                    "{} moved: crown ({:.1}, {:.1}), chin ({:.1}, {:.1})",
                    which.label(),
                    landmarks.crown.x,
                    landmarks.crown.y,
                    landmarks.chin.x,
                    landmarks.chin.y
                );
                self.events.push(LandmarkEvent {
                    moved: which,
                    landmarks,
                });
            }
            Some(_) => warn!("{} dropped on the image edge, move discarded", which.label()),
            None => {}
        }
        self.render_landmarks();
    }

    fn read_back(&self) -> Option<CrownChinPointPair> {
        let fit = self.fit?;
        Some(CrownChinPointPair::new(
            fit.screen_to_pixel(self.crown.pos, self.crown.size),
            fit.screen_to_pixel(self.chin.pos, self.chin.size),
        ))
    }

    /// Reads both markers back into image pixels. Returns false when there
    /// is no fit to invert.
    pub fn update_landmarks(&mut self) -> bool {
        match self.read_back() {
            Some(landmarks) => {
                self.landmarks = landmarks;
                true
            }
            None => false,
        }
    }

    pub fn drain_events(&mut self) -> Vec<LandmarkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Topmost visible marker under a container-relative point.
    pub fn marker_at(&self, p: Point) -> Option<Landmark> {
        if !self.visible {
            return None;
        }
        [&self.chin, &self.crown]
            .into_iter()
            .find(|m| m.contains(p))
            .map(|m| m.landmark)
    }

    pub fn marker(&self, which: Landmark) -> &Marker {
        match which {
            Landmark::Crown => &self.crown,
            Landmark::Chin => &self.chin,
        }
    }

    fn marker_mut(&mut self, which: Landmark) -> &mut Marker {
        match which {
            Landmark::Crown => &mut self.crown,
            Landmark::Chin => &mut self.chin,
        }
    }

    pub fn landmarks(&self) -> CrownChinPointPair {
        self.landmarks
    }

    pub fn landmarks_visible(&self) -> bool {
        self.visible
    }

    pub fn fit(&self) -> Option<ViewportFit> {
        self.fit
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn marker() -> Size {
        Size::new(20.0, 20.0)
    }

    fn pair() -> CrownChinPointPair {
        CrownChinPointPair::new(Point::new(500.0, 400.0), Point::new(500.0, 1600.0))
    }

    fn ready_editor() -> LandmarkEditor {
        let mut ed = LandmarkEditor::new(marker());
        ed.resize(Size::new(500.0, 500.0));
        ed.set_image_size(Size::new(1000.0, 2000.0));
        ed.set_landmarks(pair());
        ed
    }

    #[test]
    fn test_hidden_until_everything_is_ready() {
        let mut ed = LandmarkEditor::new(marker());
        ed.set_landmarks(pair());
        assert!(!ed.landmarks_visible());

        ed.resize(Size::new(500.0, 500.0));
        assert!(!ed.landmarks_visible());

        ed.set_image_size(Size::new(1000.0, 2000.0));
        assert!(ed.landmarks_visible());
    }

    #[test]
    fn test_hidden_when_a_point_is_unset() {
        let mut ed = ready_editor();
        ed.set_landmarks(CrownChinPointPair::new(Point::new(500.0, 400.0), Point::new(0.0, 1600.0)));
        assert!(!ed.landmarks_visible());
        ed.set_landmarks(pair());
        assert!(ed.landmarks_visible());
    }

    #[test]
    fn test_hidden_for_small_image() {
        let mut ed = ready_editor();
        ed.set_image_size(Size::new(100.0, 2000.0));
        assert!(!ed.landmarks_visible());
        assert!(ed.fit().is_none());
    }

    #[test]
    fn test_markers_follow_resize() {
        let mut ed = ready_editor();
        let crown = ed.marker(Landmark::Crown).pos;
        // ratio 0.25, left 187.5 -> 187.5 + 125 - 10
        assert_relative_eq!(crown.x, 302.5);
        assert_relative_eq!(crown.y, 90.0);

        ed.resize(Size::new(1000.0, 1000.0));
        let crown = ed.marker(Landmark::Crown).pos;
        assert_relative_eq!(crown.x, 490.0);
        assert_relative_eq!(crown.y, 190.0);
    }

    #[test]
    fn test_one_event_per_completed_drag() {
        let mut ed = ready_editor();
        ed.drag_marker(Landmark::Chin, egui::vec2(10.0, 0.0));
        ed.drag_marker(Landmark::Chin, egui::vec2(10.0, -25.0));
        assert!(ed.drain_events().is_empty());

        ed.end_drag(Landmark::Chin);
        let events = ed.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].moved, Landmark::Chin);
        let lm = events[0].landmarks;
        assert_relative_eq!(lm.chin.x, 580.0, max_relative = 1e-5);
        assert_relative_eq!(lm.chin.y, 1500.0, max_relative = 1e-5);
        assert_relative_eq!(lm.crown.x, 500.0, max_relative = 1e-5);
        assert_eq!(ed.landmarks(), lm);

        // A second release without movement is not a drag.
        ed.end_drag(Landmark::Chin);
        assert!(ed.drain_events().is_empty());
    }

    #[test]
    fn test_drag_end_restricted_to_container() {
        let mut ed = ready_editor();
        ed.drag_marker(Landmark::Crown, egui::vec2(0.0, -1000.0));
        ed.end_drag(Landmark::Crown);
        assert_eq!(ed.marker(Landmark::Crown).pos.y, 0.0);
        let lm = ed.drain_events()[0].landmarks;
        // marker center at y = 10 screen -> 40 px
        assert_relative_eq!(lm.crown.y, 40.0, max_relative = 1e-5);
    }

    #[test]
    fn test_drop_on_zero_coordinate_snaps_back() {
        // ratio 0.25, left 10: a marker clamped to x = 0 maps to pixel x = 0
        let mut ed = LandmarkEditor::new(marker());
        ed.resize(Size::new(270.0, 500.0));
        ed.set_image_size(Size::new(1000.0, 2000.0));
        ed.set_landmarks(pair());
        let before = ed.marker(Landmark::Crown).pos;

        ed.drag_marker(Landmark::Crown, egui::vec2(-1000.0, 0.0));
        ed.end_drag(Landmark::Crown);

        assert!(ed.drain_events().is_empty());
        assert_eq!(ed.landmarks(), pair());
        assert!(ed.landmarks_visible());
        assert_relative_eq!(ed.marker(Landmark::Crown).pos.x, before.x);
        assert!(!ed.marker(Landmark::Crown).dragging);

        ed.resize(Size::new(271.0, 500.0));
        assert!(ed.landmarks_visible());
        ed.drag_marker(Landmark::Crown, egui::vec2(4.0, 0.0));
        ed.end_drag(Landmark::Crown);
        assert_eq!(ed.drain_events().len(), 1);
    }

    #[test]
    fn test_visibility_matches_landmarks_after_drag() {
        let mut ed = ready_editor();
        ed.drag_marker(Landmark::Chin, egui::vec2(-400.0, 400.0));
        ed.end_drag(Landmark::Chin);
        assert_eq!(ed.landmarks_visible(), ed.landmarks().is_set());
    }

    #[test]
    fn test_drag_ignored_while_hidden() {
        let mut ed = LandmarkEditor::new(marker());
        ed.drag_marker(Landmark::Crown, egui::vec2(5.0, 5.0));
        ed.end_drag(Landmark::Crown);
        assert!(ed.drain_events().is_empty());
        assert_eq!(ed.marker(Landmark::Crown).pos, Point::ZERO);
    }

    #[test]
    fn test_marker_hit_testing() {
        let ed = ready_editor();
        let crown_center = ed.marker(Landmark::Crown).center();
        assert_eq!(ed.marker_at(crown_center), Some(Landmark::Crown));
        assert_eq!(ed.marker_at(Point::new(1.0, 1.0)), None);
    }
}
