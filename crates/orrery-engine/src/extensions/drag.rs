// extensions/drag.rs
//
// Pointer drag behaviors: turn a stream of pointer rays into world-space
// deltas, constrained to a line or a plane through the grabbed point.

use glam::Vec3;
use crate::core::bounds::Ray;

/// How a drag is constrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    /// Move along a world axis only.
    Axis(Vec3),
    /// Move freely on the plane with this normal.
    Plane(Vec3),
}

/// Plane the pointer ray is intersected with while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragPlane {
    point: Vec3,
    normal: Vec3,
}

/// Drag behavior attached to one entity.
#[derive(Debug, Clone)]
pub struct PointerDragBehavior {
    pub mode: DragMode,
    pub enabled: bool,
    plane: Option<DragPlane>,
    last_point: Vec3,
}

impl PointerDragBehavior {
    pub fn new(mode: DragMode) -> Self {
        Self {
            mode,
            enabled: true,
            plane: None,
            last_point: Vec3::ZERO,
        }
    }

    pub fn axis(axis: Vec3) -> Self {
        Self::new(DragMode::Axis(axis.normalize_or_zero()))
    }

    pub fn plane(normal: Vec3) -> Self {
        Self::new(DragMode::Plane(normal.normalize_or_zero()))
    }

    pub fn is_dragging(&self) -> bool {
        self.plane.is_some()
    }

    /// Begin dragging from `anchor`, the point on the entity the ray grabbed.
    /// Returns the drag-plane point, or `None` when the ray cannot reach the plane.
    pub fn start(&mut self, ray: &Ray, anchor: Vec3) -> Option<Vec3> {
        if !self.enabled {
            return None;
        }
        let normal = match self.mode {
            DragMode::Plane(normal) => normal,
            DragMode::Axis(axis) => {
                // The plane contains the axis and faces the pointer as much as it can.
                let facing = ray.direction - axis * ray.direction.dot(axis);
                if facing.length_squared() < 1e-8 {
                    return None;
                }
                facing.normalize()
            }
        };
        let plane = DragPlane { point: anchor, normal };
        let hit = intersect(ray, &plane)?;
        let point = self.constrain(anchor, hit);
        self.plane = Some(plane);
        self.last_point = point;
        Some(point)
    }

    /// World delta since the previous drag point. `None` when not dragging or
    /// the ray misses the drag plane.
    pub fn drag(&mut self, ray: &Ray) -> Option<Vec3> {
        let plane = self.plane?;
        let hit = intersect(ray, &plane)?;
        let point = self.constrain(plane.point, hit);
        let delta = point - self.last_point;
        self.last_point = point;
        Some(delta)
    }

    /// Stop dragging. Returns whether a drag was in progress.
    pub fn end(&mut self) -> bool {
        self.plane.take().is_some()
    }

    /// Switch constraint mid-gesture. The current drag, if any, is dropped.
    pub fn set_mode(&mut self, mode: DragMode) {
        self.mode = mode;
        self.plane = None;
    }

    fn constrain(&self, anchor: Vec3, hit: Vec3) -> Vec3 {
        match self.mode {
            DragMode::Axis(axis) => anchor + axis * (hit - anchor).dot(axis),
            DragMode::Plane(_) => hit,
        }
    }
}

fn intersect(ray: &Ray, plane: &DragPlane) -> Option<Vec3> {
    ray.intersect_plane(plane.point, plane.normal).map(|t| ray.at(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_to(from: Vec3, to: Vec3) -> Ray {
        Ray::new(from, to - from)
    }

    #[test]
    fn axis_drag_only_moves_along_axis() {
        let eye = Vec3::new(0.0, 0.0, -10.0);
        let mut drag = PointerDragBehavior::axis(Vec3::Y);
        let anchor = Vec3::new(0.0, 1.0, 0.0);

        let start = drag.start(&ray_to(eye, anchor), anchor).unwrap();
        assert!((start - anchor).length() < 1e-4);

        let delta = drag.drag(&ray_to(eye, Vec3::new(3.0, 2.5, 0.0))).unwrap();
        assert!(delta.x.abs() < 1e-4 && delta.z.abs() < 1e-4);
        assert!((delta.y - 1.5).abs() < 1e-3, "{delta:?}");
    }

    #[test]
    fn plane_drag_follows_pointer_on_floor() {
        let eye = Vec3::new(0.0, 5.0, -5.0);
        let mut drag = PointerDragBehavior::plane(Vec3::Y);
        let anchor = Vec3::ZERO;

        drag.start(&ray_to(eye, anchor), anchor).unwrap();
        let delta = drag.drag(&ray_to(eye, Vec3::new(1.0, 0.0, 2.0))).unwrap();
        assert!((delta - Vec3::new(1.0, 0.0, 2.0)).length() < 1e-3, "{delta:?}");
        assert!(drag.end());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn deltas_are_incremental() {
        let eye = Vec3::new(0.0, 5.0, -5.0);
        let mut drag = PointerDragBehavior::plane(Vec3::Y);
        drag.start(&ray_to(eye, Vec3::ZERO), Vec3::ZERO).unwrap();
        drag.drag(&ray_to(eye, Vec3::new(1.0, 0.0, 0.0))).unwrap();
        let second = drag.drag(&ray_to(eye, Vec3::new(1.5, 0.0, 0.0))).unwrap();
        assert!((second.x - 0.5).abs() < 1e-3);
    }

    #[test]
    fn ray_along_axis_cannot_start() {
        let mut drag = PointerDragBehavior::axis(Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!(drag.start(&ray, Vec3::ZERO).is_none());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn disabled_behavior_ignores_pointer() {
        let mut drag = PointerDragBehavior::plane(Vec3::Y);
        drag.enabled = false;
        let ray = ray_to(Vec3::new(0.0, 5.0, -5.0), Vec3::ZERO);
        assert!(drag.start(&ray, Vec3::ZERO).is_none());
        assert!(drag.drag(&ray).is_none());
    }
}
