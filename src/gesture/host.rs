use crate::hit_test::{Bounds, Point};
use crate::tree::NodeId;

/// What the gesture controller needs from the environment that draws nodes.
pub trait DragHost {
    /// Whatever a pointer event points at (an element handle, a cell, ...).
    type Target;

    /// Id of the nearest node-tagged element at or above `target`.
    fn closest_node_id(&self, target: &Self::Target) -> Option<NodeId>;

    /// Bounding rectangle of that same element.
    fn bounding_rect(&self, target: &Self::Target) -> Option<Bounds>;
}

impl<T: DragHost + ?Sized> DragHost for &T {
    type Target = T::Target;

    fn closest_node_id(&self, target: &Self::Target) -> Option<NodeId> {
        (**self).closest_node_id(target)
    }

    fn bounding_rect(&self, target: &Self::Target) -> Option<Bounds> {
        (**self).bounding_rect(target)
    }
}

/// Host backed by a flat list of node rectangles, targeted by position.
///
/// Elements pushed later sit on top, so pushing parents before children makes
/// the innermost element win.
#[derive(Debug, Default, Clone)]
pub struct BoundsHost {
    elements: Vec<(NodeId, Bounds)>,
}

impl BoundsHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: NodeId, bounds: Bounds) {
        self.elements.push((id, bounds));
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[(NodeId, Bounds)] {
        &self.elements
    }

    pub fn element_at(&self, point: Point) -> Option<&(NodeId, Bounds)> {
        self.elements
            .iter()
            .rev()
            .find(|(_, bounds)| bounds.contains(point))
    }
}

impl FromIterator<(NodeId, Bounds)> for BoundsHost {
    fn from_iter<I: IntoIterator<Item = (NodeId, Bounds)>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl DragHost for BoundsHost {
    type Target = Point;

    fn closest_node_id(&self, target: &Point) -> Option<NodeId> {
        self.element_at(*target).map(|(id, _)| id.clone())
    }

    fn bounding_rect(&self, target: &Point) -> Option<Bounds> {
        self.element_at(*target).map(|(_, bounds)| *bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_element_wins() {
        let host: BoundsHost = [
            (NodeId::new("outer"), Bounds::new(0.0, 0.0, 100.0, 100.0)),
            (NodeId::new("inner"), Bounds::new(10.0, 10.0, 20.0, 20.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            host.closest_node_id(&Point::new(15.0, 15.0)),
            Some(NodeId::new("inner"))
        );
        assert_eq!(
            host.closest_node_id(&Point::new(50.0, 50.0)),
            Some(NodeId::new("outer"))
        );
        assert_eq!(host.closest_node_id(&Point::new(150.0, 50.0)), None);
        assert_eq!(
            host.bounding_rect(&Point::new(15.0, 15.0)),
            Some(Bounds::new(10.0, 10.0, 20.0, 20.0))
        );
    }
}
