use crate::model::{Color, Marker, MarkerId, Vec2};

/// Rendered intersection markers. Rebuilt from scratch by every recompute.
#[derive(Clone, Debug)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    next_id: u32,
    radius: f32,
    fill: Color,
}

impl MarkerLayer {
    pub fn new(radius: f32, fill: Color) -> Self {
        MarkerLayer { markers: Vec::new(), next_id: 0, radius, fill }
    }

    /// Style for markers added from now on.
    pub fn set_style(&mut self, radius: f32, fill: Color) {
        self.radius = radius;
        self.fill = fill;
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn add_marker(&mut self, center: Vec2) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.markers.push(Marker { id, center, radius: self.radius, fill: self.fill });
        id
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
