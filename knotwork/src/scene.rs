use log::trace;

use crate::model::{Anchor, Curve, CurveId, Vec2};

/// The curves on the canvas, in insertion order.
///
/// Edits addressed to a curve or anchor that no longer exists are no-ops that
/// report `false`/`None`; they never fail.
#[derive(Clone, Debug)]
pub struct SceneStore {
    // Ids are issued in increasing order, so this stays sorted by id.
    curves: Vec<(CurveId, Curve)>,
    next_id: u32,
    geom_ver: u64,
}

impl Default for SceneStore {
    fn default() -> Self {
        SceneStore::new()
    }
}

impl SceneStore {
    pub fn new() -> Self {
        SceneStore { curves: Vec::new(), next_id: 0, geom_ver: 1 }
    }

    /// Bumped on every mutation that took effect.
    pub fn version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    fn slot(&self, id: CurveId) -> Option<usize> {
        self.curves.binary_search_by_key(&id, |(cid, _)| *cid).ok()
    }

    fn curve_mut(&mut self, id: CurveId) -> Option<&mut Curve> {
        let i = self.slot(id)?;
        Some(&mut self.curves[i].1)
    }

    pub fn get(&self, id: CurveId) -> Option<&Curve> {
        self.slot(id).map(|i| &self.curves[i].1)
    }

    pub fn contains(&self, id: CurveId) -> bool {
        self.slot(id).is_some()
    }

    pub fn anchor(&self, id: CurveId, index: usize) -> Option<Anchor> {
        self.get(id)?.anchors.get(index).copied()
    }

    /// Stable insertion-ordered view.
    pub fn curves(&self) -> impl Iterator<Item = (CurveId, &Curve)> + '_ {
        self.curves.iter().map(|(id, c)| (*id, c))
    }

    pub fn all_curves(&self) -> Vec<(CurveId, &Curve)> {
        self.curves().collect()
    }

    pub fn add_curve(&mut self, curve: Curve) -> CurveId {
        let id = CurveId(self.next_id);
        self.next_id += 1;
        self.curves.push((id, curve));
        self.bump();
        id
    }

    pub fn remove_curve(&mut self, id: CurveId) -> bool {
        match self.slot(id) {
            Some(i) => {
                self.curves.remove(i);
                self.bump();
                true
            }
            None => {
                trace!("remove_curve: no curve {:?}", id);
                false
            }
        }
    }

    /// Drop every curve. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.curves.clear();
        self.bump();
    }

    pub fn update_anchor(&mut self, id: CurveId, index: usize, position: Vec2) -> bool {
        if !position.is_finite() {
            return false;
        }
        let anchor = match self.curve_mut(id).and_then(|c| c.anchors.get_mut(index)) {
            Some(a) => a,
            None => {
                trace!("update_anchor: no anchor {} on {:?}", index, id);
                return false;
            }
        };
        if anchor.point == position {
            return true;
        }
        anchor.point = position;
        self.bump();
        true
    }

    /// Insert a corner anchor right after `after_index` and return its index.
    pub fn insert_anchor(&mut self, id: CurveId, after_index: usize, position: Vec2) -> Option<usize> {
        if !position.is_finite() {
            return None;
        }
        let curve = self.curve_mut(id)?;
        if after_index >= curve.anchors.len() {
            trace!("insert_anchor: index {} out of range on {:?}", after_index, id);
            return None;
        }
        let index = after_index + 1;
        curve.anchors.insert(index, Anchor::corner(position));
        self.bump();
        Some(index)
    }

    /// Append a corner anchor, as a freehand stroke grows.
    pub fn append_anchor(&mut self, id: CurveId, position: Vec2) -> Option<usize> {
        if !position.is_finite() {
            return None;
        }
        let curve = self.curve_mut(id)?;
        curve.anchors.push(Anchor::corner(position));
        let index = curve.anchors.len() - 1;
        self.bump();
        Some(index)
    }

    pub fn set_anchors(&mut self, id: CurveId, anchors: Vec<Anchor>) -> bool {
        match self.curve_mut(id) {
            Some(c) => c.anchors = anchors,
            None => return false,
        }
        self.bump();
        true
    }

    pub fn set_closed(&mut self, id: CurveId, closed: bool) -> bool {
        let changed = match self.curve_mut(id) {
            Some(c) if c.closed != closed => {
                c.closed = closed;
                true
            }
            Some(_) => false,
            None => return false,
        };
        if changed {
            self.bump();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;

    fn tri(x: f32) -> Curve {
        Curve::polygon(&[Vec2::new(x, 0.0), Vec2::new(x + 10.0, 0.0), Vec2::new(x, 10.0)], Color::BLACK, 1.0)
    }

    #[test]
    fn ids_are_fresh_and_order_is_insertion_order() {
        let mut s = SceneStore::new();
        let a = s.add_curve(tri(0.0));
        let b = s.add_curve(tri(20.0));
        let c = s.add_curve(tri(40.0));
        assert!(a != b && b != c);
        assert!(s.remove_curve(b));
        let d = s.add_curve(tri(60.0));
        let ids: Vec<CurveId> = s.curves().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c, d]);
        s.clear();
        let e = s.add_curve(tri(0.0));
        assert!(e > d, "ids must not be reused after clear");
    }

    #[test]
    fn remove_missing_is_a_noop() {
        let mut s = SceneStore::new();
        let a = s.add_curve(tri(0.0));
        assert!(s.remove_curve(a));
        let ver = s.version();
        assert!(!s.remove_curve(a));
        assert!(!s.remove_curve(CurveId(999)));
        assert_eq!(s.len(), 0);
        assert_eq!(s.version(), ver);
    }

    #[test]
    fn update_anchor_keeps_identity_and_count() {
        let mut s = SceneStore::new();
        let a = s.add_curve(tri(0.0));
        assert!(s.update_anchor(a, 1, Vec2::new(50.0, 50.0)));
        let c = s.get(a).unwrap();
        assert_eq!(c.anchors.len(), 3);
        assert_eq!(c.anchors[1].point, Vec2::new(50.0, 50.0));
        assert!(!s.update_anchor(a, 3, Vec2::new(1.0, 1.0)));
        assert!(!s.update_anchor(a, 0, Vec2::new(f32::NAN, 1.0)));
        assert!(!s.update_anchor(CurveId(77), 0, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn insert_anchor_goes_after_index() {
        let mut s = SceneStore::new();
        let a = s.add_curve(tri(0.0));
        assert_eq!(s.insert_anchor(a, 2, Vec2::new(0.0, 5.0)), Some(3));
        assert_eq!(s.insert_anchor(a, 0, Vec2::new(5.0, 0.0)), Some(1));
        let pts: Vec<Vec2> = s.get(a).unwrap().anchors.iter().map(|a| a.point).collect();
        assert_eq!(
            pts,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(5.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(0.0, 10.0),
                Vec2::new(0.0, 5.0),
            ]
        );
        assert_eq!(s.insert_anchor(a, 5, Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn version_tracks_effective_edits_only() {
        let mut s = SceneStore::new();
        let v0 = s.version();
        let a = s.add_curve(tri(0.0));
        let v1 = s.version();
        assert!(v1 > v0);
        assert!(s.update_anchor(a, 0, Vec2::new(0.0, 0.0)));
        assert!(s.set_closed(a, true));
        assert_eq!(s.version(), v1);
        assert!(s.set_closed(a, false));
        assert!(s.version() > v1);
    }
}
