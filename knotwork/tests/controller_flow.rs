use knotwork::model::{Color, CurveLocation, Size, Vec2};
use knotwork::{Controller, EditState, Key, Options};

fn surface() -> Controller {
    Controller::new(Size { width: 800.0, height: 600.0 }, Options::default())
}

// Traces a rectangle outline every 5 px, ending where it started.
fn rectangle_trace(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vec2> {
    let corners = [Vec2::new(x0, y0), Vec2::new(x1, y0), Vec2::new(x1, y1), Vec2::new(x0, y1), Vec2::new(x0, y0)];
    let mut out = vec![corners[0]];
    for w in corners.windows(2) {
        let d = w[1] - w[0];
        let steps = (d.length() / 5.0).ceil() as usize;
        for k in 1..=steps {
            out.push(w[0] + d * (k as f32 / steps as f32));
        }
    }
    out
}

fn draw(c: &mut Controller, trace: &[Vec2]) {
    c.pointer_down(trace[0]);
    for p in &trace[1..] {
        c.pointer_drag(*p);
    }
    c.pointer_up(trace[trace.len() - 1]);
}

#[test]
fn starts_with_a_lone_knot_and_no_markers() {
    let c = surface();
    assert_eq!(c.state(), EditState::Idle);
    let curves: Vec<_> = c.curves().collect();
    assert_eq!(curves.len(), 1);
    let knot = curves[0].1;
    assert_eq!(knot.anchors.len(), 21);
    assert!(knot.closed);
    assert_eq!(knot.stroke, Color::BLUE);
    assert_eq!(knot.stroke_width, 20.0);
    assert!(c.markers().is_empty());
}

#[test]
fn drawn_stroke_closes_and_marks_crossings() {
    let mut c = surface();
    c.key_down(Key::from_name("d"));
    assert_eq!(c.state(), EditState::Drawing { stroke: None });

    let trace = rectangle_trace(100.0, 200.0, 700.0, 400.0);
    c.pointer_down(trace[0]);
    let stroke = match c.state() {
        EditState::Drawing { stroke: Some(id) } => id,
        s => panic!("unexpected state {:?}", s),
    };
    for p in &trace[1..] {
        c.pointer_drag(*p);
    }
    assert!(!c.scene().get(stroke).unwrap().closed);
    assert!(c.markers().is_empty(), "open strokes are not intersected");

    c.pointer_up(trace[trace.len() - 1]);
    assert_eq!(c.state(), EditState::Drawing { stroke: None });
    let drawn = c.scene().get(stroke).unwrap();
    assert!(drawn.closed);
    assert_eq!(drawn.stroke, Color::BLACK);
    assert_eq!(drawn.stroke_width, 2.0);
    assert!(drawn.anchors.len() < trace.len(), "stroke should be simplified");
    // top and bottom edges each cross the knot twice
    assert_eq!(c.markers().len(), 4);
    for m in c.markers() {
        assert_eq!(m.fill, Color::RED);
        assert_eq!(m.radius, 5.0);
        assert!((m.center.y - 200.0).abs() < 4.0 || (m.center.y - 400.0).abs() < 4.0, "{:?}", m.center);
    }
}

#[test]
fn toggling_mid_stroke_finishes_it() {
    let mut c = surface();
    c.key_down(Key::ToggleDraw);
    let trace = rectangle_trace(100.0, 200.0, 700.0, 400.0);
    c.pointer_down(trace[0]);
    for p in &trace[1..] {
        c.pointer_drag(*p);
    }
    c.key_down(Key::ToggleDraw);
    assert_eq!(c.state(), EditState::Idle);
    assert!(c.curves().all(|(_, curve)| curve.closed));
    assert_eq!(c.markers().len(), 4);
}

#[test]
fn dragging_an_anchor_moves_it_by_the_pointer_delta() {
    let mut c = surface();
    let (id, start) = {
        let (id, knot) = c.curves().next().unwrap();
        (id, knot.anchors[0].point)
    };
    assert_eq!(start, Vec2::new(550.0, 300.0));

    c.pointer_down(start);
    assert_eq!(c.state(), EditState::DraggingAnchor { curve: id, anchor: 0 });
    c.pointer_drag(start + Vec2::new(4.0, 2.0));
    c.pointer_drag(start + Vec2::new(10.0, 10.0));
    c.pointer_up(start + Vec2::new(10.0, 10.0));

    assert_eq!(c.state(), EditState::Idle);
    let moved = c.scene().anchor(id, 0).unwrap();
    assert!(moved.point.dist_sq(start + Vec2::new(10.0, 10.0)) < 1e-6);
    assert_eq!(c.scene().get(id).unwrap().anchors.len(), 21);
}

#[test]
fn pressing_on_a_stroke_inserts_an_anchor_there() {
    let mut c = surface();
    let (id, on_stroke) = {
        let (id, knot) = c.curves().next().unwrap();
        (id, knot.point_at(CurveLocation { segment: 0, t: 0.5 }).unwrap())
    };
    c.pointer_down(on_stroke);
    assert_eq!(c.state(), EditState::DraggingAnchor { curve: id, anchor: 1 });
    let knot = c.scene().get(id).unwrap();
    assert_eq!(knot.anchors.len(), 22);
    assert_eq!(knot.anchors[1].point, on_stroke);
}

#[test]
fn pressing_on_empty_canvas_stays_idle() {
    let mut c = surface();
    let ver = c.scene().version();
    c.pointer_down(Vec2::new(10.0, 10.0));
    c.pointer_drag(Vec2::new(30.0, 30.0));
    c.pointer_up(Vec2::new(30.0, 30.0));
    assert_eq!(c.state(), EditState::Idle);
    assert_eq!(c.scene().version(), ver);
}

#[test]
fn clear_key_empties_everything() {
    let mut c = surface();
    c.key_down(Key::ToggleDraw);
    draw(&mut c, &rectangle_trace(100.0, 200.0, 700.0, 400.0));
    assert!(!c.markers().is_empty());

    c.key_down(Key::from_name("c"));
    assert_eq!(c.state(), EditState::Idle);
    assert_eq!(c.curves().count(), 0);
    assert!(c.markers().is_empty());
    assert_eq!(c.recompute(), 0);
}

#[test]
fn unbound_keys_and_bad_input_are_ignored() {
    let mut c = surface();
    let ver = c.scene().version();
    c.key_down(Key::from_name("x"));
    c.key_down(Key::from_name("D"));
    c.pointer_down(Vec2::new(f32::NAN, 10.0));
    c.resize(Size { width: f32::INFINITY, height: 10.0 });
    assert_eq!(c.state(), EditState::Idle);
    assert_eq!(c.scene().version(), ver);
    assert_eq!(c.viewport(), Size { width: 800.0, height: 600.0 });
}

#[test]
fn resize_keeps_geometry_and_markers() {
    let mut c = surface();
    c.key_down(Key::ToggleDraw);
    draw(&mut c, &rectangle_trace(100.0, 200.0, 700.0, 400.0));
    let before: Vec<Vec2> = c.markers().iter().map(|m| m.center).collect();
    c.resize(Size { width: 1024.0, height: 768.0 });
    let after: Vec<Vec2> = c.markers().iter().map(|m| m.center).collect();
    assert_eq!(before, after);
    assert_eq!(c.viewport().width, 1024.0);
}

#[test]
fn options_restyle_new_markers() {
    let mut c = surface();
    let opts = Options::from_json_str(r#"{"marker_radius": 8.0}"#).unwrap();
    c.set_options(opts);
    c.key_down(Key::ToggleDraw);
    draw(&mut c, &rectangle_trace(100.0, 200.0, 700.0, 400.0));
    assert!(!c.markers().is_empty());
    assert!(c.markers().iter().all(|m| m.radius == 8.0));
}

#[test]
fn removing_a_crossing_stroke_refreshes_markers() {
    let mut c = surface();
    c.key_down(Key::ToggleDraw);
    draw(&mut c, &rectangle_trace(100.0, 200.0, 700.0, 400.0));
    assert_eq!(c.markers().len(), 4);
    let stroke = c.curves().nth(1).map(|(id, _)| id).unwrap();

    assert!(c.remove_curve(stroke));
    assert_eq!(c.curves().count(), 1);
    assert!(c.markers().is_empty());
    assert!(c.intersections().is_empty());
    assert!(!c.engine().is_stale(c.scene()));

    let ver = c.scene().version();
    assert!(!c.remove_curve(stroke));
    assert_eq!(c.scene().version(), ver);
}

#[test]
fn removing_the_dragged_curve_drops_the_drag() {
    let mut c = surface();
    let id = c.curves().next().map(|(id, _)| id).unwrap();
    c.pointer_down(Vec2::new(550.0, 300.0));
    assert_eq!(c.state(), EditState::DraggingAnchor { curve: id, anchor: 0 });
    assert!(c.remove_curve(id));
    assert_eq!(c.state(), EditState::Idle);
    c.pointer_drag(Vec2::new(560.0, 310.0));
    assert_eq!(c.curves().count(), 0);
}

#[test]
fn pressing_on_the_closing_segment_appends_after_the_last_anchor() {
    let mut c = surface();
    let (id, on_stroke, last, first) = {
        let (id, knot) = c.curves().next().unwrap();
        assert_eq!(knot.segment_count(), 21);
        let p = knot.point_at(CurveLocation { segment: 20, t: 0.5 }).unwrap();
        (id, p, knot.anchors[20].point, knot.anchors[0].point)
    };
    c.pointer_down(on_stroke);
    assert_eq!(c.state(), EditState::DraggingAnchor { curve: id, anchor: 21 });

    let knot = c.scene().get(id).unwrap();
    assert_eq!(knot.anchors.len(), 22);
    assert_eq!(knot.anchors[21].point, on_stroke);
    assert_eq!(knot.segment_count(), 22);
    // 20 -> 21 -> 0
    let s20 = knot.segment(20).unwrap();
    let s21 = knot.segment(21).unwrap();
    assert_eq!((s20[0], s20[3]), (last, on_stroke));
    assert_eq!((s21[0], s21[3]), (on_stroke, first));
}
