use wxpath::geometry::affine::Affine;
use wxpath::model::{ArrowHeadStyle, FrontType, GlyphKind, HandleRole, Phase, ShapeState, Tool, Vec2};
use wxpath::shapes::Shape;
use wxpath::Editor;

fn near(a: Vec2, b: Vec2, tol: f32) -> bool {
    a.dist(b) <= tol
}

fn click_path(ed: &mut Editor, tool: Tool, pts: &[(f32, f32)]) -> Option<u32> {
    let id = ed.begin_draw(tool, pts[0].0, pts[0].1)?;
    for &(x, y) in &pts[1..] {
        ed.draw_pointer_down(x, y);
    }
    if ed.is_drawing() {
        ed.finish_drawing()
    } else {
        Some(id)
    }
}

/// Where each handle should sit given the shape's current path.
fn expected_handle_positions(s: &Shape) -> Vec<Vec2> {
    let segs = s.path().segments();
    s.overlay()
        .unwrap()
        .handles()
        .iter()
        .map(|h| match h.role {
            HandleRole::Start | HandleRole::End => s.to_scene(segs[h.segment_index].anchor()),
            HandleRole::MidPoint => s.to_scene(segs[h.segment_index].control().unwrap()),
        })
        .collect()
}

#[test]
fn arrow_draw_with_shift() {
    let mut ed = Editor::new();
    let id = ed.begin_draw(Tool::Arrow, 0.0, 0.0).unwrap();
    ed.draw_pointer_move(30.0, 12.0, true);
    ed.draw_pointer_move(70.0, -5.0, true);
    ed.draw_pointer_move(100.0, 0.0, true);
    assert_eq!(ed.draw_pointer_up(100.0, 0.0), Some(id));

    let s = ed.shape(id).unwrap();
    assert_eq!(s.state(), ShapeState::Committed);
    assert_eq!(s.path().len(), 2);
    let heads = s.arrowheads();
    assert_eq!(heads.len(), 1, "tail defaults to no head");
    assert_eq!(heads[0].style, ArrowHeadStyle::FilledHead);
    assert!(near(heads[0].tip, Vec2::new(100.0, 0.0), 1e-3));
    let d = heads[0].direction().unwrap();
    assert!(near(d, Vec2::new(1.0, 0.0), 1e-3));
}

#[test]
fn arrow_heads_follow_style_changes() {
    let mut ed = Editor::new();
    let id = ed.begin_draw(Tool::Arrow, 0.0, 0.0).unwrap();
    ed.draw_pointer_up(0.0, 80.0);
    assert!(ed.set_arrow_heads(id, ArrowHeadStyle::OpenHead, ArrowHeadStyle::OpenHead));
    let heads = ed.shape(id).unwrap().arrowheads().to_vec();
    assert_eq!(heads.len(), 2);
    assert!(near(heads[0].direction().unwrap(), Vec2::new(0.0, -1.0), 1e-3));
    assert!(near(heads[1].direction().unwrap(), Vec2::new(0.0, 1.0), 1e-3));
    // Wider strokes grow the head past its floor.
    assert!(ed.set_stroke_width(id, 20.0));
    let h = ed.shape(id).unwrap().arrowheads()[1];
    assert!((h.tip.dist(h.left.midpoint(h.right)) - 60.0).abs() < 1e-3);
}

#[test]
fn front_symbol_spacing() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::WeatherFront, &[(0.0, 0.0), (240.0, 0.0)]).unwrap();
    assert!(ed.set_front_type(id, FrontType::Cold));
    let glyphs = ed.shape(id).unwrap().glyphs();
    assert_eq!(glyphs.len(), 8);
    assert!((glyphs[0].center.x - 15.0).abs() < 1e-2);
    assert!(glyphs.iter().all(|g| g.kind == GlyphKind::Triangle));
}

#[test]
fn front_glyphs_follow_transform() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::WeatherFront, &[(0.0, 0.0), (240.0, 0.0)]).unwrap();
    assert!(ed.rotate_shape(id, 90.0));
    let s = ed.shape(id).unwrap();
    // Rotated about its center (120, 0): now runs from (120, -120) down.
    let g = s.glyphs();
    assert_eq!(g.len(), 8);
    assert!(near(g[0].foot, Vec2::new(120.0, -105.0), 1e-2));
    assert!((g[0].angle - 90.0).abs() < 1e-2);
}

#[test]
fn hidden_or_group_scaling_fronts_have_no_glyphs() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::WeatherFront, &[(0.0, 0.0), (240.0, 0.0)]).unwrap();
    assert!(ed.on_selection_scaling(&[id], 2.0, 1.0));
    assert!(ed.shape(id).unwrap().glyphs().is_empty());
    assert!(ed.on_selection_scaled(&[id]));
    let s = ed.shape(id).unwrap();
    assert_eq!(s.transform().scale_x, 1.0);
    assert_eq!(s.glyphs().len(), 16);
    assert!(ed.set_visible(id, false));
    assert!(ed.shape(id).unwrap().glyphs().is_empty());
}

#[test]
fn stationary_front_alternates() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::WeatherFront, &[(0.0, 0.0), (300.0, 0.0)]).unwrap();
    assert!(ed.set_front_type(id, FrontType::Stationary));
    let g = ed.shape(id).unwrap().glyphs();
    assert_eq!(g[0].kind, GlyphKind::Triangle);
    assert_eq!(g[1].kind, GlyphKind::Semicircle);
    assert!(g[0].center.y < 0.0 && g[1].center.y > 0.0);
    assert!(ed.set_front_reflect(id, true));
    let g = ed.shape(id).unwrap().glyphs();
    assert!(g[0].center.y > 0.0);
}

#[test]
fn closed_poly_removal_stays_closed() {
    let mut ed = Editor::new();
    let id = click_path(
        &mut ed,
        Tool::PolyPath,
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (4.0, 3.0)],
    )
    .unwrap();
    assert!(!ed.is_drawing(), "snapping closed finishes the gesture");
    let tol = ed.config().close_tolerance;
    let s = ed.shape(id).unwrap();
    assert_eq!(s.path().len(), 5);
    assert!(s.is_closed(tol));

    assert!(ed.remove_point(id, 0.0, 0.0).is_some());
    let s = ed.shape(id).unwrap();
    assert_eq!(s.path().len(), 4);
    assert!(s.is_closed(tol));
    let a = s.scene_anchors();
    assert!(near(a[0], Vec2::new(100.0, 0.0), 1e-3));
    assert!(near(a[1], Vec2::new(100.0, 100.0), 1e-3));
    assert!(near(a[2], Vec2::new(0.0, 100.0), 1e-3));
    assert!(near(a[3], a[0], 1e-3));
    // Three distinct corners is the minimum for a closed path.
    for (x, y) in [(100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
        assert!(ed.remove_point(id, x, y).is_none());
    }
    assert_eq!(ed.shape(id).unwrap().path().len(), 4);
}

#[test]
fn add_point_needs_a_nearby_chord() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::PolyPath, &[(0.0, 0.0), (100.0, 0.0)]).unwrap();
    let v = ed.version();
    assert_eq!(ed.add_point(id, 50.0, 900.0), None);
    assert_eq!(ed.version(), v);
    assert_eq!(ed.shape(id).unwrap().path().len(), 2);

    assert_eq!(ed.add_point(id, 50.0, 6.0), Some(1));
    let a = ed.shape(id).unwrap().scene_anchors();
    assert_eq!(a.len(), 3);
    assert!(near(a[1], Vec2::new(50.0, 6.0), 1e-3));
}

#[test]
fn handles_stay_glued_through_move_and_rotate() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::PolyPath, &[(0.0, 0.0), (80.0, 10.0), (160.0, -40.0)]).unwrap();
    assert!(ed.toggle_edit_mode(id));
    assert!(ed.translate_shape(id, 25.0, -10.0));
    assert!(ed.rotate_shape(id, 33.0));

    let s = ed.shape(id).unwrap();
    let m = s.matrix();
    for h in s.overlay().unwrap().handles() {
        let rel = h.relationship().unwrap();
        let d = m.mul(&rel).decompose();
        assert!(near(Vec2::new(d.translate_x, d.translate_y), h.center, 1e-2));
    }
    for (h, want) in s.overlay().unwrap().handles().iter().zip(expected_handle_positions(s)) {
        assert!(near(h.center, want, 1e-2), "{:?} vs {:?}", h.center, want);
    }
}

#[test]
fn live_move_then_commit() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::CurvedLine, &[(0.0, 0.0)]);
    assert!(id.is_none(), "a lone pointer-down is discarded");
    let id = ed.begin_draw(Tool::CurvedLine, 0.0, 0.0).unwrap();
    for i in 1..=20 {
        ed.draw_pointer_move(i as f32 * 5.0, (i as f32 * 0.3).sin() * 20.0, false);
    }
    ed.draw_pointer_up(100.0, 0.0).unwrap();
    assert!(ed.enter_edit_mode(id));
    let mut xf = *ed.shape(id).unwrap().transform();
    for _ in 0..5 {
        xf.center = xf.center + Vec2::new(3.0, 1.0);
        assert!(ed.set_shape_transform(id, xf, wxpath::model::TransformKind::Move, Phase::Live));
    }
    assert!(ed.set_shape_transform(id, xf, wxpath::model::TransformKind::Move, Phase::Commit));
    let s = ed.shape(id).unwrap();
    for (h, want) in s.overlay().unwrap().handles().iter().zip(expected_handle_positions(s)) {
        assert!(near(h.center, want, 1e-2));
    }
}

#[test]
fn scale_is_baked_into_the_path() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::PolyPath, &[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]).unwrap();
    assert!(ed.enter_edit_mode(id));
    assert!(ed.scale_shape(id, 2.0, 1.0));
    let s = ed.shape(id).unwrap();
    assert_eq!((s.transform().scale_x, s.transform().scale_y), (1.0, 1.0));
    let (_, _, w, h) = s.path().bounds();
    assert!((w - 200.0).abs() < 1e-3 && (h - 50.0).abs() < 1e-3);
    let a = s.scene_anchors();
    assert!(near(a[0], Vec2::new(-50.0, 0.0), 1e-3));
    assert!(near(a[2], Vec2::new(150.0, 50.0), 1e-3));
    for (h, want) in s.overlay().unwrap().handles().iter().zip(expected_handle_positions(s)) {
        assert!(near(h.center, want, 1e-2));
    }
}

#[test]
fn handle_drag_writes_back_into_the_path() {
    let mut ed = Editor::new();
    let id = click_path(&mut ed, Tool::PolyPath, &[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]).unwrap();
    assert!(ed.enter_edit_mode(id));
    assert!(ed.rotate_shape(id, 45.0));
    let before = ed.shape(id).unwrap().scene_anchors();
    let end = ed
        .visible_handles()
        .unwrap()
        .1
        .iter()
        .position(|h| h.role == HandleRole::End && h.segment_index == 2)
        .unwrap();
    assert!(ed.on_handle_dragged(id, end, 300.0, 300.0, Phase::Live));
    let s = ed.shape(id).unwrap();
    let after = s.scene_anchors();
    assert!(near(after[2], Vec2::new(300.0, 300.0), 1e-2));
    assert!(near(after[0], before[0], 1e-2));
    assert!(near(after[1], before[1], 1e-2));
    for (h, want) in s.overlay().unwrap().handles().iter().zip(expected_handle_positions(s)) {
        assert!(near(h.center, want, 1e-2));
    }
    assert!(ed.on_handle_dragged(id, end, 310.0, 300.0, Phase::Commit));
    assert!(ed.can_undo());
}

#[test]
fn pick_prefers_handles_then_topmost_shape() {
    let mut ed = Editor::new();
    let a = click_path(&mut ed, Tool::PolyPath, &[(0.0, 0.0), (100.0, 0.0)]).unwrap();
    let b = click_path(&mut ed, Tool::PolyPath, &[(50.0, -50.0), (50.0, 50.0)]).unwrap();
    match ed.pick(50.0, 1.0, 3.0) {
        Some(wxpath::Pick::Shape { id, .. }) => assert_eq!(id, b),
        other => panic!("unexpected pick {:?}", other),
    }
    assert!(ed.send_to_back(b));
    match ed.pick(50.0, 1.0, 3.0) {
        Some(wxpath::Pick::Shape { id, .. }) => assert_eq!(id, a),
        other => panic!("unexpected pick {:?}", other),
    }
    assert!(ed.enter_edit_mode(a));
    match ed.pick(99.0, 0.0, 3.0) {
        Some(wxpath::Pick::Handle { shape, .. }) => assert_eq!(shape, a),
        other => panic!("unexpected pick {:?}", other),
    }
    assert!(ed.pick(500.0, 500.0, 3.0).is_none());
}

#[test]
fn viewport_maps_pointer_before_drawing() {
    let mut ed = Editor::new();
    assert!(ed.set_viewport(Affine([2.0, 0.0, 0.0, 2.0, 0.0, 0.0])));
    let p = ed.to_scene(200.0, 100.0).unwrap();
    let id = ed.begin_draw(Tool::Arrow, 0.0, 0.0).unwrap();
    ed.draw_pointer_up(p.x, p.y);
    let a = ed.shape(id).unwrap().scene_anchors();
    assert!(near(a[1], Vec2::new(100.0, 50.0), 1e-3));
}
