use js_sys::{Reflect, Uint32Array, JSON};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use wxpath_wasm::Editor;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool { Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()).unwrap_or(false) }

#[wasm_bindgen_test]
fn fuzz_strict_methods_no_abort() {
    let mut ed = Editor::new();
    // Seed one arrow and one front
    ed.set_tool("arrow");
    ed.begin_draw(0.0, 0.0);
    ed.draw_pointer_move(100.0, 0.0, true);
    let a = ed.draw_pointer_up(100.0, 0.0).as_f64().unwrap() as u32;
    ed.set_tool("weatherFront");
    ed.begin_draw(0.0, 50.0);
    ed.draw_pointer_down(200.0, 50.0);
    let f = ed.finish_drawing().as_f64().unwrap() as u32;

    // Simple LCG
    let mut seed: u64 = 0x1234_5678_ABCD_EF01;
    let mut rnd = || { seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1); (seed >> 16) as u32 };

    for _ in 0..500u32 {
        let op = rnd() % 12;
        let ver_before = ed.version();
        let res = match op {
            0 => { let id = if rnd()%2==0 { a } else { 99_999 }; ed.translate_shape_res(id, f32::from_bits(rnd()), f32::from_bits(rnd())) }
            1 => ed.rotate_shape_res(f, f32::from_bits(rnd())),
            2 => ed.scale_shape_res(a, 0.0, 1.0), // degenerate scale
            3 => ed.set_front_spacing_res(f, -((rnd() % 100) as f32)),
            4 => ed.set_front_type_res(a, "warm"), // not a front
            5 => ed.set_arrow_heads_res(a, "Barbed", "NoHead"),
            6 => ed.on_handle_dragged_res(f, rnd() % 4, 10.0, 10.0, rnd() % 2 == 0), // not in edit mode
            7 => ed.set_stroke_width_res(a, -1.0),
            8 => ed.pick_res(0.0, 0.0, -1.0),
            9 => { let ids = Uint32Array::from(&[a, 0xFFFF_FFFF][..]); ed.delete_shapes_res(&ids) }
            10 => ed.set_viewport_res(0.0, 0.0, 0.0, 0.0, f32::from_bits(rnd()), 0.0),
            11 => {
                let doc = JSON::parse(r#"{"objects":[{"type":"arrow","id":0,"path":[["M",0,0],["C",1,1,2,2,3,3]]}]}"#).unwrap();
                ed.from_json_res(doc)
            }
            _ => unreachable!()
        };
        // No aborts and no state mutation on error paths
        if !is_ok(&res) { assert_eq!(ed.version(), ver_before); }
    }

    // Both shapes survive every rejected call
    assert!(!ed.get_shape(a).is_null());
    assert!(!ed.get_shape(f).is_null());
}
