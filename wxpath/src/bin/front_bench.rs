use std::time::Instant;
use wxpath::model::{FrontType, Tool};
use wxpath::Editor;

/// A long wavy front drawn through `anchors` click points.
fn build_front(ed: &mut Editor, anchors: usize) -> Option<u32> {
    let id = ed.begin_draw(Tool::WeatherFront, 0.0, 0.0)?;
    for i in 1..anchors {
        let x = i as f32 * 40.0;
        let y = (i as f32 * 0.7).sin() * 60.0;
        ed.draw_pointer_down(x, y);
    }
    ed.finish_drawing()
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut anchors = 200usize;
    let mut iters = 500usize;
    let mut spacing = 30.0f32;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--anchors=") { if let Ok(v)=val.parse() { anchors=v; } }
        else if let Some(val)=a.strip_prefix("--iters=") { if let Ok(v)=val.parse() { iters=v; } }
        else if let Some(val)=a.strip_prefix("--spacing=") { if let Ok(v)=val.parse() { spacing=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let mut ed = Editor::new();
    let id = match build_front(&mut ed, anchors.max(2)) {
        Some(id) => id,
        None => { eprintln!("FAIL: front was not committed"); std::process::exit(1); }
    };
    ed.set_front_type(id, FrontType::Stationary);
    ed.set_front_spacing(id, spacing);

    // Each translate regenerates every glyph along the path.
    let mut times_ms: Vec<f64> = Vec::with_capacity(iters);
    let start_all = Instant::now();
    for k in 0..iters {
        let d = if k % 2 == 0 { 1.0 } else { -1.0 };
        let t0 = Instant::now();
        ed.translate_shape(id, d, 0.0);
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    let glyphs = ed.shape(id).map_or(0, |s| s.glyphs().len());
    times_ms.sort_by(|a, b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("anchors={} iters={} spacing={} glyphs={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}", anchors, iters, spacing, glyphs, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
