use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::palette::{CYAN, GREEN, MUTED, RED};
use crate::draw::context::FontSpec;
use crate::draw::primitives::{Panel, label, line};
use crate::foundation::core::Point;

/// Raw markup lines; `true` marks noise the cleaner strips.
const RAW: [(&str, f64, bool); 7] = [
    ("<script>analytics.track(..)</script>", 46.0, true),
    ("<style>.nav{display:flex}</style>", 64.0, true),
    ("<noscript>Enable JS</noscript>", 82.0, true),
    ("<h1>Aseuro Technologies</h1>", 100.0, false),
    ("<p>IT consulting & cloud...</p>", 118.0, false),
    ("<img alt=\"team photo\" src=..>", 136.0, false),
    ("<iframe src=\"ads.js\"></iframe>", 154.0, true),
];

const CLEAN: [(&str, f64); 8] = [
    ("# Aseuro Technologies", 48.0),
    ("**Desc:** IT consulting firm", 66.0),
    ("**Keywords:** cloud, DevOps", 84.0),
    ("IT consulting & cloud...", 104.0),
    ("- Digital transformation", 122.0),
    ("- Cloud migration services", 138.0),
    ("[Image: team photo]", 156.0),
    ("source: \"aseuro.com\"", 174.0),
];

/// Step 3: noisy HTML on the left, structured text on the right, a cleaning beam between.
pub struct Preprocess;

impl Scene for Preprocess {
    fn name(&self) -> &'static str {
        "preprocess"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(6)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;
        let mid = w / 2.0;

        Panel::tinted(RED, 0x08, 0x44, 12.0)
            .line_width(1.5)
            .draw(ctx, 10.0, 10.0, mid - 22.0, h - 20.0);
        label(
            ctx,
            "\u{274C} RAW HTML (aseuro.com)",
            20.0,
            28.0,
            FontSpec::bold(10.0),
            RED,
        );
        for &(text, y, noise) in &RAW {
            let color = if noise {
                RED.with_alpha(0x66)
            } else {
                GREEN.with_alpha(0x88)
            };
            label(ctx, text, 20.0, y, FontSpec::mono(9.0), color);
            if noise {
                let tw = ctx.measure_text(text);
                ctx.set_stroke(RED.with_alpha(0x55));
                ctx.set_line_width(1.0);
                ctx.stroke_path(&line(
                    Point::new(20.0, y - 3.0),
                    Point::new(20.0 + tw, y - 3.0),
                ));
            }
        }

        let bx = mid + 8.0 * t.wave(2, 0.0);
        ctx.save();
        ctx.set_stroke(GREEN);
        ctx.set_line_width(3.0);
        ctx.set_glow(GREEN, 18.0);
        ctx.set_dash(Some([6.0, 4.0]));
        ctx.stroke_path(&line(Point::new(bx, 6.0), Point::new(bx, h - 6.0)));
        ctx.restore();

        Panel::tinted(GREEN, 0x08, 0x44, 12.0)
            .line_width(1.5)
            .draw(ctx, mid + 10.0, 10.0, mid - 22.0, h - 20.0);
        label(
            ctx,
            "\u{2705} STRUCTURED OUTPUT",
            mid + 20.0,
            28.0,
            FontSpec::bold(10.0),
            GREEN,
        );
        // two trailing slots hold the fully revealed list before the loop restarts
        let revealed = (t.step(CLEAN.len() as u32 + 2) as usize).min(CLEAN.len());
        for (i, &(text, y)) in CLEAN.iter().enumerate() {
            let font = if text.starts_with(' ') || text.starts_with('[') {
                FontSpec::mono(9.0)
            } else {
                FontSpec::sans(10.0)
            };
            let color = match (i < revealed, text.starts_with("source")) {
                (true, true) => CYAN,
                (true, false) => GREEN.with_alpha(0xdd),
                (false, _) => MUTED.with_alpha(0x33),
            };
            label(ctx, text, mid + 20.0, y, font, color);
        }
    }
}
