use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{CYAN, GREEN, INK, MUTED, PURPLE};
use crate::draw::context::{FontSpec, TextAlign};
use crate::draw::primitives::{Panel, label, line, with_alpha};
use crate::foundation::core::Point;

const SUMMARY: [&str; 4] = [
    "Aseuro Technologies offers",
    "IT consulting, cloud migration,",
    "DevOps, and digital",
    "transformation solutions.",
];

const FIELDS: [(&str, &str, Color); 3] = [
    ("summary:", "\"Aseuro offers IT...\"", GREEN),
    ("extracted_data:", "{}", PURPLE),
    ("source_type:", "\"local\"", CYAN),
];

/// Step 12: the answer card grows open next to the response structure it is packed into.
pub struct Answer;

impl Scene for Answer {
    fn name(&self) -> &'static str {
        "answer"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(6)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;
        let prog = t.progress(0.0, 4.0);
        let aw = w * 0.55 * prog;

        Panel::tinted(GREEN, 0x08, 0x44, 12.0)
            .line_width(1.5)
            .draw(ctx, 12.0, 12.0, aw, h - 30.0);
        if prog > 0.15 {
            label(
                ctx,
                "\u{2713} response.summary",
                24.0,
                34.0,
                FontSpec::bold(12.0),
                GREEN,
            );
            for (i, text) in SUMMARY.iter().enumerate() {
                if prog > 0.2 + i as f64 * 0.12 {
                    let y = 55.0 + i as f64 * 18.0;
                    label(ctx, text, 24.0, y, FontSpec::sans(10.0), INK.with_alpha(0xbb));
                }
            }
            if prog > 0.7 {
                Panel::tinted(GREEN, 0x22, 0x55, 6.0).draw(ctx, 24.0, 135.0, 150.0, 22.0);
                label(
                    ctx,
                    "\u{2713} Plain text, no JSON",
                    32.0,
                    150.0,
                    FontSpec::bold(9.0),
                    GREEN,
                );
            }
        }

        if prog > 0.35 {
            ctx.set_align(TextAlign::Center);
            label(
                ctx,
                "RESPONSE STRUCTURE",
                w * 0.78,
                28.0,
                FontSpec::bold(9.0),
                MUTED,
            );
            ctx.set_align(TextAlign::Left);
        }

        let fx = w * 0.58;
        for (i, &(key, value, color)) in FIELDS.iter().enumerate() {
            let k = i as f64;
            let delay = 0.35 + k * 0.15;
            if prog <= delay {
                continue;
            }
            let fy = 40.0 + k * 50.0;
            with_alpha(ctx, ((prog - delay) * 3.0).min(1.0), |ctx| {
                Panel::tinted(color, 0x10, 0x44, 8.0)
                    .line_width(1.5)
                    .draw(ctx, fx, fy, w - fx - 12.0, 36.0);
                label(ctx, key, fx + 8.0, fy + 15.0, FontSpec::mono_bold(10.0), color);
                label(ctx, value, fx + 8.0, fy + 29.0, FontSpec::mono(10.0), MUTED);

                ctx.save();
                ctx.set_stroke(color.with_alpha(0x33));
                ctx.set_line_width(1.0);
                ctx.set_dash(Some([3.0, 3.0]));
                ctx.stroke_path(&line(
                    Point::new(fx, fy + 18.0),
                    Point::new(12.0 + aw, 55.0 + k * 18.0),
                ));
                ctx.restore();
            });
        }
    }
}
