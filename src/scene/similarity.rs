use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLACK, BLUE, CYAN, GREEN, MUTED, NAVY, PURPLE, WHITE};
use crate::draw::context::{FontSpec, TextAlign};
use crate::draw::primitives::{Panel, circle, glow_dot, label, line};
use crate::foundation::core::Point;

/// A stored vector placed in the 2D projection.
struct Stored {
    /// x as a fraction of the width.
    fx: f64,
    y: f64,
    score: f64,
    name: &'static str,
    top: bool,
    color: Color,
}

const STORED: [Stored; 8] = [
    Stored { fx: 0.38, y: 55.0, score: 0.94, name: "services page", top: true, color: GREEN },
    Stored { fx: 0.56, y: 90.0, score: 0.91, name: "about page", top: true, color: BLUE },
    Stored { fx: 0.42, y: 155.0, score: 0.87, name: "consulting chunk", top: true, color: CYAN },
    Stored { fx: 0.62, y: 200.0, score: 0.72, name: "team data", top: false, color: PURPLE },
    Stored { fx: 0.78, y: 55.0, score: 0.48, name: "contact page", top: false, color: MUTED },
    Stored { fx: 0.82, y: 140.0, score: 0.35, name: "csv row 5", top: false, color: MUTED },
    Stored { fx: 0.72, y: 260.0, score: 0.29, name: "pdf appendix", top: false, color: MUTED },
    Stored { fx: 0.88, y: 210.0, score: 0.15, name: "unrelated chunk", top: false, color: MUTED },
];

/// Seconds before the first beam leaves the query.
const BEAM_DELAY: f64 = 0.5;
/// Delay between consecutive beams.
const BEAM_STAGGER: f64 = 0.6;

/// Step 8: the query vector beams out to its nearest neighbours in the vector space.
pub struct Similarity;

impl Scene for Similarity {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(10)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;
        let phase = t.phase();

        Panel::solid(NAVY.with_opacity(0.04), 14.0).draw(ctx, 4.0, 4.0, w - 8.0, h - 8.0);
        ctx.set_align(TextAlign::Center);
        label(
            ctx,
            "UPSTASH VECTOR SPACE \u{2014} namespace=\"aseuro\" (384-dim)",
            w / 2.0,
            18.0,
            FontSpec::bold(10.0),
            MUTED,
        );

        let q = Point::new(55.0, h * 0.38);
        ctx.set_stroke(BLUE.with_alpha(0x33));
        ctx.set_line_width(1.5);
        ctx.stroke_path(&circle(q, 18.0 + 4.0 * t.wave(5, 0.0)));
        glow_dot(ctx, q, 11.0, BLUE, 14.0);
        label(ctx, "Q", q.x, q.y + 4.0, FontSpec::bold(11.0), WHITE);
        for (dx, dy, color) in [(-14.0, -22.0, PURPLE), (16.0, -18.0, CYAN), (8.0, 24.0, GREEN)] {
            ctx.set_fill(color);
            ctx.fill_path(&circle(Point::new(q.x + dx, q.y + dy), 4.0));
        }

        ctx.set_align(TextAlign::Left);
        label(ctx, "\"What services", 14.0, q.y + 46.0, FontSpec::bold(9.0), BLUE);
        ctx.fill_text("does Aseuro offer?\"", Point::new(14.0, q.y + 58.0));
        label(ctx, "3 query variations", 14.0, q.y + 72.0, FontSpec::sans(8.0), MUTED);

        for (i, v) in STORED.iter().enumerate().filter(|(_, v)| v.top) {
            let k = i as f64;
            let beam = t.progress(BEAM_DELAY + k * BEAM_STAGGER, 1.2);
            if beam <= 0.0 {
                continue;
            }
            let target = Point::new(w * v.fx, v.y);
            let end = q.lerp(target, beam);
            ctx.save();
            ctx.set_stroke(v.color.with_alpha(0x55));
            ctx.set_line_width(2.0);
            ctx.set_glow(v.color, 8.0);
            ctx.set_dash(Some([5.0, 4.0]));
            ctx.stroke_path(&line(Point::new(q.x + 11.0, q.y), end));
            ctx.restore();

            let along = q.lerp(target, t.loop_fraction(20, k));
            glow_dot(ctx, along, 3.0, v.color, 6.0);
        }

        for (i, v) in STORED.iter().enumerate() {
            let k = i as f64;
            if v.top && phase <= BEAM_DELAY + k * BEAM_STAGGER {
                continue;
            }
            let p = Point::new(w * v.fx, v.y);
            let r = match (v.top, v.score > 0.5) {
                (true, _) => 8.0,
                (false, true) => 5.0,
                (false, false) => 3.5,
            };
            if v.top {
                glow_dot(ctx, p, r, v.color, 10.0);
            } else {
                let fill = if v.score > 0.5 {
                    PURPLE.with_alpha(0x66)
                } else {
                    MUTED.with_alpha(0x44)
                };
                ctx.set_fill(fill);
                ctx.fill_path(&circle(p, r));
            }

            ctx.set_align(TextAlign::Left);
            let (font, color) = if v.top {
                (FontSpec::bold(9.0), v.color)
            } else {
                (FontSpec::sans(8.0), MUTED)
            };
            label(ctx, v.name, p.x + r + 6.0, p.y + 4.0, font, color);

            if v.top && phase > 1.5 + k * BEAM_STAGGER {
                let (bw, bh) = (38.0, 16.0);
                Panel::tinted(v.color, 0x22, 0x55, 4.0).draw(
                    ctx,
                    p.x - bw / 2.0,
                    p.y - r - bh - 4.0,
                    bw,
                    bh,
                );
                ctx.set_align(TextAlign::Center);
                let score = format!("{:.2}", v.score);
                let y = p.y - r - bh / 2.0 + 1.0;
                label(ctx, &score, p.x, y, FontSpec::mono_bold(9.0), v.color);
            }
        }

        let bottom = h - 42.0;
        Panel::solid(BLACK.with_opacity(0.45), 8.0).draw(ctx, 12.0, bottom, w - 24.0, 34.0);
        ctx.set_align(TextAlign::Center);
        label(
            ctx,
            "index.query(vector, top_k=20, filter=\"namespace='aseuro'\")",
            w / 2.0,
            bottom + 14.0,
            FontSpec::mono_bold(9.0),
            GREEN,
        );
        label(
            ctx,
            "Deduplicates across 3 variation queries \u{2014} returns unique text chunks only",
            w / 2.0,
            bottom + 28.0,
            FontSpec::sans(8.0),
            MUTED,
        );
        ctx.set_align(TextAlign::Left);
    }
}
