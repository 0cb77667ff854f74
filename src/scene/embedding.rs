use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::palette::{BLUE, GREEN, MUTED, NAVY, PURPLE};
use crate::draw::context::{FontSpec, TextAlign};
use crate::draw::primitives::{Panel, circle, label, line, with_glow};
use crate::foundation::core::Point;

/// Neurons per layer, input to output.
const LAYERS: [usize; 6] = [3, 5, 6, 5, 3, 1];
const LAYER_LABELS: [&str; 6] = ["Tokens", "L1", "L2", "L3", "Pool", "Out"];
const VECTOR_LINES: [&str; 4] = ["[0.042,", "-0.318,", "0.156,", "...]"];

/// Step 5: a sentence flows through a small network into a 384-dim vector.
pub struct Embedding;

impl Scene for Embedding {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(4)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;

        Panel::tinted(BLUE, 0x12, 0x44, 8.0).draw(ctx, 10.0, 10.0, w * 0.22, 35.0);
        label(ctx, "\"Aseuro is an IT", 18.0, 25.0, FontSpec::mono(9.0), BLUE);
        label(ctx, "consulting firm\"", 18.0, 38.0, FontSpec::mono(9.0), BLUE);

        let net_x = w * 0.26;
        let net_w = w * 0.48;
        let gap = net_w / (LAYERS.len() + 1) as f64;
        let column_x = |l: usize| net_x + gap * (l + 1) as f64;
        let nodes: Vec<Vec<Point>> = LAYERS
            .iter()
            .enumerate()
            .map(|(l, &n)| {
                let yg = (h - 50.0) / (n + 1) as f64;
                (0..n)
                    .map(|i| Point::new(column_x(l), yg * (i + 1) as f64 + 20.0))
                    .collect()
            })
            .collect();
        let active = t.step(LAYERS.len() as u32) as usize;

        for l in 0..LAYERS.len() - 1 {
            let on = l <= active;
            if on {
                ctx.set_stroke(BLUE.with_alpha(0x22));
                ctx.set_line_width(1.0);
            } else {
                ctx.set_stroke(NAVY.with_opacity(0.08));
                ctx.set_line_width(0.4);
            }
            for &a in &nodes[l] {
                for &b in &nodes[l + 1] {
                    ctx.stroke_path(&line(a, b));
                }
            }
        }

        let sweep_x = column_x(active);
        ctx.set_stroke(BLUE.with_alpha(0x33));
        ctx.set_line_width(2.0);
        with_glow(ctx, BLUE, 12.0, |ctx| {
            ctx.stroke_path(&line(Point::new(sweep_x, 15.0), Point::new(sweep_x, h - 20.0)));
        });

        ctx.set_align(TextAlign::Center);
        for (l, layer) in nodes.iter().enumerate() {
            let on = l <= active;
            let color = if l == LAYERS.len() - 1 { GREEN } else { BLUE };
            for &p in layer {
                if on {
                    ctx.set_fill(color);
                    with_glow(ctx, color, 8.0, |ctx| ctx.fill_path(&circle(p, 6.0)));
                } else {
                    ctx.set_fill(NAVY.with_opacity(0.4));
                    ctx.fill_path(&circle(p, 3.5));
                }
            }
            let color = if on { BLUE } else { MUTED.with_alpha(0x66) };
            label(ctx, LAYER_LABELS[l], column_x(l), h - 6.0, FontSpec::bold(8.0), color);
        }

        Panel::tinted(PURPLE, 0x22, 0x44, 4.0).draw(ctx, net_x, h - 25.0, net_w, 16.0);
        label(
            ctx,
            "all-MiniLM-L6-v2",
            net_x + net_w / 2.0,
            h - 15.0,
            FontSpec::bold(7.0),
            PURPLE,
        );

        Panel::tinted(GREEN, 0x12, 0x55, 8.0)
            .line_width(1.5)
            .draw(ctx, w * 0.78, h / 2.0 - 35.0, w * 0.2, 70.0);
        let vx = w * 0.88;
        label(ctx, "384-dim", vx, h / 2.0 - 18.0, FontSpec::bold(11.0), GREEN);
        let vy = [h / 2.0 - 2.0, h / 2.0 + 12.0, h / 2.0 + 24.0, h / 2.0 + 36.0];
        for (text, y) in VECTOR_LINES.iter().zip(vy) {
            label(ctx, text, vx, y, FontSpec::mono(8.0), GREEN.with_alpha(0xbb));
        }
        ctx.set_align(TextAlign::Left);
    }
}
