use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLUE, CYAN, GREEN, MUTED, NAVY, PURPLE, RED, YELLOW};
use crate::draw::context::FontSpec;
use crate::draw::primitives::{Panel, glow_dot, label};
use crate::foundation::core::Point;

const ROW_PITCH: f64 = 30.0;
const FIRST_ROW: f64 = 28.0;

/// `(id, source)` of each stored vector.
const VECTORS: [(&str, &str); 5] = [
    ("uuid5_001", "aseuro.com"),
    ("uuid5_002", "aseuro.com/about"),
    ("uuid5_003", "aseuro.com/services"),
    ("uuid5_004", "report.pdf"),
    ("uuid5_005", "team_data.csv"),
];

const METADATA: [(&str, &str, Color); 6] = [
    ("id", "uuid5(content+source)", PURPLE),
    ("vector", "384-dim float[]", BLUE),
    ("metadata.text", "\"Aseuro is an IT...\"", GREEN),
    ("metadata.namespace", "\"aseuro\"", CYAN),
    ("metadata.url", "\"https://aseuro.com\"", YELLOW),
    ("ttl", "86400 (24 hours)", RED),
];

/// Step 6: rows of the namespaced vector index filling up beside the stored metadata schema.
pub struct VectorStore;

impl Scene for VectorStore {
    fn name(&self) -> &'static str {
        "vector_store"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(4)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let w = s.width;
        let ctx = &mut *s.ctx;
        let filled = t.step(6) as usize;

        label(
            ctx,
            "UPSTASH VECTOR \u{2014} namespace: \"aseuro\"",
            12.0,
            16.0,
            FontSpec::bold(10.0),
            MUTED,
        );
        for (i, &(id, source)) in VECTORS.iter().enumerate() {
            let y = FIRST_ROW + i as f64 * ROW_PITCH;
            let on = i < filled;
            let panel = if on {
                Panel::tinted(PURPLE, 0x18, 0x55, 4.0)
            } else {
                Panel {
                    fill: NAVY.with_opacity(0.1),
                    stroke: Some((NAVY.with_opacity(0.2), 1.0)),
                    radius: 4.0,
                }
            };
            panel.draw(ctx, 12.0, y, w * 0.42, 24.0);
            if on {
                label(ctx, id, 18.0, y + 15.0, FontSpec::mono(8.0), PURPLE);
                ctx.set_fill(MUTED);
                ctx.fill_text(source, Point::new(90.0, y + 15.0));
                ctx.fill_text("384d", Point::new(w * 0.34, y + 15.0));
            }
        }

        let gx = w * 0.48;
        label(ctx, "VECTOR METADATA", gx, 16.0, FontSpec::bold(10.0), MUTED);
        for (i, &(key, value, color)) in METADATA.iter().enumerate() {
            let y = FIRST_ROW + i as f64 * ROW_PITCH;
            let on = i < filled;
            let panel = if on {
                Panel::tinted(color, 0x12, 0x44, 4.0)
            } else {
                Panel {
                    fill: NAVY.with_opacity(0.06),
                    stroke: Some((NAVY.with_opacity(0.15), 1.0)),
                    radius: 4.0,
                }
            };
            panel.draw(ctx, gx, y, w - gx - 12.0, 24.0);
            if on {
                label(ctx, key, gx + 8.0, y + 15.0, FontSpec::mono_bold(9.0), color);
                label(ctx, value, gx + w * 0.22, y + 15.0, FontSpec::mono(9.0), MUTED);
            }
        }

        let py = FIRST_ROW + filled as f64 * ROW_PITCH + 12.0;
        glow_dot(ctx, Point::new(w * 0.44, py), 4.0, GREEN, 10.0);
    }
}
