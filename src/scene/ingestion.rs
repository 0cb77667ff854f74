use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLUE, CYAN, DEEP, GREEN, MUTED, NAVY, PURPLE};
use crate::draw::context::FontSpec;
use crate::draw::primitives::{arrow, glow_dot, label, round_rect, with_glow};
use crate::foundation::core::Point;

struct Stage {
    title: &'static str,
    detail: [&'static str; 2],
    color: Color,
    done: &'static str,
}

const STAGES: [Stage; 4] = [
    Stage {
        title: "Playwright",
        detail: ["headless Chromium", "page.goto(url)"],
        color: BLUE,
        done: "HTML fetched",
    },
    Stage {
        title: "HTML Content",
        detail: ["page.content()", "full DOM rendered"],
        color: PURPLE,
        done: "Raw HTML",
    },
    Stage {
        title: "BS4 Parser",
        detail: ["_extract_structured", "_content(html, url)"],
        color: GREEN,
        done: "Clean text",
    },
    Stage {
        title: "Document",
        detail: ["Document(text,", "{source: url})"],
        color: CYAN,
        done: "LangChain Doc",
    },
];

/// Step 2: fetch → HTML → parse → document, lit one stage per second.
pub struct Ingestion;

impl Scene for Ingestion {
    fn name(&self) -> &'static str {
        "ingestion"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(4)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;

        let sw = 155f64.min((w - 50.0) / 4.0 - 10.0);
        let sh = 100.0;
        let cy = h / 2.0 + 5.0;
        let active = t.step(STAGES.len() as u32) as usize;

        for (i, stage) in STAGES.iter().enumerate() {
            let x = 10.0 + i as f64 * (sw + 14.0);
            let y = cy - sh / 2.0;
            let on = i <= active;
            let card = round_rect(x, y, sw, sh, 10.0);

            if on {
                ctx.set_fill(stage.color.with_alpha(0x18));
                ctx.set_stroke(stage.color.with_alpha(0x66));
                ctx.set_line_width(2.0);
            } else {
                ctx.set_fill(DEEP.with_opacity(0.2));
                ctx.set_stroke(NAVY.with_opacity(0.25));
                ctx.set_line_width(1.0);
            }
            ctx.fill_path(&card);
            ctx.stroke_path(&card);
            if i == active {
                with_glow(ctx, stage.color, 10.0, |ctx| ctx.stroke_path(&card));
            }

            let title_color = if on {
                stage.color
            } else {
                MUTED.with_alpha(0x88)
            };
            label(ctx, stage.title, x + 10.0, y + 18.0, FontSpec::bold(11.0), title_color);
            for (j, line) in stage.detail.iter().enumerate() {
                let ly = y + 34.0 + j as f64 * 13.0;
                label(ctx, line, x + 10.0, ly, FontSpec::mono(9.0), MUTED);
            }
            if on {
                let done = format!("\u{2713} {}", stage.done);
                let color = GREEN.with_alpha(0xbb);
                label(ctx, &done, x + 10.0, y + sh - 10.0, FontSpec::bold(9.0), color);
            }
            if i + 1 < STAGES.len() {
                let ax = x + sw + 2.0;
                let color = if on {
                    stage.color.with_alpha(0x88)
                } else {
                    MUTED.with_alpha(0x33)
                };
                arrow(ctx, Point::new(ax, cy), Point::new(ax + 10.0, cy), color);
            }
        }

        let px = 10.0 + t.loop_fraction(1, 0.0) * (w - 20.0);
        glow_dot(ctx, Point::new(px, cy), 4.0, BLUE, 12.0);
    }
}
