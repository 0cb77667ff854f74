use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLUE, CYAN, GREEN, MUTED, PINK, PURPLE};
use crate::draw::context::{FontSpec, TextAlign};
use crate::draw::primitives::{Panel, label, prefix, with_alpha};

const BLOCKS: [(&str, &str, Color, f64); 5] = [
    (
        "SYSTEM",
        "\"You are Velora AI, a professional AI analyst...\"",
        PURPLE,
        8.0,
    ),
    (
        "CHAT HISTORY",
        "MessagesPlaceholder(last 10 msgs)",
        PINK,
        46.0,
    ),
    (
        "CONTEXT [1]",
        "\"Aseuro Technologies offers IT consulting, cloud...\"",
        BLUE,
        84.0,
    ),
    (
        "CONTEXT [2]",
        "\"Digital transformation solutions for enterprise...\"",
        CYAN,
        118.0,
    ),
    (
        "QUESTION",
        "\"What services does Aseuro offer?\"",
        GREEN,
        156.0,
    ),
];

/// Seconds the assembly takes; the rest of the loop holds the finished prompt.
const ASSEMBLY_SECONDS: f64 = 3.5;

/// Step 10: system prompt, history, retrieved context and question slide into one prompt.
pub struct Prompt;

impl Scene for Prompt {
    fn name(&self) -> &'static str {
        "prompt"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(5)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;
        let prog = t.progress(0.0, ASSEMBLY_SECONDS);
        let bw = w * 0.84;
        let bh = 30.0;
        let max_chars = ((bw / 6.0).floor() - 12.0).max(0.0) as usize;

        for (i, &(title, body, color, y)) in BLOCKS.iter().enumerate() {
            let p = ((prog - i as f64 * 0.14) * 2.5).clamp(0.0, 1.0);
            if p <= 0.0 {
                continue;
            }
            let start_x = -bw - 30.0;
            let target_x = (w - bw) / 2.0;
            let x = start_x + (target_x - start_x) * p;
            with_alpha(ctx, p, |ctx| {
                Panel::tinted(color, 0x12, 0x44, 8.0)
                    .line_width(1.5)
                    .draw(ctx, x, y, bw, bh);
                label(ctx, title, x + 10.0, y + 12.0, FontSpec::bold(9.0), color);
                let body = prefix(body, max_chars);
                label(ctx, body, x + 10.0, y + 24.0, FontSpec::mono(9.0), MUTED);
            });
        }

        if prog > 0.85 {
            Panel::tinted(GREEN, 0x22, 0x66, 10.0)
                .line_width(2.0)
                .draw(ctx, w * 0.78, h / 2.0 - 14.0, w * 0.2, 28.0);
            ctx.set_align(TextAlign::Center);
            label(
                ctx,
                "\u{2713} READY",
                w * 0.88,
                h / 2.0 + 4.0,
                FontSpec::bold(11.0),
                GREEN,
            );
            ctx.set_align(TextAlign::Left);
        }
    }
}
