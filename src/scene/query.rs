use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLUE, CYAN, GREEN, INK, MUTED, NAVY, PURPLE};
use crate::draw::context::{FontSpec, TextAlign};
use crate::draw::primitives::{Panel, label, prefix};
use crate::foundation::core::Rect;

/// The question typed into the search box.
pub const QUESTION: &str = "What services does Aseuro offer?";

/// Slots per loop: one per character plus a pause with the full question shown.
const TYPING_SLOTS: u32 = 42;

const VARIANTS: [(&str, &str, Color); 3] = [
    ("\"What services does Aseuro offer?\"", "Original", BLUE),
    (
        "\"What offerings does Aseuro offer?\"",
        "Var 1: services\u{2192}offerings",
        PURPLE,
    ),
    (
        "\"What solutions does Aseuro offer?\"",
        "Var 2: services\u{2192}solutions",
        GREEN,
    ),
];

/// Step 7: the user types a question, synonym variants fan out and get embedded.
pub struct Query;

impl Scene for Query {
    fn name(&self) -> &'static str {
        "query"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(8)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let w = s.width;
        let ctx = &mut *s.ctx;
        let len = QUESTION.chars().count();
        let typed_chars = (t.step(TYPING_SLOTS) as usize).min(len);

        Panel {
            fill: NAVY.with_opacity(0.12),
            stroke: Some((BLUE.with_alpha(0x44), 1.5)),
            radius: 10.0,
        }
        .draw(ctx, 15.0, 8.0, w - 30.0, 34.0);
        let prompt = format!("> {}", prefix(QUESTION, typed_chars));
        label(ctx, &prompt, 28.0, 30.0, FontSpec::mono(13.0), INK);
        if t.blink(12) {
            let tw = ctx.measure_text(&prompt);
            ctx.set_fill(BLUE);
            ctx.fill_rect(Rect::new(30.0 + tw, 18.0, 32.0 + tw, 34.0));
        }

        if typed_chars <= 15 {
            return;
        }
        ctx.set_align(TextAlign::Center);
        label(
            ctx,
            "\u{2193} QueryExpander (synonym map)",
            w / 2.0,
            56.0,
            FontSpec::bold(9.0),
            PURPLE,
        );
        ctx.set_align(TextAlign::Left);
        for (i, &(text, note, color)) in VARIANTS.iter().enumerate() {
            if typed_chars <= 20 + i * 5 {
                continue;
            }
            let y = 66.0 + i as f64 * 32.0;
            Panel::tinted(color, 0x12, 0x33, 6.0).draw(ctx, 15.0, y, w - 30.0, 26.0);
            label(ctx, text, 22.0, y + 11.0, FontSpec::mono(9.0), color);
            label(ctx, note, 22.0, y + 22.0, FontSpec::sans(8.0), MUTED);
        }

        // vectors show during the pause after typing completes
        if t.step(TYPING_SLOTS) as usize > len {
            ctx.set_align(TextAlign::Center);
            label(
                ctx,
                "\u{2193} all-MiniLM-L6-v2 \u{2192} 3 query vectors (384d each)",
                w / 2.0,
                168.0,
                FontSpec::bold(9.0),
                CYAN,
            );
            Panel::tinted(GREEN, 0x12, 0x44, 8.0)
                .line_width(1.5)
                .draw(ctx, w * 0.1, 176.0, w * 0.8, 32.0);
            label(
                ctx,
                "q_vec1=[0.034,-0.218,...]  q_vec2=[0.051,-0.197,...]  q_vec3=[0.029,-0.242,...]",
                w / 2.0,
                196.0,
                FontSpec::mono(11.0),
                GREEN,
            );
            ctx.set_align(TextAlign::Left);
        }
    }
}
