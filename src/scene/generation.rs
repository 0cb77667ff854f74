use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLUE, GREEN, MUTED, NAVY, PURPLE, YELLOW};
use crate::draw::context::{DrawContext, FontSpec, TextAlign};
use crate::draw::primitives::{Panel, label, line, round_rect};
use crate::foundation::core::{Point, Rect};

/// Response decoded token by token (whitespace separated).
pub const RESPONSE: &str = "Aseuro Technologies offers a comprehensive suite of IT consulting \
services including cloud migration DevOps and digital transformation solutions for enterprise \
clients.";

const QUERY_TOKENS: [&str; 4] = ["What", "services", "Aseuro", "offer"];
const CONTEXT_TOKENS: [&str; 4] = ["consulting", "cloud", "digital", "enterprise"];

const TOKEN_BOX_W: f64 = 68.0;
const TOKEN_BOX_H: f64 = 22.0;
const TOKEN_GAP: f64 = 6.0;
const TOKEN_TOP: f64 = 48.0;
/// Decoded tokens per second.
const TOKENS_PER_SECOND: f64 = 2.2;

/// Number of response tokens shown at `t`.
pub(crate) fn decoded_tokens(t: &CycleTime) -> usize {
    let total = RESPONSE.split_whitespace().count();
    ((t.phase() * TOKENS_PER_SECOND).floor() as usize).min(total)
}

/// Step 11: attention between query and context tokens, then auto-regressive decoding.
pub struct Generation;

impl Scene for Generation {
    fn name(&self) -> &'static str {
        "generation"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(12)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;
        let attn_h = h * 0.42;

        Panel {
            fill: NAVY.with_opacity(0.06),
            stroke: Some((NAVY.with_opacity(0.22), 1.0)),
            radius: 12.0,
        }
        .draw(ctx, 10.0, 8.0, w - 20.0, attn_h);
        ctx.set_align(TextAlign::Center);
        label(
            ctx,
            "LLAMA 3.2-3B-INSTRUCT",
            w / 2.0,
            24.0,
            FontSpec::bold(10.0),
            PURPLE,
        );
        label(
            ctx,
            "HuggingFace Inference API",
            w / 2.0,
            36.0,
            FontSpec::sans(8.0),
            MUTED,
        );

        let q_col = 30.0;
        let c_col = w - 30.0 - TOKEN_BOX_W;
        token_column(ctx, "QUERY", &QUERY_TOKENS, q_col, BLUE);
        token_column(ctx, "CONTEXT", &CONTEXT_TOKENS, c_col, GREEN);

        let row_mid =
            |i: usize| TOKEN_TOP + i as f64 * (TOKEN_BOX_H + TOKEN_GAP) + TOKEN_BOX_H / 2.0;
        let x0 = q_col + TOKEN_BOX_W + 4.0;
        let x1 = c_col - 4.0;
        for i in 0..QUERY_TOKENS.len() {
            for j in 0..CONTEXT_TOKENS.len() {
                let edge = line(Point::new(x0, row_mid(i)), Point::new(x1, row_mid(j)));
                ctx.save();
                if i == j {
                    ctx.set_stroke(PURPLE.with_opacity(0.45 + 0.2 * t.wave(5, 0.0)));
                    ctx.set_line_width(3.0);
                    ctx.set_glow(PURPLE, 6.0);
                } else {
                    ctx.set_stroke(PURPLE.with_opacity(0.04 + 0.03 * t.wave(4, (i + j) as f64)));
                    ctx.set_line_width(1.0);
                }
                ctx.stroke_path(&edge);
                ctx.restore();
            }
        }
        let below_tokens = TOKEN_TOP + QUERY_TOKENS.len() as f64 * (TOKEN_BOX_H + TOKEN_GAP) + 6.0;
        label(
            ctx,
            "MULTI-HEAD ATTENTION",
            w / 2.0,
            below_tokens,
            FontSpec::bold(8.0),
            PURPLE.with_alpha(0xaa),
        );

        let cfg_y = attn_h - 4.0;
        Panel::tinted(YELLOW, 0x12, 0x33, 4.0).draw(ctx, w * 0.2, cfg_y, w * 0.6, 16.0);
        label(
            ctx,
            "temperature=0.1    max_new_tokens=1000    timeout=300s",
            w / 2.0,
            cfg_y + 11.0,
            FontSpec::mono_bold(8.0),
            YELLOW,
        );

        let dec_y = attn_h + 18.0;
        Panel::tinted(GREEN, 0x05, 0x22, 10.0).draw(ctx, 10.0, dec_y, w - 20.0, h - dec_y - 8.0);
        label(
            ctx,
            "AUTO-REGRESSIVE TOKEN DECODING",
            w / 2.0,
            dec_y + 16.0,
            FontSpec::bold(10.0),
            GREEN,
        );

        let words: Vec<&str> = RESPONSE.split_whitespace().collect();
        let shown = decoded_tokens(t);
        let margin = 24.0;
        let max_line = w - margin * 2.0;
        let (mut tx, mut ty) = (margin, dec_y + 30.0);

        ctx.set_align(TextAlign::Left);
        ctx.set_font(FontSpec::mono(10.0));
        for (i, word) in words.iter().take(shown).enumerate() {
            let tw = ctx.measure_text(word) + 12.0;
            if tx + tw > margin + max_line {
                tx = margin;
                ty += 24.0;
            }
            let last = i + 1 == shown;
            let chip = round_rect(tx, ty, tw, 19.0, 4.0);
            if last {
                ctx.set_glow(GREEN, 8.0);
            }
            ctx.set_fill(GREEN.with_alpha(0x12));
            ctx.set_stroke(GREEN.with_alpha(if last { 0x88 } else { 0x33 }));
            ctx.set_line_width(if last { 1.5 } else { 1.0 });
            ctx.fill_path(&chip);
            ctx.stroke_path(&chip);
            ctx.clear_glow();
            ctx.set_fill(GREEN);
            ctx.fill_text(word, Point::new(tx + 6.0, ty + 14.0));
            tx += tw + 4.0;
        }

        if shown < words.len() && t.blink(18) {
            ctx.set_fill(GREEN);
            ctx.fill_rect(Rect::new(tx + 2.0, ty + 3.0, tx + 4.0, ty + 18.0));
        }
        if shown > 0 {
            ctx.set_align(TextAlign::Right);
            let counter = format!("{shown}/{} tokens", words.len());
            label(ctx, &counter, w - 18.0, h - 10.0, FontSpec::mono_bold(8.0), MUTED);
        }
        ctx.set_align(TextAlign::Left);
    }
}

/// Captioned column of token boxes.
fn token_column(ctx: &mut dyn DrawContext, caption: &str, tokens: &[&str], x: f64, color: Color) {
    let cx = x + TOKEN_BOX_W / 2.0;
    ctx.set_align(TextAlign::Center);
    label(ctx, caption, cx, TOKEN_TOP - 4.0, FontSpec::bold(8.0), color);
    for (i, tok) in tokens.iter().enumerate() {
        let y = TOKEN_TOP + i as f64 * (TOKEN_BOX_H + TOKEN_GAP);
        Panel::tinted(color, 0x15, 0x44, 5.0).draw(ctx, x, y, TOKEN_BOX_W, TOKEN_BOX_H);
        label(ctx, tok, cx, y + TOKEN_BOX_H / 2.0 + 4.0, FontSpec::mono(10.0), color);
    }
}
