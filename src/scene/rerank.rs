use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLUE, GREEN, INK, MUTED, PURPLE, SLATE};
use crate::draw::context::{FontSpec, TextAlign};
use crate::draw::primitives::{circle, label, prefix, round_rect};
use crate::foundation::core::Point;

/// A retrieved passage with its bi-encoder and cross-encoder scores.
struct Passage {
    text: &'static str,
    bi: f64,
    cross: f64,
    color: Color,
}

const RANKED: usize = 5;

const PASSAGES: [Passage; RANKED] = [
    Passage {
        text: "Services: \"IT consulting, cloud migration...\"",
        bi: 0.94,
        cross: 0.97,
        color: GREEN,
    },
    Passage {
        text: "Consulting: \"digital transformation...\"",
        bi: 0.87,
        cross: 0.93,
        color: BLUE,
    },
    Passage {
        text: "About: \"Aseuro Technologies offers...\"",
        bi: 0.91,
        cross: 0.89,
        color: PURPLE,
    },
    Passage {
        text: "Team: \"experienced professionals...\"",
        bi: 0.72,
        cross: 0.58,
        color: MUTED,
    },
    Passage {
        text: "Contact: \"Mumbai, India office...\"",
        bi: 0.48,
        cross: 0.32,
        color: SLATE,
    },
];

const BAR_H: f64 = 26.0;
const BAR_GAP: f64 = 6.0;
const FIRST_BAR: f64 = 28.0;
const LABEL_CHARS: usize = 38;

/// Indices of `PASSAGES` ordered by descending `score`.
fn ranking(score: impl Fn(&Passage) -> f64) -> [usize; RANKED] {
    let mut order = [0, 1, 2, 3, 4];
    order.sort_by(|&a, &b| score(&PASSAGES[b]).total_cmp(&score(&PASSAGES[a])));
    order
}

/// Position of `index` within `order`.
fn rank_of(order: &[usize], index: usize) -> usize {
    order.iter().position(|&i| i == index).unwrap_or(index)
}

/// Blend between bi-encoder order (0) and cross-encoder order (1) at `t`.
pub(crate) fn reorder_progress(t: &CycleTime) -> f64 {
    (t.wave(2, 0.0) + 1.0) / 2.0
}

/// Step 9: passages slide from their bi-encoder order into the cross-encoder order and back.
pub struct Rerank;

impl Scene for Rerank {
    fn name(&self) -> &'static str {
        "rerank"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(12)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let w = s.width;
        let ctx = &mut *s.ctx;

        ctx.set_align(TextAlign::Left);
        label(ctx, "Bi-Encoder (MiniLM)", 10.0, 16.0, FontSpec::bold(9.0), MUTED);
        ctx.set_align(TextAlign::Center);
        ctx.fill_text(
            "\u{2192} CrossEncoder(ms-marco) \u{2192}",
            Point::new(w / 2.0, 16.0),
        );
        ctx.set_align(TextAlign::Right);
        ctx.fill_text("Re-Ranked", Point::new(w - 10.0, 16.0));
        ctx.set_align(TextAlign::Left);

        let prog = reorder_progress(t);
        let before = ranking(|p| p.bi);
        let after = ranking(|p| p.cross);
        let max_w = w - 100.0;

        for (rank, &index) in after.iter().enumerate() {
            let p = &PASSAGES[index];
            let from = rank_of(&before, index) as f64;
            let slot = from * (1.0 - prog) + rank as f64 * prog;
            let y = FIRST_BAR + slot * (BAR_H + BAR_GAP);
            let fill_w = p.cross * max_w;

            ctx.set_fill(p.color.with_alpha(0x12));
            ctx.fill_path(&round_rect(80.0, y, max_w, BAR_H, 6.0));
            ctx.set_fill(p.color.with_alpha(0x44));
            ctx.fill_path(&round_rect(80.0, y, fill_w * prog, BAR_H, 6.0));
            ctx.set_stroke(p.color.with_alpha(0x55));
            ctx.set_line_width(1.0);
            ctx.stroke_path(&round_rect(80.0, y, fill_w, BAR_H, 6.0));

            let text = format!("{}...", prefix(p.text, LABEL_CHARS));
            label(ctx, &text, 86.0, y + 16.0, FontSpec::sans(9.0), INK.with_alpha(0xcc));

            let badge = Point::new(68.0, y + BAR_H / 2.0);
            ctx.set_fill(p.color.with_alpha(0x33));
            ctx.fill_path(&circle(badge, 11.0));
            ctx.set_align(TextAlign::Center);
            let number = format!("#{}", rank + 1);
            label(ctx, &number, badge.x, badge.y + 3.0, FontSpec::bold(9.0), p.color);
            ctx.set_align(TextAlign::Left);
        }
    }
}
