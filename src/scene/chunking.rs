use std::f64::consts::FRAC_PI_2;

use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLACK, BLUE, GREEN, INK, MUTED, PURPLE, RED, YELLOW};
use crate::draw::context::{DrawContext, FontSpec, TextAlign};
use crate::draw::primitives::{Panel, glow_dot, label, line, prefix, round_rect};
use crate::foundation::core::{Affine, Point, Rect};

const CHUNKS: usize = 4;
/// Seconds the splitter blade takes to cross the document.
const BLADE_SECONDS: f64 = 2.0;
/// Delay between consecutive chunk reveals.
const STAGGER: f64 = 0.5;
/// Duration of one chunk's slide-in.
const REVEAL_SECONDS: f64 = 0.6;

const SEPARATORS: [&str; 3] = ["\\n\\n", "\"\\n\"", "\" \""];

struct Chunk {
    title: &'static str,
    lines: [&'static str; 3],
    color: Color,
    chars: u32,
}

const CHUNK_CARDS: [Chunk; CHUNKS] = [
    Chunk {
        title: "Chunk 1",
        lines: ["\"Aseuro Technologies", "is an IT consulting", "firm offering...\""],
        color: BLUE,
        chars: 382,
    },
    Chunk {
        title: "Chunk 2",
        lines: ["\"Cloud migration", "services, DevOps,", "and infrastructure\""],
        color: PURPLE,
        chars: 396,
    },
    Chunk {
        title: "Chunk 3",
        lines: ["\"Digital transform-", "ation solutions for", "enterprise clients\""],
        color: GREEN,
        chars: 374,
    },
    Chunk {
        title: "Chunk 4",
        lines: ["\"Contact us at", "info@aseuro.com", "Mumbai, India\""],
        color: YELLOW,
        chars: 312,
    },
];

/// Step 4: a splitter blade scans the document, then overlapping chunk cards cascade in.
pub struct Chunking;

impl Scene for Chunking {
    fn name(&self) -> &'static str {
        "chunking"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(8)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;
        let phase = t.phase();
        let nc = CHUNKS as f64;

        let doc = Rect::new(15.0, 8.0, w - 15.0, 36.0);
        Panel::tinted(BLUE, 0x10, 0x44, 8.0)
            .line_width(1.5)
            .draw(ctx, doc.x0, doc.y0, doc.width(), doc.height());
        ctx.set_align(TextAlign::Center);
        label(
            ctx,
            "Aseuro page content (~1800 chars)",
            w / 2.0,
            26.0,
            FontSpec::bold(10.0),
            BLUE,
        );

        let blade = t.progress(0.0, BLADE_SECONDS);
        let blade_x = doc.x0 + blade * doc.width();
        if blade < 1.0 {
            ctx.save();
            ctx.set_stroke(PURPLE);
            ctx.set_line_width(2.0);
            ctx.set_glow(PURPLE, 14.0);
            ctx.stroke_path(&line(
                Point::new(blade_x, doc.y0 - 2.0),
                Point::new(blade_x, doc.y1 + 2.0),
            ));
            ctx.restore();
            blade_trail(ctx, doc, blade_x);
        }
        for i in 1..CHUNKS {
            let sx = doc.x0 + doc.width() / nc * i as f64;
            if blade >= 1.0 || sx < blade_x {
                ctx.save();
                ctx.set_stroke(RED.with_alpha(0x88));
                ctx.set_line_width(2.0);
                ctx.set_dash(Some([3.0, 3.0]));
                ctx.stroke_path(&line(
                    Point::new(sx, doc.y0 + 2.0),
                    Point::new(sx, doc.y1 - 2.0),
                ));
                ctx.restore();
            }
        }

        ctx.set_alpha(0.5 + 0.3 * t.wave(4, 0.0));
        label(
            ctx,
            "\u{2193} RecursiveCharacterTextSplitter(chunk_size=400, overlap=50)",
            w / 2.0,
            52.0,
            FontSpec::bold(9.0),
            PURPLE,
        );
        ctx.set_alpha(1.0);

        let cw = (w - 50.0) / nc - 8.0;
        let start_y = 62.0;
        let ch = h - start_y - 14.0;

        for (i, chunk) in CHUNK_CARDS.iter().enumerate() {
            let k = i as f64;
            let reveal_start = BLADE_SECONDS + k * STAGGER;
            let reveal = t.progress(reveal_start, REVEAL_SECONDS);
            if reveal <= 0.0 {
                continue;
            }
            let since = phase - reveal_start;
            let x = 18.0 + k * (cw + 12.0);
            let y = start_y - 30.0 * (1.0 - reveal);

            ctx.set_alpha(reveal);
            let active = since < 1.5;
            let card = round_rect(x, y, cw, ch, 8.0);
            if active {
                ctx.set_glow(chunk.color, 12.0);
            }
            ctx.set_fill(chunk.color.with_alpha(0x12));
            ctx.set_stroke(chunk.color.with_alpha(if active { 0x88 } else { 0x55 }));
            ctx.set_line_width(if active { 2.0 } else { 1.5 });
            ctx.fill_path(&card);
            ctx.stroke_path(&card);
            ctx.clear_glow();

            ctx.set_align(TextAlign::Center);
            let cx = x + cw / 2.0;
            label(ctx, chunk.title, cx, y + 18.0, FontSpec::bold(11.0), chunk.color);
            let counted = (f64::from(chunk.chars) * since.min(1.0)).floor() as u32;
            let counter = format!("{counted}/400 chars");
            label(ctx, &counter, cx, y + 32.0, FontSpec::mono(9.0), MUTED);

            let typed = ((since - 0.3) / 1.2).max(0.0);
            for (j, text) in chunk.lines.iter().enumerate() {
                let line_progress = ((typed - j as f64 * 0.25) * 3.0).clamp(0.0, 1.0);
                if line_progress > 0.0 {
                    let n = (text.chars().count() as f64 * line_progress).floor() as usize;
                    let ly = y + 50.0 + j as f64 * 14.0;
                    label(
                        ctx,
                        prefix(text, n),
                        cx,
                        ly,
                        FontSpec::mono(9.0),
                        INK.with_alpha(0x99),
                    );
                }
            }

            if i + 1 < CHUNKS && reveal >= 1.0 {
                overlap_zone(ctx, t, k, x + cw - 3.0, y, ch);
            }
            ctx.set_alpha(1.0);

            if reveal < 1.0 {
                let from_x = doc.x0 + doc.width() / nc * (k + 0.5);
                for p in 0..3 {
                    let pp = (since + f64::from(p) * 0.15).rem_euclid(REVEAL_SECONDS)
                        / REVEAL_SECONDS;
                    let px = from_x + (cx - from_x) * pp;
                    let py = doc.y1 + (y - doc.y1) * pp;
                    glow_dot(ctx, Point::new(px, py), 2.5 - pp * 1.5, chunk.color, 6.0);
                }
            }
        }

        if blade >= 1.0 {
            for (i, sep) in SEPARATORS.iter().enumerate() {
                let k = (i + 1) as f64;
                let sx = doc.x0 + doc.width() / nc * k;
                ctx.set_alpha(0.5 + 0.3 * t.wave(3, k));
                label(ctx, sep, sx, doc.y0 - 2.0, FontSpec::mono_bold(7.0), RED);
                ctx.set_alpha(1.0);
            }
        }

        if phase >= BLADE_SECONDS {
            let created = (((phase - BLADE_SECONDS) / STAGGER).floor() as usize + 1).min(CHUNKS);
            Panel::solid(BLACK.with_opacity(0.4), 6.0).draw(ctx, w - 120.0, h - 22.0, 108.0, 18.0);
            ctx.set_align(TextAlign::Right);
            let badge = format!("\u{2713} {created}/{CHUNKS} chunks created");
            label(ctx, &badge, w - 18.0, h - 9.0, FontSpec::mono_bold(9.0), GREEN);
        }
        ctx.set_align(TextAlign::Left);
    }
}

/// Fading band behind the blade, drawn as stepped strips.
fn blade_trail(ctx: &mut dyn DrawContext, doc: Rect, blade_x: f64) {
    const BANDS: u32 = 6;
    let left = doc.x0.max(blade_x - 60.0);
    let width = 60f64.min(blade_x - doc.x0);
    if width <= 0.0 {
        return;
    }
    let band = width / f64::from(BANDS);
    for b in 0..BANDS {
        let x0 = left + band * f64::from(b);
        let opacity = 0.15 * f64::from(b + 1) / f64::from(BANDS);
        ctx.set_fill(PURPLE.with_opacity(opacity));
        ctx.fill_rect(Rect::new(x0, doc.y0, x0 + band, doc.y1));
    }
}

/// Pulsing strip marking the shared characters between chunk `k` and its right neighbour.
fn overlap_zone(ctx: &mut dyn DrawContext, t: &CycleTime, k: f64, ox: f64, y: f64, ch: f64) {
    let zone = round_rect(ox, y + 4.0, 14.0, ch - 8.0, 4.0);
    ctx.set_fill(PURPLE.with_opacity(0.15 + 0.12 * t.wave(5, k * 1.5)));
    ctx.fill_path(&zone);
    let lit = t.wave(4, k) > 0.3;
    ctx.set_stroke(PURPLE.with_alpha(if lit { 0x77 } else { 0x33 }));
    ctx.set_line_width(1.0);
    ctx.stroke_path(&zone);

    ctx.save();
    ctx.transform(Affine::translate((ox + 7.0, y + ch / 2.0)));
    ctx.transform(Affine::rotate(-FRAC_PI_2));
    label(
        ctx,
        "50 overlap",
        0.0,
        0.0,
        FontSpec::bold(7.0),
        PURPLE.with_alpha(0xbb),
    );
    ctx.restore();
}
