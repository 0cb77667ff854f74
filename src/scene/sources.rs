use super::cycle::{Cycle, CycleTime};
use super::{Scene, VirtualSurface};
use crate::draw::color::Color;
use crate::draw::color::palette::{BLUE, CYAN, GREEN, MUTED, PINK, PURPLE, YELLOW};
use crate::draw::context::FontSpec;
use crate::draw::primitives::{Panel, glow_dot, label, with_alpha};
use crate::foundation::core::Point;

struct Source {
    title: &'static str,
    detail: &'static str,
    color: Color,
}

const URLS: [Source; 3] = [
    Source {
        title: "https://aseuro.com",
        detail: "Company website",
        color: BLUE,
    },
    Source {
        title: "https://aseuro.com/about",
        detail: "About page (recursive)",
        color: CYAN,
    },
    Source {
        title: "https://aseuro.com/services",
        detail: "Services page (recursive)",
        color: PURPLE,
    },
];

const FILES: [Source; 3] = [
    Source {
        title: "company_report.pdf",
        detail: "PyPDFLoader",
        color: GREEN,
    },
    Source {
        title: "team_data.csv",
        detail: "CSVLoader",
        color: YELLOW,
    },
    Source {
        title: "notes.txt",
        detail: "TextLoader",
        color: PINK,
    },
];

/// Step 1: crawled URLs on the left, uploaded files on the right.
pub struct Sources;

impl Scene for Sources {
    fn name(&self) -> &'static str {
        "sources"
    }

    fn cycle(&self) -> Cycle {
        Cycle::seconds(4)
    }

    fn paint(&self, s: &mut VirtualSurface<'_>, t: &CycleTime) {
        let (w, h) = (s.width, s.height);
        let ctx = &mut *s.ctx;

        Panel::tinted(BLUE, 0x10, 0x33, 10.0).draw(ctx, 8.0, 4.0, w * 0.46, h - 8.0);
        label(
            ctx,
            "🌐 URL SOURCES (Playwright)",
            14.0,
            20.0,
            FontSpec::bold(9.0),
            BLUE,
        );
        for (i, src) in URLS.iter().enumerate() {
            let k = i as f64;
            let y = 30.0 + k * 44.0;
            with_alpha(ctx, 0.7 + 0.3 * t.wave(1, k), |ctx| {
                Panel::tinted(src.color, 0x15, 0x44, 6.0).draw(ctx, 14.0, y, w * 0.42, 36.0);
                label(ctx, src.title, 20.0, y + 15.0, FontSpec::mono_bold(10.0), src.color);
                label(ctx, src.detail, 20.0, y + 29.0, FontSpec::sans(9.0), MUTED);
            });
            // particle leaving the card towards the file column
            let px = 14.0 + w * 0.42 + 5.0 + 35.0 * t.loop_fraction(5, k * 18.0 / 35.0);
            glow_dot(ctx, Point::new(px.min(w * 0.52), y + 18.0), 2.5, src.color, 5.0);
        }

        Panel::tinted(GREEN, 0x10, 0x33, 10.0).draw(ctx, w * 0.52, 4.0, w * 0.46, h - 8.0);
        label(
            ctx,
            "📄 FILE UPLOADS",
            w * 0.54 + 6.0,
            20.0,
            FontSpec::bold(9.0),
            GREEN,
        );
        let x = w * 0.54 + 6.0;
        for (i, file) in FILES.iter().enumerate() {
            let k = i as f64;
            let y = 30.0 + k * 44.0;
            with_alpha(ctx, 0.7 + 0.3 * t.wave(1, k + 3.0), |ctx| {
                Panel::tinted(file.color, 0x15, 0x44, 6.0).draw(ctx, x, y, w * 0.4, 36.0);
                label(ctx, file.title, x + 8.0, y + 15.0, FontSpec::bold(10.0), file.color);
                label(ctx, file.detail, x + 8.0, y + 29.0, FontSpec::sans(9.0), MUTED);
            });
        }
    }
}
