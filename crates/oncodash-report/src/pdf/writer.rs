//! PDF 1.4 file assembly: objects, content stream, xref table and trailer.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};

use super::encoding;
use super::layout::{Op, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, Paint};
use super::metrics::{Font, PT_PER_MM};

/// Grid line gray level and width.
const GRID_GRAY: u8 = 200;
const GRID_WIDTH_MM: f64 = 0.1;

const FONTS: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

/// Format a number with at most `decimals` places and no trailing zeros.
fn num(value: f64, decimals: usize) -> String {
    let mut s = format!("{value:.decimals$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn pt(mm: f64) -> String {
    num(mm * PT_PER_MM, 2)
}

/// Convert a top-down millimetre `y` to bottom-up points.
fn y_pt(mm_from_top: f64) -> String {
    pt(PAGE_HEIGHT_MM - mm_from_top)
}

fn channel(v: u8) -> String {
    num(f64::from(v) / 255.0, 3)
}

fn fill_color(paint: Paint) -> String {
    match paint {
        Paint::Gray(g) => format!("{} g", channel(g)),
        Paint::Rgb(r, g, b) => format!("{} {} {} rg", channel(r), channel(g), channel(b)),
    }
}

/// Serialize drawing operations into a content stream.
pub(crate) fn content_stream(ops: &[Op]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} G {} w", channel(GRID_GRAY), pt(GRID_WIDTH_MM));

    for op in ops {
        match op {
            Op::Text {
                x,
                y,
                font,
                size,
                paint,
                bytes,
            } => {
                let _ = writeln!(
                    out,
                    "{} BT /{} {} Tf {} {} Td {} Tj ET",
                    fill_color(*paint),
                    font.resource(),
                    num(*size, 2),
                    pt(*x),
                    y_pt(*y),
                    encoding::literal(bytes)
                );
            }
            Op::FillRect {
                x,
                top,
                width,
                height,
                paint,
            } => {
                let _ = writeln!(
                    out,
                    "{} {} {} {} {} re f",
                    fill_color(*paint),
                    pt(*x),
                    y_pt(top + height),
                    pt(*width),
                    pt(*height)
                );
            }
            Op::StrokeRect {
                x,
                top,
                width,
                height,
            } => {
                let _ = writeln!(
                    out,
                    "{} {} {} {} re S",
                    pt(*x),
                    y_pt(top + height),
                    pt(*width),
                    pt(*height)
                );
            }
        }
    }

    out
}

/// `D:YYYYMMDDHHmmSS+HH'mm'` as used by the document information dictionary.
fn pdf_date(at: &DateTime<FixedOffset>) -> String {
    let offset = at.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.unsigned_abs() / 60;
    format!(
        "D:{}{}{:02}'{:02}'",
        at.format("%Y%m%d%H%M%S"),
        sign,
        minutes / 60,
        minutes % 60
    )
}

/// Object number of the first font; pages follow the fonts as
/// (page, contents) pairs.
const FIRST_FONT_ID: usize = 3;

/// Assemble a complete document with one page per content stream.
///
/// `title` is already WinAnsi-encoded.
pub(crate) fn document(
    streams: &[String],
    title: &[u8],
    created: &DateTime<FixedOffset>,
) -> Vec<u8> {
    let font_refs: String = FONTS
        .iter()
        .enumerate()
        .map(|(i, f)| format!("/{} {} 0 R", f.resource(), FIRST_FONT_ID + i))
        .collect::<Vec<_>>()
        .join(" ");
    let first_page_id = FIRST_FONT_ID + FONTS.len();
    let kids: String = (0..streams.len())
        .map(|n| format!("{} 0 R", first_page_id + 2 * n))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", streams.len()),
    ];
    for font in FONTS {
        objects.push(format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            font.base_font()
        ));
    }
    for stream in streams {
        let contents_id = objects.len() + 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << {font_refs} >> >> /Contents {contents_id} 0 R >>",
            pt(PAGE_WIDTH_MM),
            pt(PAGE_HEIGHT_MM)
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}endstream",
            stream.len()
        ));
    }
    objects.push(format!(
        "<< /Title {} /Producer (oncodash) /CreationDate ({}) >>",
        encoding::literal(title),
        pdf_date(created)
    ));
    let info_id = objects.len();

    let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = writeln!(xref, "{offset:010} 00000 n ");
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R /Info {info_id} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    );
    out.extend_from_slice(xref.as_bytes());
    out
}
