//! Flow layout of the report.
//!
//! All positions are millimetres from the top-left corner of an A4 page.
//! Text `y` values are baselines. Each block below the patient table is
//! placed relative to the measured end of the block above it. Content that
//! would cross the bottom margin continues on a new page, and a table split
//! across pages repeats its header row.

use crate::content::ReportContent;
use crate::error::{ReportError, ReportResult};

use super::encoding;
use super::metrics::{Font, PT_PER_MM, text_width_mm, wrap};

pub(crate) const PAGE_WIDTH_MM: f64 = 210.0;
pub(crate) const PAGE_HEIGHT_MM: f64 = 297.0;

const CENTER_X: f64 = PAGE_WIDTH_MM / 2.0;
const MARGIN_X: f64 = 20.0;
const CONTENT_WIDTH: f64 = 170.0;

const TITLE_Y: f64 = 20.0;
const TITLE_SIZE: f64 = 20.0;
const DATE_Y: f64 = 28.0;
const DATE_SIZE: f64 = 10.0;
const HEADING_SIZE: f64 = 14.0;
const PATIENT_HEADING_Y: f64 = 45.0;
const PATIENT_TABLE_Y: f64 = 50.0;

/// Where content resumes on a continuation page.
const CONTINUATION_TOP: f64 = 20.0;
const BOTTOM_MARGIN: f64 = 15.0;
const BOTTOM_LIMIT: f64 = PAGE_HEIGHT_MM - BOTTOM_MARGIN;

const HEADING_AFTER_TABLE: f64 = 10.0;
const TABLE_AFTER_HEADING: f64 = 5.0;
const DISCLAIMER_AFTER_TABLE: f64 = 15.0;
const DISCLAIMER_SIZE: f64 = 9.0;

const CELL_SIZE: f64 = 10.0;
const RESULT_CELL_SIZE: f64 = 12.0;
const CELL_PADDING: f64 = 1.76;
const LINE_HEIGHT_FACTOR: f64 = 1.15;
const BASELINE_FACTOR: f64 = 0.8;

/// Table header fill, RGB.
pub(crate) const HEADER_FILL: (u8, u8, u8) = (30, 136, 229);
/// Disclaimer text gray level on a 0-255 scale.
const DISCLAIMER_GRAY: u8 = 100;

/// Fill color for text and rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Paint {
    Gray(u8),
    Rgb(u8, u8, u8),
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Text {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        paint: Paint,
        bytes: Vec<u8>,
    },
    FillRect {
        x: f64,
        top: f64,
        width: f64,
        height: f64,
        paint: Paint,
    },
    StrokeRect {
        x: f64,
        top: f64,
        width: f64,
        height: f64,
    },
}

/// Vertical extent of a block. `top` is on the page the block starts on and
/// `bottom` on the page it ends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

/// Where each block of the report landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockPositions {
    pub patient_table: Span,
    /// Baseline of the results heading.
    pub results_heading: f64,
    pub results_table: Span,
    /// Baseline of the first disclaimer line and the last one.
    pub disclaimer: Span,
}

#[derive(Debug)]
pub(crate) struct PageLayout {
    /// Drawing operations, one list per page.
    pub pages: Vec<Vec<Op>>,
    pub blocks: BlockPositions,
}

fn line_height(size: f64) -> f64 {
    size / PT_PER_MM * LINE_HEIGHT_FACTOR
}

/// A table row wrapped to its column width.
struct Row {
    cells: [Vec<String>; 2],
    font: Font,
    size: f64,
    height: f64,
    header: bool,
}

impl Row {
    fn measure(cells: [&str; 2], font: Font, size: f64, header: bool) -> Self {
        let text_width = CONTENT_WIDTH / 2.0 - 2.0 * CELL_PADDING;
        let cells = cells.map(|cell| wrap(cell, font, size, text_width));
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        Self {
            cells,
            font,
            size,
            height: lines as f64 * line_height(size) + 2.0 * CELL_PADDING,
            header,
        }
    }
}

struct Canvas {
    pages: Vec<Vec<Op>>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
        }
    }

    fn push(&mut self, op: Op) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    /// Return `y`, or the top of a new page when `y` plus the `below` space
    /// that must follow it on the same page crosses the bottom margin.
    fn reserve(&mut self, y: f64, below: f64) -> f64 {
        if y + below > BOTTOM_LIMIT {
            self.new_page();
            CONTINUATION_TOP
        } else {
            y
        }
    }

    fn text(
        &mut self,
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        paint: Paint,
        text: &str,
    ) -> ReportResult<()> {
        let bytes = encoding::encode(text)?;
        self.push(Op::Text {
            x,
            y,
            font,
            size,
            paint,
            bytes,
        });
        Ok(())
    }

    fn centered(&mut self, y: f64, font: Font, size: f64, text: &str) -> ReportResult<()> {
        let x = CENTER_X - text_width_mm(text, font, size) / 2.0;
        self.text(x, y, font, size, Paint::Gray(0), text)
    }

    /// Draw a two-column grid table starting at `top`.
    ///
    /// Returns where the table starts, which moves to a new page when not
    /// even the header fits, and its bottom edge on the page it ends on.
    fn table(
        &mut self,
        top: f64,
        header: [&str; 2],
        rows: &[(String, String)],
        body_font: Font,
        body_size: f64,
    ) -> ReportResult<(f64, f64)> {
        let header = Row::measure(header, Font::Bold, CELL_SIZE, true);
        let mut start = top;
        if start + header.height > BOTTOM_LIMIT {
            self.new_page();
            start = CONTINUATION_TOP;
        }
        let mut y = self.row(start, &header)?;

        for (label, value) in rows {
            let row = Row::measure([label.as_str(), value.as_str()], body_font, body_size, false);
            if y + row.height > BOTTOM_LIMIT {
                if CONTINUATION_TOP + header.height + row.height > BOTTOM_LIMIT {
                    return Err(ReportError::RowTooTall {
                        label: label.clone(),
                    });
                }
                self.new_page();
                y = self.row(CONTINUATION_TOP, &header)?;
            }
            y = self.row(y, &row)?;
        }
        Ok((start, y))
    }

    fn row(&mut self, top: f64, row: &Row) -> ReportResult<f64> {
        let column = CONTENT_WIDTH / 2.0;

        for (i, cell_lines) in row.cells.iter().enumerate() {
            let x = MARGIN_X + column * i as f64;
            if row.header {
                let (r, g, b) = HEADER_FILL;
                self.push(Op::FillRect {
                    x,
                    top,
                    width: column,
                    height: row.height,
                    paint: Paint::Rgb(r, g, b),
                });
            }
            self.push(Op::StrokeRect {
                x,
                top,
                width: column,
                height: row.height,
            });

            let paint = if row.header { Paint::Gray(255) } else { Paint::Gray(0) };
            let first = top + CELL_PADDING + row.size / PT_PER_MM * BASELINE_FACTOR;
            for (n, line) in cell_lines.iter().enumerate() {
                let y = first + n as f64 * line_height(row.size);
                self.text(x + CELL_PADDING, y, row.font, row.size, paint, line)?;
            }
        }

        Ok(top + row.height)
    }
}

/// Lay out the report. Every string is encoded here, so an unsupported
/// character fails before any output exists.
pub(crate) fn layout(content: &ReportContent) -> ReportResult<PageLayout> {
    let mut canvas = Canvas::new();

    canvas.centered(TITLE_Y, Font::Bold, TITLE_SIZE, &content.title)?;
    canvas.centered(DATE_Y, Font::Regular, DATE_SIZE, &content.generated_line())?;

    canvas.text(
        MARGIN_X,
        PATIENT_HEADING_Y,
        Font::Bold,
        HEADING_SIZE,
        Paint::Gray(0),
        &content.patient_heading,
    )?;
    let (patient_top, patient_bottom) = canvas.table(
        PATIENT_TABLE_Y,
        ["Field", "Value"],
        &content.patient_rows,
        Font::Regular,
        CELL_SIZE,
    )?;

    // The results heading stays on the page of its table's header row.
    let results_header = Row::measure(["Metric", "Value"], Font::Bold, CELL_SIZE, true);
    let results_heading = canvas.reserve(
        patient_bottom + HEADING_AFTER_TABLE,
        TABLE_AFTER_HEADING + results_header.height,
    );
    canvas.text(
        MARGIN_X,
        results_heading,
        Font::Bold,
        HEADING_SIZE,
        Paint::Gray(0),
        &content.results_heading,
    )?;
    let (results_top, results_bottom) = canvas.table(
        results_heading + TABLE_AFTER_HEADING,
        ["Metric", "Value"],
        &content.result_rows,
        Font::Bold,
        RESULT_CELL_SIZE,
    )?;

    let disclaimer_top = canvas.reserve(results_bottom + DISCLAIMER_AFTER_TABLE, 0.0);
    let mut y = disclaimer_top;
    let mut disclaimer_last = disclaimer_top;
    for (n, line) in wrap(&content.disclaimer, Font::Oblique, DISCLAIMER_SIZE, CONTENT_WIDTH)
        .iter()
        .enumerate()
    {
        if n > 0 {
            y = canvas.reserve(y + line_height(DISCLAIMER_SIZE), 0.0);
        }
        canvas.text(
            MARGIN_X,
            y,
            Font::Oblique,
            DISCLAIMER_SIZE,
            Paint::Gray(DISCLAIMER_GRAY),
            line,
        )?;
        disclaimer_last = y;
    }

    Ok(PageLayout {
        pages: canvas.pages,
        blocks: BlockPositions {
            patient_table: Span {
                top: patient_top,
                bottom: patient_bottom,
            },
            results_heading,
            results_table: Span {
                top: results_top,
                bottom: results_bottom,
            },
            disclaimer: Span {
                top: disclaimer_top,
                bottom: disclaimer_last,
            },
        },
    })
}
