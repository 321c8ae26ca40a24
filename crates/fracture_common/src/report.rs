//! Report layout.
//!
//! Cursor-based text placement on A4 millimetre coordinates, mirroring
//! the dashboard's report flow: fixed header block, field rows stepping
//! down the page, numbered recommendations with a page break past y=250,
//! footer at y=280. PDF binary emission is a library concern; documents
//! render to plain text here.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::error::FractureError;
use crate::state::{RecentAnalysis, Session};
use crate::types::ClassificationResult;

/// Cursor positions past this break to a new page.
const PAGE_BREAK_Y: u32 = 250;
/// Fresh page cursor position after a break.
const PAGE_TOP_Y: u32 = 20;
/// Left margin for all text.
const MARGIN_X: u32 = 20;
/// Footer row.
const FOOTER_Y: u32 = 280;

const FOOTER_TEXT: &str = "Generated by FractureAI - Advanced Medical AI Platform";

/// One positioned text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedText {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub text: String,
}

/// One laid-out page.
#[derive(Debug, Clone, Default)]
pub struct ReportPage {
    pub lines: Vec<PlacedText>,
}

/// A finished report, one or more pages.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    /// Render all pages as plain text, one line per placed run.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push_str("\n----- Page ");
                out.push_str(&(i + 1).to_string());
                out.push_str(" -----\n");
            }
            for line in &page.lines {
                out.push_str(&line.text);
                out.push('\n');
            }
        }
        out
    }

    /// Write the rendered report to disk.
    pub fn write_to(&self, path: &Path) -> Result<(), FractureError> {
        fs::write(path, self.render_text())?;
        Ok(())
    }
}

/// Builder that tracks the vertical cursor and breaks pages.
struct LayoutCursor {
    pages: Vec<ReportPage>,
    y: u32,
}

impl LayoutCursor {
    fn new() -> Self {
        Self {
            pages: vec![ReportPage::default()],
            y: 0,
        }
    }

    /// Place text at an absolute position, moving the cursor there.
    fn place(&mut self, y: u32, size: u32, text: impl Into<String>) {
        self.y = y;
        self.current().lines.push(PlacedText {
            x: MARGIN_X,
            y,
            size,
            text: text.into(),
        });
    }

    /// Place text at the cursor, then advance by `step`. Breaks to a new
    /// page first when the cursor is past the limit.
    fn flow(&mut self, size: u32, text: impl Into<String>, step: u32) {
        if self.y > PAGE_BREAK_Y {
            self.pages.push(ReportPage::default());
            self.y = PAGE_TOP_Y;
        }
        let y = self.y;
        self.current().lines.push(PlacedText {
            x: MARGIN_X,
            y,
            size,
            text: text.into(),
        });
        self.y += step;
    }

    fn advance(&mut self, step: u32) {
        self.y += step;
    }

    fn footer(&mut self) {
        self.current().lines.push(PlacedText {
            x: MARGIN_X,
            y: FOOTER_Y,
            size: 10,
            text: FOOTER_TEXT.to_string(),
        });
    }

    fn current(&mut self) -> &mut ReportPage {
        self.pages.last_mut().unwrap()
    }

    fn finish(mut self) -> ReportDocument {
        self.footer();
        ReportDocument { pages: self.pages }
    }
}

/// Full analysis report.
pub fn analysis_report(
    session: &Session,
    result: &ClassificationResult,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let mut layout = LayoutCursor::new();

    layout.place(30, 20, "FractureAI Medical Report");

    layout.place(50, 12, format!("Patient: {}", session.name));
    layout.place(60, 12, format!("User Type: {}", session.user_type));
    layout.place(70, 12, format!("Date: {}", generated_at.format("%Y-%m-%d")));
    layout.place(80, 12, format!("Time: {}", generated_at.format("%H:%M:%S")));

    layout.place(100, 16, "Analysis Results");

    layout.y = 120;
    layout.flow(
        12,
        format!(
            "Fracture Detected: {}",
            if result.fracture_detected { "YES" } else { "NO" }
        ),
        10,
    );
    layout.flow(12, format!("Bone Type: {}", result.bone_type), 10);
    layout.flow(12, format!("Confidence: {}%", result.confidence), 10);
    layout.flow(12, format!("Location: {}", result.location), 15);

    layout.flow(14, "Medical Recommendations", 10);
    for (i, rec) in result.recommendations.iter().enumerate() {
        layout.flow(12, format!("{}. {}", i + 1, rec), 8);
    }
    layout.advance(10);

    layout.finish()
}

/// Condensed report for a history entry.
pub fn history_report(
    session: &Session,
    entry: &RecentAnalysis,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let mut layout = LayoutCursor::new();

    layout.place(30, 20, "FractureAI Historical Report");

    layout.place(50, 12, format!("Patient: {}", session.name));
    layout.place(60, 12, format!("User Type: {}", session.user_type));
    layout.place(
        70,
        12,
        format!("Analysis Date: {}", entry.recorded_at.format("%Y-%m-%d %H:%M")),
    );
    layout.place(
        80,
        12,
        format!("Report Generated: {}", generated_at.format("%Y-%m-%d")),
    );

    layout.place(100, 16, "Historical Analysis Results");

    layout.y = 120;
    layout.flow(12, format!("Analysis Type: {}", entry.label), 10);
    layout.flow(12, format!("Confidence: {}%", entry.confidence), 10);
    layout.flow(12, format!("Status: {}", entry.status), 15);

    layout.finish()
}

/// Default report file name for an analysis run.
pub fn report_file_name(generated_at: DateTime<Utc>) -> String {
    format!("fracture-analysis-{}.txt", generated_at.format("%Y-%m-%d"))
}

/// Default report file name for a history entry.
pub fn history_report_file_name(entry: &RecentAnalysis, generated_at: DateTime<Utc>) -> String {
    format!(
        "fracture-history-{}-{}.txt",
        entry.id,
        generated_at.format("%Y-%m-%d")
    )
}
