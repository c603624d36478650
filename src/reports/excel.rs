use super::RepositoryReport;
use super::common::{self, ResolutionClasses};
use crate::Result;
use crate::facts::{StatsOutcome, TagFamily};
use ohno::IntoAppError;
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Url, Workbook, Worksheet};
use std::io::Write;

/// Columns between the starts of two repository blocks.
const BLOCK_STRIDE: usize = 4;

/// Name of the worksheet when there is nothing to report.
const EMPTY_SHEET_NAME: &str = "Statistics";

struct Formats {
    bold: Format,
    section: Format,
    positive: Format,
    negative: Format,
    incomplete: Format,
    value: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            bold: Format::new().set_bold(),
            section: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0x00FE_D7AA))
                .set_align(FormatAlign::Left),
            positive: Format::new().set_font_color(Color::RGB(0x002E_7D32)),
            negative: Format::new().set_font_color(Color::RGB(0x00C6_2828)),
            incomplete: Format::new()
                .set_background_color(Color::RGB(0x00FF_CDD2))
                .set_font_color(Color::RGB(0x00C6_2828))
                .set_bold(),
            value: Format::new().set_align(FormatAlign::Right),
        }
    }
}

/// Write one worksheet, titled by the time window, with one two-column block per repository.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
pub fn generate<W: Write>(reports: &[RepositoryReport], classes: &ResolutionClasses, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("pagure-stats");
    workbook.set_properties(&properties);

    let sheet_name = reports.first().map_or_else(|| EMPTY_SHEET_NAME.to_string(), |r| r.window.title());
    let worksheet = workbook.add_worksheet().set_name(&sheet_name)?;
    let formats = Formats::new();

    for (index, report) in reports.iter().enumerate() {
        let col = u16::try_from(index * BLOCK_STRIDE).into_app_err("too many repositories for one worksheet")?;
        write_block(worksheet, col, report, classes, &formats)?;
    }

    worksheet.autofit();

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

/// Fill the block of `report`, label column at `col` and value column right of it.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_block(worksheet: &mut Worksheet, col: u16, report: &RepositoryReport, classes: &ResolutionClasses, formats: &Formats) -> Result<()> {
    let value_col = col + 1;
    let mut row = 0;

    worksheet.write_url_with_format(row, col, Url::new(report.issues_page.as_str()).set_text(&report.repository), &formats.bold)?;
    row += 1;

    worksheet.write_string(row, col, "Opened issues")?;
    if let Some(open) = &report.open {
        write_count(worksheet, row, value_col, open.stats.total, &formats.value)?;
    }
    row += 1;

    worksheet.write_string(row, col, "Closed issues")?;
    if let Some(closed) = &report.closed {
        write_count(worksheet, row, value_col, closed.stats.total, &formats.value)?;
    }
    row += 2;

    if let Some(closed) = &report.closed {
        row = write_section(worksheet, row, col, "Time to Close (days):", formats)?;
        let stats = &closed.stats;
        #[expect(clippy::cast_precision_loss, reason = "day counts are far below f64 precision limits")]
        let rows = [
            ("Maximum", stats.max_ttc as f64),
            ("Minimum", stats.min_ttc as f64),
            ("Average", stats.avg_ttc),
            ("Median", stats.median_ttc),
        ];
        for (label, value) in rows {
            worksheet.write_string(row, col, label)?;
            worksheet.write_number_with_format(row, value_col, value, &formats.value)?;
            row += 1;
        }
        row += 1;
    }

    let Some(primary) = report.primary() else {
        return Ok(());
    };

    row = write_section(worksheet, row, col, "Resolution", formats)?;
    let split = classes.split(&primary.stats.resolution_counts);
    let groups = [
        (&split.positive, &formats.positive),
        (&split.negative, &formats.negative),
        (&split.other, &formats.value),
    ];
    for (group, format) in groups {
        for &(label, count) in group {
            worksheet.write_string_with_format(row, col, label, format)?;
            write_count(worksheet, row, value_col, count, &formats.value)?;
            row += 1;
        }
    }
    row += 1;

    for family in [TagFamily::Gain, TagFamily::Trouble] {
        row = write_section(worksheet, row, col, common::family_title(family), formats)?;
        for (tag, count) in primary.stats.level_counts(family).entries(family) {
            worksheet.write_string(row, col, tag)?;
            write_count(worksheet, row, value_col, count, &formats.value)?;
            row += 1;
        }
        row += 1;
    }

    worksheet.write_string(row, col, "Ops")?;
    write_count(worksheet, row, value_col, primary.stats.ops_count, &formats.value)?;
    row += 1;
    worksheet.write_string(row, col, "Dev")?;
    write_count(worksheet, row, value_col, primary.stats.dev_count, &formats.value)?;
    row += 1;

    let incomplete: Vec<&StatsOutcome> = report.outcomes().filter(|o| !o.is_complete()).collect();
    if !incomplete.is_empty() {
        row += 1;
        for outcome in incomplete {
            if let Some(failure) = &outcome.failure {
                worksheet.write_string_with_format(row, col, format!("Incomplete ({})", outcome.mode()), &formats.incomplete)?;
                worksheet.write_string_with_format(row, value_col, failure.to_string(), &formats.incomplete)?;
                row += 1;
            }
        }
    }

    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_section(worksheet: &mut Worksheet, row: u32, col: u16, title: &str, formats: &Formats) -> Result<u32> {
    worksheet.write_string_with_format(row, col, title, &formats.section)?;
    worksheet.write_blank(row, col + 1, &formats.section)?;
    Ok(row + 1)
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
#[expect(clippy::cast_precision_loss, reason = "issue counts are far below f64 precision limits")]
fn write_count(worksheet: &mut Worksheet, row: u32, col: u16, count: u64, format: &Format) -> Result<()> {
    worksheet.write_number_with_format(row, col, count as f64, format)?;
    Ok(())
}
