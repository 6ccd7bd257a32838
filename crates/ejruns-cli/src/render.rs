use std::io::{self, Write};

use ejruns_core::ReportRow;

use crate::cli_args::OutputFormat;

pub fn render<W: Write>(
    format: OutputFormat,
    rows: &[ReportRow],
    out: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(rows, out),
        OutputFormat::Text => render_text(rows, out),
    }
}

/// Pretty JSON array with a trailing newline; `[]` when there are no rows.
pub fn render_json<W: Write>(rows: &[ReportRow], out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    out.write_all(b"\n")
}

/// One block per contest: a `#` header, then a tab-separated line per run.
pub fn render_text<W: Write>(rows: &[ReportRow], out: &mut W) -> io::Result<()> {
    for (index, group) in rows
        .chunk_by(|a, b| a.contest_id == b.contest_id)
        .enumerate()
    {
        if index > 0 {
            writeln!(out)?;
        }
        let head = &group[0];
        writeln!(
            out,
            "# {} ({}) {}",
            head.contest, head.contest_id, head.contest_url
        )?;
        for row in group {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                row.run_id, row.submitted_at, row.user, row.problem, row.result
            )?;
        }
    }
    Ok(())
}
