// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Text and JSON output.

use boxoffice::{Applied, Outcome, Row, form::FieldSpec, report::Report};
use serde::Serialize;

use crate::cli::Format;

/// Render any serializable value as pretty JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Aligned grid with a header line and a separator.
pub fn table(headers: &[String], rows: &[Row]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(row.display(i).chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    let mut out = vec![line(headers.iter().map(String::as_str).collect())];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        out.push(line((0..headers.len()).map(|i| row.display(i)).collect()));
    }
    out.join("\n")
}

/// Render reports one after another.
pub fn reports(reports: &[Report], format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => json(reports),
        Format::Text => Ok(reports
            .iter()
            .map(|r| {
                let count = match r.rows.len() {
                    1 => "1 row".to_owned(),
                    n => format!("{n} rows")
                };
                format!("{}\n\n{}\n({count})", r.title, table(&r.headers, &r.rows))
            })
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}

/// Render a committed mutation.
pub fn applied(applied: &Applied, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => json(applied),
        Format::Text => Ok(applied.message.clone())
    }
}

/// Render an update or delete outcome.
pub fn outcome(outcome: &Outcome, format: Format) -> anyhow::Result<String> {
    match (outcome, format) {
        (_, Format::Json) => json(outcome),
        (Outcome::Applied(a), Format::Text) => Ok(a.message.clone()),
        (Outcome::Declined, Format::Text) => Ok("Cancelled, nothing changed.".to_owned())
    }
}

/// Render a form's field list.
pub fn fields(fields: &[FieldSpec], format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => json(fields),
        Format::Text => {
            let headers = ["Field", "Label", "Required", "Hint"].map(String::from);
            let rows: Vec<Row> = fields
                .iter()
                .map(|f| {
                    Row(vec![
                        Some(f.name.to_owned()),
                        Some(f.label.to_owned()),
                        Some(if f.required { "yes" } else { "no" }.to_owned()),
                        Some(f.hint.unwrap_or_default().to_owned()),
                    ])
                })
                .collect();
            Ok(table(&headers, &rows))
        }
    }
}

/// Render a list of names one per line.
pub fn list(items: &[String], format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => json(items),
        Format::Text => Ok(items.join("\n"))
    }
}
