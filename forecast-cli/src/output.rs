use forecast_core::{AdvisoryKind, Forecast, SlotReport, advisories};
use std::io::{self, Write};

/// Human-readable listing: location header, the decoded model when `verbose`, then one
/// line per advisory.
pub fn write_text<W: Write>(
    out: &mut W,
    forecast: &Forecast,
    reports: &[SlotReport<'_>],
    verbose: bool,
) -> io::Result<()> {
    writeln!(out, "location: {}, {}", forecast.location.name, forecast.location.country)?;
    if verbose {
        writeln!(out, "{forecast:#?}")?;
    }

    for report in reports {
        let slot = report.timeslot;
        for advisory in &report.advisories {
            let line = match (advisory.kind.is_temperature(), report.fahrenheit) {
                // Whole degrees, truncated toward zero.
                (true, Some(f)) => format!("{} {}", f as i64, message(advisory.kind)),
                _ => message(advisory.kind).to_string(),
            };
            writeln!(out, "{} - {} {}", slot.from, slot.to, line)?;
        }
    }

    Ok(())
}

pub fn write_json<W: Write>(
    out: &mut W,
    forecast: &Forecast,
    reports: &[SlotReport<'_>],
) -> anyhow::Result<()> {
    let doc = serde_json::json!({
        "location": forecast.location,
        "advisories": advisories(reports),
    });

    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

fn message(kind: AdvisoryKind) -> &'static str {
    match kind {
        AdvisoryKind::Snow => "Snow on the way!",
        AdvisoryKind::Ice => "Ice incoming",
        AdvisoryKind::Freezing => "It'll be below freezing!",
        AdvisoryKind::Cold => "It'll be cold today!",
        AdvisoryKind::Warm => "It'll be warm today!",
        AdvisoryKind::Hot => "It'll be hot today!",
    }
}
