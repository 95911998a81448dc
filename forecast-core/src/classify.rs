use crate::model::{Advisory, AdvisoryKind, Forecast, SlotReport, Timeslot};

/// Classify every timeslot, preserving the forecast's order.
pub fn classify(forecast: &Forecast) -> Vec<SlotReport<'_>> {
    forecast.timeslots.iter().map(classify_slot).collect()
}

/// Precipitation advisories first, then at most one temperature bucket.
pub fn classify_slot(slot: &Timeslot) -> SlotReport<'_> {
    let mut kinds = precipitation_kinds(&slot.precipitation);

    let fahrenheit = match &slot.temperature {
        Ok(kelvin) => {
            let f = kelvin.to_fahrenheit();
            kinds.push(AdvisoryKind::for_fahrenheit(f));
            Some(f)
        }
        Err(err) => {
            tracing::debug!(
                from = %slot.from,
                to = %slot.to,
                error = %err,
                "skipping temperature classification"
            );
            None
        }
    };

    let advisories = kinds
        .into_iter()
        .map(|kind| Advisory { from: slot.from.clone(), to: slot.to.clone(), kind })
        .collect();

    SlotReport { timeslot: slot, fahrenheit, advisories }
}

/// Flatten reports into a single advisory listing in slot order.
pub fn advisories(reports: &[SlotReport<'_>]) -> Vec<Advisory> {
    reports.iter().flat_map(|r| r.advisories.iter().cloned()).collect()
}

// Substring match so compound types like "rain and snow" still count.
fn precipitation_kinds(precipitation: &str) -> Vec<AdvisoryKind> {
    let mut kinds = Vec::with_capacity(2);
    if precipitation.contains("snow") {
        kinds.push(AdvisoryKind::Snow);
    }
    if precipitation.contains("ice") {
        kinds.push(AdvisoryKind::Ice);
    }
    kinds
}
