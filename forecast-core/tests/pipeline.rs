use forecast_core::{AdvisoryKind, DecodeError, advisories, classify, decode};

const FIXTURE: &[u8] = include_bytes!("fixtures/pittsburgh.xml");

#[test]
fn fixture_yields_advisories_in_slot_order() {
    let forecast = decode(FIXTURE).expect("fixture should decode");

    assert_eq!(forecast.location.name, "Pittsburgh");
    assert_eq!(forecast.location.country, "US");
    assert_eq!(forecast.timeslots.len(), 5);

    let reports = classify(&forecast);
    let kinds: Vec<Vec<AdvisoryKind>> = reports
        .iter()
        .map(|r| r.advisories.iter().map(|a| a.kind).collect())
        .collect();

    assert_eq!(
        kinds,
        vec![
            vec![AdvisoryKind::Snow, AdvisoryKind::Freezing],
            vec![AdvisoryKind::Cold],
            // Unparseable temperature: precipitation only.
            vec![AdvisoryKind::Snow, AdvisoryKind::Ice],
            vec![AdvisoryKind::Warm],
            vec![AdvisoryKind::Hot],
        ]
    );

    assert!(reports[2].fahrenheit.is_none());

    let listing = advisories(&reports);
    assert_eq!(listing.len(), 7);
    assert_eq!(listing[0].from, "2017-03-03T06:00:00");
    assert_eq!(listing[6].to, "2017-03-03T21:00:00");
}

#[test]
fn truncated_document_produces_no_advisories() {
    let truncated = &FIXTURE[..FIXTURE.len() / 2];
    let err = decode(truncated).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}
