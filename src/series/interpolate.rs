use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{calendar, MonthlyRecord, Provenance, QuarterlyObservation};

/// Build the month-end series spanning the observed periods.
///
/// Observations are keyed by period; when two share a period the one later in
/// `observations` wins. Months between two observed months are filled by
/// linear interpolation on month position. `item_code` and `item_description`
/// come from the earliest observation.
pub fn build_monthly_series(observations: &[QuarterlyObservation]) -> Vec<MonthlyRecord> {
    // 1) Period → observation, last one in input order survives
    let mut by_period: BTreeMap<NaiveDate, &QuarterlyObservation> = BTreeMap::new();
    for obs in observations {
        if let Some(prev) = by_period.insert(obs.period, obs) {
            warn!(
                period = %obs.period,
                kept = %obs.source,
                dropped = %prev.source,
                "duplicate report date; later file wins"
            );
        }
    }

    let (Some((&start, first)), Some((&end, _))) =
        (by_period.first_key_value(), by_period.last_key_value())
    else {
        return Vec::new();
    };

    for period in by_period.keys().filter(|p| !calendar::is_month_end(**p)) {
        warn!(%period, "report date is not a month end; it cannot anchor the monthly axis");
    }

    // 2) Month-end axis, 3) exact-date alignment
    let axis = calendar::monthly_axis(start, end);
    let mut slots: Vec<Option<f64>> = axis
        .iter()
        .map(|date| by_period.get(date).map(|o| o.value))
        .collect();

    // 4) Fill interior gaps
    let filled = fill_linear(&mut slots);
    debug!(months = axis.len(), filled, "aligned observations onto monthly axis");

    // 5) + 6) Tag and label
    let mut records = Vec::with_capacity(axis.len());
    let mut unanchored = 0usize;
    for (period, slot) in axis.into_iter().zip(slots) {
        let Some(value) = slot else {
            unanchored += 1;
            continue;
        };
        let provenance = if by_period.contains_key(&period) {
            Provenance::Original
        } else {
            Provenance::Imputed
        };
        records.push(MonthlyRecord {
            period,
            item_code: first.item_code.clone(),
            item_description: first.item_description.clone(),
            value,
            provenance,
        });
    }
    if unanchored > 0 {
        warn!(unanchored, "months outside the first/last month-end anchors were left out");
    }

    records
}

/// Linear fill of every run of `None` that has a value on both sides.
/// Leading/trailing `None`s stay unset. Returns the number of slots filled.
pub fn fill_linear(slots: &mut [Option<f64>]) -> usize {
    let mut filled = 0;
    let mut prev: Option<(usize, f64)> = None;

    for j in 0..slots.len() {
        let Some(b) = slots[j] else { continue };
        if let Some((i, a)) = prev {
            let k = (j - i) as f64;
            for (step, slot) in slots[i + 1..j].iter_mut().enumerate() {
                let pos = (step + 1) as f64;
                *slot = Some(a + (b - a) * pos / k);
                filled += 1;
            }
        }
        prev = Some((j, b));
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn obs(period: NaiveDate, value: f64, desc: &str, source: &str) -> QuarterlyObservation {
        QuarterlyObservation::new(period, "BHCK2170", desc, value, source)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fill_linear_by_position() {
        let mut slots = vec![Some(10.0), None, None, None, Some(50.0), Some(20.0)];
        assert_eq!(fill_linear(&mut slots), 3);
        let values: Vec<f64> = slots.into_iter().flatten().collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0, 20.0]);
    }

    #[test]
    fn fill_linear_constant_endpoints_and_edges() {
        let mut slots = vec![None, Some(7.0), None, Some(7.0), None];
        assert_eq!(fill_linear(&mut slots), 1);
        assert_eq!(slots, vec![None, Some(7.0), Some(7.0), Some(7.0), None]);
    }

    #[test]
    fn four_quarters_become_ten_months() {
        // unsorted input, as a directory listing might hand it over
        let input = vec![
            obs(d(2020, 9, 30), 130.0, "Total assets", "c.csv"),
            obs(d(2020, 3, 31), 100.0, "Total assets", "a.csv"),
            obs(d(2020, 12, 31), 140.0, "Total assets", "d.csv"),
            obs(d(2020, 6, 30), 110.0, "Total assets", "b.csv"),
        ];
        let monthly = build_monthly_series(&input);

        assert_eq!(monthly.len(), 10);
        assert_eq!(monthly[0].period, d(2020, 3, 31));
        assert_eq!(monthly[9].period, d(2020, 12, 31));

        let expect = [
            (d(2020, 4, 30), 103.333_333_333),
            (d(2020, 5, 31), 106.666_666_667),
            (d(2020, 7, 31), 116.666_666_667),
            (d(2020, 8, 31), 123.333_333_333),
            (d(2020, 10, 31), 133.333_333_333),
        ];
        for (period, value) in expect {
            let rec = monthly.iter().find(|r| r.period == period).unwrap();
            assert_eq!(rec.provenance, Provenance::Imputed);
            assert!((rec.value - value).abs() < 1e-6, "{period}: {}", rec.value);
        }

        for o in &input {
            let rec = monthly.iter().find(|r| r.period == o.period).unwrap();
            assert_eq!(rec.provenance, Provenance::Original);
            assert_eq!(rec.value, o.value);
        }
        assert!(monthly.iter().all(|r| r.item_code == "BHCK2170"));
    }

    #[test]
    fn interpolation_matches_closed_form() {
        let (a, b, k) = (-40.0, 260.0, 6u32);
        let start = d(2019, 12, 31);
        let end = calendar::monthly_axis(start, d(2020, 6, 30))[k as usize];
        let monthly = build_monthly_series(&[obs(start, a, "", "x"), obs(end, b, "", "y")]);

        assert_eq!(monthly.len(), k as usize + 1);
        for (i, rec) in monthly.iter().enumerate() {
            let expected = a + (b - a) * i as f64 / k as f64;
            assert!(close(rec.value, expected));
        }
    }

    #[test]
    fn single_observation_is_one_original_month() {
        let monthly = build_monthly_series(&[obs(d(2021, 6, 30), 42.5, "Loans", "only.csv")]);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].period, d(2021, 6, 30));
        assert_eq!(monthly[0].value, 42.5);
        assert_eq!(monthly[0].provenance, Provenance::Original);
        assert_eq!(monthly[0].item_description, "Loans");
    }

    #[test]
    fn duplicate_period_last_wins() {
        let monthly = build_monthly_series(&[
            obs(d(2020, 3, 31), 1.0, "", "a.csv"),
            obs(d(2020, 3, 31), 2.0, "", "b.csv"),
        ]);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].value, 2.0);
    }

    #[test]
    fn description_comes_from_earliest_period() {
        let monthly = build_monthly_series(&[
            obs(d(2020, 6, 30), 2.0, "Later label", "b.csv"),
            obs(d(2020, 3, 31), 1.0, "Earliest label", "a.csv"),
        ]);
        assert!(monthly.iter().all(|r| r.item_description == "Earliest label"));
    }

    #[test]
    fn mid_month_dates_only_anchor_exact_matches() {
        let monthly = build_monthly_series(&[
            obs(d(2020, 3, 15), 1.0, "", "a.csv"),
            obs(d(2020, 4, 30), 2.0, "", "b.csv"),
            obs(d(2020, 6, 30), 4.0, "", "c.csv"),
        ]);
        let periods: Vec<_> = monthly.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![d(2020, 4, 30), d(2020, 5, 31), d(2020, 6, 30)]);
        assert!(close(monthly[1].value, 3.0));
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(build_monthly_series(&[]).is_empty());
    }
}
