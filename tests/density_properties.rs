//! Property-based tests for strand-aware density retrieval
//!
//! Covers the fixed-length contract, strand orientation, NaN handling
//! and normalization statistics.

use bigwig_density::core::{
    AlignmentHandle, CoverageTrack, DensityError, DensitySource, Region, RegionEvaluator, Strand,
    StrandedDensity, UnstrandedDensity,
};
use bigwig_density::formats::BedGraphTrack;
use proptest::prelude::*;

/// Build a track with one 1bp record per `Some` value starting at `start`
fn track_from(chrom: &str, start: u64, values: &[Option<f64>]) -> BedGraphTrack {
    let mut track = BedGraphTrack::default();
    for (i, v) in values.iter().enumerate() {
        if let Some(v) = v {
            let pos = start + i as u64;
            track.insert(chrom, pos, pos + 1, *v);
        }
    }
    track
}

/// Raw track fetch; a track with no records at all has no chromosome either
fn raw_fetch(track: &mut BedGraphTrack, start: u64, end: u64) -> Vec<f64> {
    track
        .query("chr1", start, end)
        .unwrap_or_else(|_| vec![f64::NAN; (end - start) as usize])
}

/// Element-wise equality where NaN equals NaN
fn same(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
}

fn arb_values() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(
        prop_oneof![
            3 => (-100.0f64..100.0).prop_map(|v| Some((v * 100.0).round() / 100.0)),
            1 => Just(None),
        ],
        1..200,
    )
}

/// Values with an in-bounds query window `[start, end)`
fn arb_track_and_window() -> impl Strategy<Value = (Vec<Option<f64>>, u64, u64)> {
    arb_values().prop_flat_map(|values| {
        let len = values.len() as u64;
        (Just(values), 0..len).prop_flat_map(move |(values, start)| {
            (Just(values), Just(start), (start + 1)..=(len + 20))
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: result length is end - start, whether or not the chromosome exists
    #[test]
    fn prop_length_matches_interval(
        (values, start, end) in arb_track_and_window(),
        chrom in prop_oneof![Just("chr1"), Just("chr2")],
        strand in prop_oneof![Just(Strand::Plus), Just(Strand::Minus)],
        zero_missing in any::<bool>()
    ) {
        let mut density = StrandedDensity::new(
            track_from("chr1", 0, &values),
            track_from("chr1", 0, &values),
            None,
        );
        let result = density.values(chrom, start, end, strand, zero_missing).unwrap();
        prop_assert_eq!(result.len() as u64, end - start);
    }

    /// Property: an absent chromosome yields only NaN, stranded and unstranded
    #[test]
    fn prop_missing_chromosome_all_nan(
        values in arb_values(),
        start in 0u64..1_000_000,
        len in 1u64..500
    ) {
        let mut stranded = StrandedDensity::new(
            track_from("chr1", 0, &values),
            track_from("chr1", 0, &values),
            None,
        );
        for strand in [Strand::Plus, Strand::Minus] {
            let result = stranded.values("chrUn", start, start + len, strand, false).unwrap();
            prop_assert_eq!(result.len() as u64, len);
            prop_assert!(result.iter().all(|v| v.is_nan()));
        }

        let mut unstranded = UnstrandedDensity::new(track_from("chr1", 0, &values), None);
        let result = unstranded.values("chrUn", start, start + len, false).unwrap();
        prop_assert_eq!(result.len() as u64, len);
        prop_assert!(result.iter().all(|v| v.is_nan()));
    }

    /// Property: plus strand equals the raw positive fetch, minus strand its exact reverse
    #[test]
    fn prop_strand_orientation((values, start, end) in arb_track_and_window()) {
        let mut raw_pos = track_from("chr1", 0, &values);
        let mut raw_neg = track_from("chr1", 0, &values);
        let raw_plus = raw_fetch(&mut raw_pos, start, end);
        let mut raw_minus = raw_fetch(&mut raw_neg, start, end);
        raw_minus.reverse();

        let mut density = StrandedDensity::new(raw_pos, raw_neg, None);
        let plus = density.values("chr1", start, end, Strand::Plus, false).unwrap();
        let minus = density.values("chr1", start, end, Strand::Minus, false).unwrap();

        prop_assert!(same(&plus, &raw_plus));
        prop_assert!(same(&minus, &raw_minus));
    }

    /// Property: zero_missing maps NaN to 0.0 and leaves every other value untouched
    #[test]
    fn prop_zero_missing_only_replaces_nan(
        (values, start, end) in arb_track_and_window(),
        strand in prop_oneof![Just(Strand::Plus), Just(Strand::Minus)]
    ) {
        let mut density = StrandedDensity::new(
            track_from("chr1", 0, &values),
            track_from("chr1", 0, &values),
            None,
        );
        let raw = density.values("chr1", start, end, strand, false).unwrap();
        let zeroed = density.values("chr1", start, end, strand, true).unwrap();

        prop_assert_eq!(raw.len(), zeroed.len());
        for (r, z) in raw.iter().zip(&zeroed) {
            prop_assert!(!z.is_nan());
            if r.is_nan() {
                prop_assert_eq!(*z, 0.0);
            } else {
                prop_assert_eq!(r, z);
            }
        }
    }

    /// Property: pseudocount is exactly 1e6 / total_mapped
    #[test]
    fn prop_pseudocount_formula(mapped in 1u64..10_000_000_000) {
        let density = UnstrandedDensity::new(
            BedGraphTrack::default(),
            Some(AlignmentHandle::new("sample.bam", mapped)),
        );
        prop_assert_eq!(density.total_mapped().unwrap(), mapped);
        prop_assert_eq!(density.pseudocount().unwrap(), 1_000_000.0 / mapped as f64);
    }

    /// Property: rpm_to_raw(rpm) * mapped == rpm * 1e6
    #[test]
    fn prop_rpm_to_raw_relation(mapped in 1u64..10_000_000_000, rpm in 0.0f64..1000.0) {
        let density = UnstrandedDensity::new(
            BedGraphTrack::default(),
            Some(AlignmentHandle::new("sample.bam", mapped)),
        );
        let raw = density.rpm_to_raw(rpm).unwrap();
        let expected = rpm * 1_000_000.0;
        prop_assert!((raw * mapped as f64 - expected).abs() <= expected.abs() * 1e-12 + 1e-9);

        let pc = density.pseudocount().unwrap();
        let raw_pc = density.rpm_to_raw(pc).unwrap();
        prop_assert!((raw_pc - pc * pc).abs() <= pc * pc * 1e-12);
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

fn scenario_source() -> StrandedDensity<BedGraphTrack> {
    let mut pos = BedGraphTrack::default();
    pos.insert("chr1", 10, 12, 0.0);
    pos.insert("chr1", 12, 15, 5.0);
    pos.insert("chr1", 15, 16, 0.0);

    let mut neg = BedGraphTrack::default();
    neg.insert("chr1", 5, 6, 1.0);
    neg.insert("chr1", 6, 7, 2.0);
    neg.insert("chr1", 7, 8, 3.0);

    StrandedDensity::new(pos, neg, Some(AlignmentHandle::new("clip.bam", 1_000_000)))
}

#[test]
fn test_scenario_plus_passthrough() {
    let values = scenario_source()
        .values("chr1", 10, 16, Strand::Plus, false)
        .unwrap();
    assert_eq!(values, vec![0.0, 0.0, 5.0, 5.0, 5.0, 0.0]);
}

#[test]
fn test_scenario_missing_chromosome() {
    let values = scenario_source()
        .values("chr2", 0, 4, Strand::Plus, false)
        .unwrap();
    assert_eq!(values.len(), 4);
    assert!(values.iter().all(|v| v.is_nan()));
}

#[test]
fn test_scenario_minus_reversed() {
    let values = scenario_source()
        .values("chr1", 5, 8, Strand::Minus, true)
        .unwrap();
    assert_eq!(values, vec![3.0, 2.0, 1.0]);
}

#[test]
fn test_unstranded_region_rejected() {
    let err = scenario_source()
        .values("chr1", 5, 8, Strand::Unstranded, false)
        .unwrap_err();
    assert!(matches!(err, DensityError::InvalidStrand { .. }));
}

#[test]
fn test_zero_mapped_reads() {
    let density = UnstrandedDensity::new(
        BedGraphTrack::default(),
        Some(AlignmentHandle::new("empty.bam", 0)),
    );
    assert!(matches!(density.pseudocount(), Err(DensityError::ZeroMappedReads)));
    assert!(matches!(density.rpm_to_raw(1.0), Err(DensityError::ZeroMappedReads)));
    assert_eq!(density.total_mapped().unwrap(), 0);
}

#[test]
fn test_evaluator_scenario() {
    let regions = vec![
        Region::new("chr1", 10, 16, Strand::Plus).unwrap(),
        Region::new("chr2", 0, 4, Strand::Plus).unwrap(),
        Region::new("chr1", 5, 8, Strand::Minus).unwrap(),
    ];
    let mut source = scenario_source();
    assert_eq!(source.pseudocount().unwrap(), 1.0);

    let result = RegionEvaluator::default().evaluate(&mut source, &regions).unwrap();
    let lines: Vec<_> = result.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
    assert_eq!(
        lines,
        vec![
            ("chr1:10-16:+", vec![0.0, 0.0, 5.0, 5.0, 5.0, 0.0]),
            ("chr2:0-4:+", vec![0.0; 4]),
            ("chr1:5-8:-", vec![3.0, 2.0, 1.0]),
        ]
    );
}
