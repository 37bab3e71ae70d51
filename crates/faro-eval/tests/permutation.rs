//! Reports do not depend on the order companies or quarters are pooled in.

use faro_core::{CompanySeries, QuarterlyRecord};
use faro_eval::{CorrelationOptions, correlate, pool};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

fn universe(rng: &mut StdRng) -> Vec<CompanySeries> {
    (0..12)
        .map(|c| {
            let data = (0..20)
                .map(|q| {
                    let mut record = QuarterlyRecord::new(format!("2020Q{q}"));
                    // Coarse rounding produces ties on both sides.
                    record.roa = (q % 7 != 3).then(|| (rng.gen_range(-5.0..15.0_f64) * 10.0).round() / 1000.0);
                    let forward = (q % 5 != 4).then(|| rng.gen_range(-40.0..60.0_f64).round());
                    record.forward_returns.insert("forward_return", forward);
                    record
                })
                .collect();
            CompanySeries::new(format!("C{c:02}"), "", data)
        })
        .collect()
}

#[test]
fn test_report_is_identical_under_permutation() {
    let mut rng = StdRng::seed_from_u64(7);
    let companies = universe(&mut rng);
    let options = CorrelationOptions::default().with_ranks(true);

    let baseline = correlate(&pool(&companies, "roa", "forward_return").unwrap(), &options).unwrap();
    assert!(baseline.is_ok());
    assert!(baseline.n_pairs > 100);

    for _ in 0..5 {
        let mut shuffled = companies.clone();
        shuffled.shuffle(&mut rng);
        for company in &mut shuffled {
            company.data.shuffle(&mut rng);
        }

        let report = correlate(&pool(&shuffled, "roa", "forward_return").unwrap(), &options).unwrap();
        assert_eq!(report, baseline);
    }
}

#[test]
fn test_rank_pearson_agrees_with_spearman_on_tied_data() {
    let mut rng = StdRng::seed_from_u64(11);
    let companies = universe(&mut rng);
    let report = correlate(
        &pool(&companies, "roa", "forward_return").unwrap(),
        &CorrelationOptions::default(),
    )
    .unwrap();

    let rank = report.rank_pearson_correlation.unwrap();
    let spearman = report.spearman_correlation.unwrap();
    assert!((rank - spearman).abs() < 1e-9);
}
