//! Classifier Benchmarks
//!
//! The classifier runs on every form change, so a full verdict must stay cheap.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hdp_core::{
    average_blood_pressure, BloodPressureMeasurement, Classifier, ClinicalRecord, FetalAssessment,
    LabPanel, Protocol, RecordBuilder, Symptoms,
};

fn minimal_record() -> ClinicalRecord {
    RecordBuilder::new()
        .gestational_age(30, 0)
        .blood_pressure(Some(135.0), Some(85.0))
        .build()
        .unwrap()
}

fn full_record() -> ClinicalRecord {
    RecordBuilder::new()
        .gestational_age(32, 4)
        .blood_pressure(Some(162.0), Some(104.0))
        .blood_pressure(Some(158.0), Some(108.0))
        .labs(LabPanel {
            platelets: Some(92.0),
            ast: Some(130.0),
            alt: Some(95.0),
            creatinine: Some(1.2),
            ldh: Some(640.0),
            protein_creatinine_ratio: Some(1.4),
            sflt1: Some(9800.0),
            plgf: Some(14.0),
            ..LabPanel::default()
        })
        .symptoms(Symptoms {
            severe_headache: true,
            epigastric_pain: true,
            ..Symptoms::default()
        })
        .fetal(FetalAssessment {
            weight_percentile: Some(4.0),
            ..FetalAssessment::default()
        })
        .build()
        .unwrap()
}

// ============================================================================
// Classification
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let classifier = Classifier::default();
    let minimal = minimal_record();
    let full = full_record();

    let mut group = c.benchmark_group("classify");

    group.bench_function("minimal_record", |b| {
        b.iter(|| classifier.classify(black_box(&minimal)))
    });

    group.bench_function("full_record", |b| {
        b.iter(|| classifier.classify(black_box(&full)))
    });

    group.finish();
}

// ============================================================================
// Edges: builder and protocol loading
// ============================================================================

fn bench_edges(c: &mut Criterion) {
    let readings: Vec<BloodPressureMeasurement> = (0..6)
        .map(|i| BloodPressureMeasurement::new(Some(140.0 + i as f64), Some(90.0 + i as f64)))
        .collect();
    let protocol_json = Protocol::default().to_json().unwrap();

    let mut group = c.benchmark_group("edges");

    group.bench_function("average_6_readings", |b| {
        b.iter(|| average_blood_pressure(black_box(&readings)))
    });

    group.bench_function("protocol_from_json", |b| {
        b.iter(|| Protocol::from_json(black_box(&protocol_json)))
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_edges);
criterion_main!(benches);
