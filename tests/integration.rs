use swc_engine::morph::metrics::SpineDensity;
use swc_engine::morph::node::NodeId;
use swc_engine::{DEFAULT_SOMA_EXCLUSION_MICRONS, Engine, EngineError, report, run_pipeline};

const NEURON_SWC: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/neuron.swc"
));
const NEURON_SPINES: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/neuron_spines.txt"
));

#[test]
fn engine_initializes() {
    let engine = Engine::new();
    assert!(engine.is_initialized());
}

#[test]
fn metrics_require_computation_first() {
    let mut engine = Engine::new();
    engine.load_swc(NEURON_SWC).expect("load swc");
    assert!(matches!(engine.metrics(), Err(EngineError::NotComputed)));
}

#[test]
fn sample_neuron_produces_two_branches_with_expected_metrics() {
    let output = run_pipeline(NEURON_SWC, NEURON_SPINES, DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect("pipeline");

    // Eén observatie verwijst naar het onbekende sample 99.
    assert_eq!(output.spine_report.attached, 4);
    assert_eq!(output.spine_report.unresolved, vec![99]);

    let records = &output.metrics;
    assert_eq!(records.len(), 2, "expected one branch per leaf");

    // Tak door het blad op 100 um: 7 -> 6 -> 5 -> 4, lengte 30.
    let long = &records[0];
    assert_eq!(long.start, NodeId::new(4));
    assert_eq!(long.end, NodeId::new(7));
    assert!((long.length - 30.0).abs() < 1e-9);
    assert_eq!(long.spine_count, 3);
    match long.density {
        SpineDensity::PerMicron(value) => assert!((value - 0.1).abs() < 1e-12),
        SpineDensity::Undefined => panic!("density should be defined"),
    }

    // Zijtak: 8 -> 5 -> 4, lengte 20; het gedeelde segment 5 -> 4
    // telt in beide takken mee.
    let short = &records[1];
    assert_eq!(short.start, NodeId::new(4));
    assert_eq!(short.end, NodeId::new(8));
    assert!((short.length - 20.0).abs() < 1e-9);
    assert_eq!(short.spine_count, 2);
}

#[test]
fn engine_stages_match_the_one_shot_pipeline() {
    let output = run_pipeline(NEURON_SWC, NEURON_SPINES, DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect("pipeline");

    let mut engine = Engine::new();
    engine.load_swc(NEURON_SWC).expect("load swc");
    let report = engine.attach_spines(NEURON_SPINES).expect("attach spines");
    assert_eq!(report.attached, 4);

    let records = engine
        .compute_metrics(DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect("compute metrics")
        .to_vec();
    assert_eq!(output.metrics, records);
    assert_eq!(engine.metrics().expect("metrics cached"), records.as_slice());
}

#[test]
fn csv_output_matches_the_fixed_format() {
    let output = run_pipeline(NEURON_SWC, NEURON_SPINES, DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect("pipeline");

    let mut buffer = Vec::new();
    report::write_csv(&mut buffer, &output.metrics).expect("write csv");
    let text = String::from_utf8(buffer).expect("utf-8");

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("START;END;LENGTH;SPINE_COUNT;SPINE_DENSITY")
    );
    assert_eq!(lines.next(), Some("Dendrite#4;Dendrite#7;30;3;0.1"));
    assert_eq!(lines.next(), Some("Dendrite#4;Dendrite#8;20;2;0.1"));
    assert_eq!(lines.next(), None);
}

#[test]
fn json_output_round_trips_through_serde() {
    let output = run_pipeline(NEURON_SWC, NEURON_SPINES, DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect("pipeline");
    let json = report::to_json(&output.metrics).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    let records = value.as_array().expect("array of records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["start"], 4);
    assert_eq!(records[0]["end"], 7);
    assert_eq!(records[0]["density"]["type"], "PerMicron");
}

#[test]
fn missing_soma_aborts_the_pipeline() {
    let swc = "1 3 0.0 0.0 0.0 1.0 -1\n2 3 0.0 0.0 70.0 1.0 1\n";
    let err = run_pipeline(swc, "HEADER\n", DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect_err("no soma present");
    assert!(matches!(err, EngineError::Filter(_)));
}

#[test]
fn duplicate_soma_aborts_the_pipeline() {
    let swc = "1 1 0.0 0.0 0.0 1.0 -1\n2 1 0.0 0.0 5.0 1.0 1\n";
    let err = run_pipeline(swc, "HEADER\n", DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect_err("two somata present");
    assert!(matches!(err, EngineError::Filter(_)));
}

#[test]
fn malformed_swc_row_aborts_the_pipeline() {
    let swc = "1 1 0.0 0.0 0.0 1.0 -1\n2 3 abc 0.0 70.0 1.0 1\n";
    let err = run_pipeline(swc, "HEADER\n", DEFAULT_SOMA_EXCLUSION_MICRONS)
        .expect_err("malformed row");
    assert!(matches!(err, EngineError::Parse(_)));
}

#[test]
fn zero_length_branch_reports_undefined_density() {
    // Het enige geldige sample staat alleen; zijn tak heeft lengte 0.
    let swc = "1 1 0.0 0.0 0.0 4.0 -1\n\
               2 3 0.0 0.0 50.0 1.0 1\n\
               3 3 0.0 0.0 70.0 1.0 2\n";
    let output =
        run_pipeline(swc, "HEADER\n", DEFAULT_SOMA_EXCLUSION_MICRONS).expect("pipeline");

    assert_eq!(output.metrics.len(), 1);
    let record = &output.metrics[0];
    assert_eq!(record.length, 0.0);
    assert_eq!(record.density, SpineDensity::Undefined);

    let mut buffer = Vec::new();
    report::write_csv(&mut buffer, &output.metrics).expect("write csv");
    let text = String::from_utf8(buffer).expect("utf-8");
    assert!(text.contains(";undefined"), "csv: {text}");
}

#[test]
fn straight_chain_lengths_add_up() {
    // Keten op de z-as met posities 0, 3, 7 en 7 (dubbel punt):
    // segmenten 3, 4 en 0, samen 7.
    let swc = "9 1 500.0 0.0 0.0 4.0 -1\n\
               1 3 0.0 0.0 0.0 1.0 -1\n\
               2 3 0.0 0.0 3.0 1.0 1\n\
               3 3 0.0 0.0 7.0 1.0 2\n\
               4 3 0.0 0.0 7.0 1.0 3\n";
    let output =
        run_pipeline(swc, "HEADER\n", DEFAULT_SOMA_EXCLUSION_MICRONS).expect("pipeline");

    assert_eq!(output.metrics.len(), 1);
    assert!((output.metrics[0].length - 7.0).abs() < 1e-12);
}

#[test]
fn reused_sample_id_with_back_reference_still_completes() {
    // Id 5 komt twee keer voor; de tweede rij verwijst naar sample 6,
    // dat zelf een kind van de eerste rij met id 5 is. De pipeline moet
    // de keten als eindige tak doorlopen.
    let swc = "1 1 1000.0 0.0 0.0 4.0 -1\n\
               2 3 0.0 0.0 0.0 1.0 -1\n\
               5 3 0.0 0.0 5.0 1.0 2\n\
               6 3 0.0 0.0 10.0 1.0 5\n\
               5 3 0.0 0.0 15.0 1.0 6\n";
    let output =
        run_pipeline(swc, "HEADER\n", DEFAULT_SOMA_EXCLUSION_MICRONS).expect("pipeline");

    assert_eq!(output.metrics.len(), 1);
    let record = &output.metrics[0];
    assert_eq!(record.start, NodeId::new(2));
    assert_eq!(record.end, NodeId::new(5));
    assert!((record.length - 15.0).abs() < 1e-9);
}

#[test]
fn threshold_is_a_strict_lower_bound_with_inclusive_boundary() {
    let swc = "1 1 0.0 0.0 0.0 4.0 -1\n\
               2 3 0.0 0.0 50.0 1.0 1\n\
               3 3 0.0 0.0 60.0 1.0 1\n\
               4 3 0.0 0.0 70.0 1.0 1\n";
    let output =
        run_pipeline(swc, "HEADER\n", DEFAULT_SOMA_EXCLUSION_MICRONS).expect("pipeline");

    let ends: Vec<NodeId> = output.metrics.iter().map(|r| r.end).collect();
    assert!(ends.contains(&NodeId::new(3)), "60 um ligt op de grens");
    assert!(ends.contains(&NodeId::new(4)));
    assert!(!ends.contains(&NodeId::new(2)), "50 um valt binnen de straal");
}
