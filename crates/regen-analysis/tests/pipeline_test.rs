//! End-to-end pipeline tests.

use regen_core::{RawRecord, SurveyConfig};
use regen_analysis::{AnalysisInput, AnalysisPipeline};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn clearcut_cluster(number: &str, project_id: &str, trees: u32) -> RawRecord {
    let mut rec = RawRecord::from_pairs([
        ("unique_id", number),
        ("ClusterNumber", number),
        ("ProjectID", project_id),
        ("CreationDateTime", "2023-06-14T09:00:00"),
        ("Species1SpeciesNamePlot1", "Sw (spruce, white)"),
    ]);
    rec.set("Species1NumberofTreesPlot1", trees.to_string());
    rec
}

fn boundary(project_id: &str, planned: &str) -> RawRecord {
    RawRecord::from_pairs([("ProjectID", project_id), ("NumClusters", planned)])
}

fn survey_meta(project_id: &str) -> RawRecord {
    RawRecord::from_pairs([
        ("ProjectID", project_id),
        ("Date", "2023-06-30T12:00:00"),
        ("Surveyors", "B. Crew"),
    ])
}

#[test]
fn full_run_produces_all_outputs() {
    init_tracing();
    let pipeline = AnalysisPipeline::new(SurveyConfig::default()).unwrap();
    let input = AnalysisInput {
        clearcut: vec![
            clearcut_cluster("101", "Block 7", 3),
            clearcut_cluster("102", "Block 7", 5),
        ],
        shelterwood: vec![clearcut_cluster("201", "Block 8", 2)],
        boundaries: vec![boundary("Block 7", "2"), boundary("Block 8", "4")],
        survey_meta: vec![survey_meta("block 7")],
    };

    let result = pipeline.run(&input);

    // clusters in input order, clearcut first
    assert_eq!(result.clusters.len(), 3);
    assert_eq!(result.clusters[0].cluster_number, "101");
    assert_eq!(result.clusters[2].cluster_number, "201");

    // projects in boundary order
    assert_eq!(result.projects.len(), 2);
    assert_eq!(result.projects[0].project_id, "Block 7");
    assert_eq!(result.projects[0].clusters_surveyed, 2);
    assert_eq!(result.projects[0].completion.to_string(), "yes");
    // survey form id matched case-insensitively
    assert_eq!(result.projects[0].surveyors, "B. Crew");
    assert_eq!(result.projects[1].clusters_surveyed, 1);
    assert_eq!(result.projects[1].completion.to_string(), "no");

    // plot table row count: clusters x plots per cluster
    assert_eq!(result.plot_table.rows.len(), 3 * 8);
    assert_eq!(result.plot_table.species_columns, vec!["SW"]);

    // one report table per surveyed project, named after it
    assert_eq!(result.project_tables.len(), 2);
    assert_eq!(result.project_tables[0].name, "z_Block_7");
    assert_eq!(result.project_tables[0].rows.len(), 2);

    assert_eq!(result.diagnostics.clusters_analyzed, 3);
    assert_eq!(result.diagnostics.projects_analyzed, 2);
    assert_eq!(result.diagnostics.skipped_boundaries, 0);
    assert_eq!(result.diagnostics.clusters_without_project, 0);
}

#[test]
fn malformed_records_skipped_and_counted() {
    init_tracing();
    let pipeline = AnalysisPipeline::new(SurveyConfig::default()).unwrap();
    let input = AnalysisInput {
        clearcut: vec![clearcut_cluster("101", "Orphan", 1)],
        shelterwood: vec![],
        // missing ProjectID
        boundaries: vec![RawRecord::from_pairs([("NumClusters", "5")])],
        survey_meta: vec![RawRecord::from_pairs([("Date", "2023-06-30")])],
    };

    let result = pipeline.run(&input);
    assert_eq!(result.diagnostics.skipped_boundaries, 1);
    assert_eq!(result.diagnostics.skipped_meta, 1);
    assert_eq!(result.diagnostics.clusters_without_project, 1);
    assert!(result.projects.is_empty());
    // cluster summaries still produced for export
    assert_eq!(result.clusters.len(), 1);
}

#[test]
fn empty_run_is_empty_not_an_error() {
    let pipeline = AnalysisPipeline::new(SurveyConfig::default()).unwrap();
    let result = pipeline.run(&AnalysisInput::default());
    assert!(result.clusters.is_empty());
    assert!(result.projects.is_empty());
    assert!(result.plot_table.rows.is_empty());
    assert!(result.project_tables.is_empty());
    assert_eq!(result.diagnostics.to_string(), "analyzed 0 clusters across 0 projects (0 boundary and 0 survey records skipped, 0 clusters without a matching project)");
}

#[test]
fn invalid_config_rejected_at_construction() {
    let config = SurveyConfig {
        confidence_level: Some(2.0),
        ..Default::default()
    };
    assert!(AnalysisPipeline::new(config).is_err());
}

#[test]
fn report_rows_sorted_numeric_aware() {
    let pipeline = AnalysisPipeline::new(SurveyConfig::default()).unwrap();
    let input = AnalysisInput {
        clearcut: vec![
            clearcut_cluster("10", "P1", 1),
            clearcut_cluster("2", "P1", 1),
            clearcut_cluster("1a", "P1", 1),
        ],
        shelterwood: vec![],
        boundaries: vec![boundary("P1", "")],
        survey_meta: vec![],
    };
    let result = pipeline.run(&input);
    let numbers: Vec<&str> = result.project_tables[0]
        .rows
        .iter()
        .map(|r| r.cluster_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["2", "10", "1a"]);
}

#[test]
fn result_serializes_to_json() {
    let pipeline = AnalysisPipeline::new(SurveyConfig::default()).unwrap();
    let input = AnalysisInput {
        clearcut: vec![clearcut_cluster("101", "P1", 3)],
        shelterwood: vec![],
        boundaries: vec![boundary("P1", "1")],
        survey_meta: vec![survey_meta("P1")],
    };
    let result = pipeline.run(&input);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["projects"][0]["completion"], "yes");
    assert_eq!(json["projects"][0]["density_stats"]["n"], 1);
    assert!(json["projects"][0]["density_stats"]["stdev"].is_null());
}
