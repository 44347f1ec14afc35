//! # Integration Tests
//!
//! Integration and end-to-end tests.
//!
//! Covers:
//! - Contract smoke tests
//! - Mock e2e tests (no archive on disk)
//! - Archive-backed e2e tests against a temporary directory

#[cfg(test)]
mod contract_tests {
    use contracts::{HopId, PROCESSED_COLUMNS};

    #[test]
    fn test_contracts_compile() {
        let id = HopId::new("Atlas", 5);
        assert_eq!(id.to_string(), "Atlas hop 5");
        assert_eq!(PROCESSED_COLUMNS.len(), 6);
    }
}

#[cfg(test)]
mod geometry_tests {
    use contracts::{LandmarkFrame, Point3};
    use hop_engine::compute_angles;

    /// Hand-checked landmark configuration:
    /// - elbow triangle pt4-pt5-pt6 forms a right angle at pt5
    /// - pt2 coincides with pt4, so the translated wrist lands on pt5
    ///   and the protraction triangle is a straight line through pt2
    /// - the translated depression triangle forms a right angle at pt3
    #[test]
    fn test_golden_angles() {
        let frame = LandmarkFrame::from_points([
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);

        let angles = compute_angles(&frame);
        assert!((angles.elbow_flex_ext.unwrap() - 90.0).abs() < 1e-9);
        assert!(angles.humeral_pro_ret.unwrap().abs() < 1e-9);
        assert!((angles.humeral_dep_ele.unwrap() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_landmark_yields_missing_angles() {
        let mut frame = LandmarkFrame::from_points([Point3::new(1.0, 2.0, 3.0); 6]);
        frame.points[4] = None;

        let angles = compute_angles(&frame);
        assert!(!angles.is_complete());
        assert_eq!(angles.elbow_flex_ext, None);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use contracts::{HopId, ProcessedHop, SightLabel, SinkConfig, SinkType};
    use dispatcher::create_dispatcher;
    use hop_engine::{process_batch, BatchStats, HopPipeline};
    use ingestion::MockHopStore;
    use tokio::sync::mpsc;

    fn mock_pipeline() -> Arc<HopPipeline<MockHopStore>> {
        Arc::new(HopPipeline::new(
            Arc::new(MockHopStore::default()),
            Default::default(),
            Default::default(),
        ))
    }

    /// End-to-end test: MockHopStore -> HopPipeline -> Dispatcher
    ///
    /// Verifies the complete data flow:
    /// 1. MockHopStore serves synthetic recordings
    /// 2. HopPipeline produces aligned, normalized tables
    /// 3. Dispatcher fans ProcessedHop out to sinks
    #[tokio::test]
    async fn test_e2e_mock_pipeline() {
        let pipeline = mock_pipeline();
        let ids: Vec<HopId> = (1..=3).map(|hop| HopId::new("Atlas", hop)).collect();

        let outcomes = process_batch(pipeline, ids, 2).await;
        let stats = BatchStats::from_outcomes(&outcomes);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.succeeded, 3);
        assert_eq!(stats.failed, 0);

        // The synthetic recording has a 300..900 ms window on the
        // 0.002 s grid (301 frames, 61 on the aligned grid) and a
        // force ramp starting at sample 60.
        for outcome in &outcomes {
            let hop = outcome.result.as_ref().unwrap();
            assert_eq!(hop.meta.contact_index, Some(60));
            assert_eq!(hop.meta.kinematic_window_frames, 301);
            assert_eq!(hop.len(), 61);
            assert_eq!(hop.sight, SightLabel::Sighted);
        }

        // Feed the results through a dispatcher with a log sink
        let (hop_tx, hop_rx) = mpsc::channel::<ProcessedHop>(100);
        let sink_configs = vec![SinkConfig {
            name: "test_log".to_string(),
            sink_type: SinkType::Log,
            queue_capacity: 50,
            params: HashMap::new(),
        }];

        let dispatcher = create_dispatcher(sink_configs, hop_rx).unwrap();
        let dispatcher_handle = dispatcher.spawn();

        for outcome in outcomes {
            hop_tx.send(outcome.result.unwrap()).await.unwrap();
        }
        drop(hop_tx);

        let result =
            tokio::time::timeout(std::time::Duration::from_secs(2), dispatcher_handle).await;
        assert!(result.is_ok(), "Dispatcher failed to shut down");
    }

    /// One hop with missing tables never aborts the rest of the batch.
    #[tokio::test]
    async fn test_batch_failure_isolation() {
        let absent = HopId::new("Atlas", 3);
        let store = MockHopStore::default().with_absent_hop(absent.clone());
        let pipeline = Arc::new(HopPipeline::new(
            Arc::new(store),
            Default::default(),
            Default::default(),
        ));

        let ids: Vec<HopId> = (1..=5).map(|hop| HopId::new("Atlas", hop)).collect();
        let outcomes = process_batch(pipeline, ids, 4).await;

        let stats = BatchStats::from_outcomes(&outcomes);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.succeeded, 4);
        assert_eq!(stats.failed, 1);

        let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failed[0].id, absent);
    }

    /// Normalization holds per event: every channel of every processed
    /// hop has zero mean.
    #[tokio::test]
    async fn test_processed_channels_are_normalized() {
        let pipeline = mock_pipeline();
        let outcomes = process_batch(pipeline, vec![HopId::new("Zeus", 1)], 1).await;
        let hop = outcomes[0].result.as_ref().unwrap();

        for channel in 0..6 {
            let mean: f64 = hop.rows.iter().map(|r| r.channels()[channel]).sum::<f64>()
                / hop.len() as f64;
            assert!(
                mean.abs() < 1e-9,
                "channel {} mean {} not centered",
                channel,
                mean
            );
        }
    }
}

#[cfg(test)]
mod archive_tests {
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Arc;

    use contracts::{HopId, ProcessedHop, SightLabel, SinkConfig, SinkType};
    use dispatcher::create_dispatcher;
    use hop_engine::HopPipeline;
    use ingestion::CsvHopStore;
    use tokio::sync::mpsc;

    fn xyz_content(frames: usize) -> String {
        let mut cols = Vec::new();
        for point in 1..=6 {
            for axis in ["X", "Y", "Z"] {
                cols.push(format!("pt{point}_{axis}"));
            }
        }
        let mut out = cols.join(",");
        out.push('\n');
        for frame in 0..frames {
            // Six well-separated drifting points
            let t = frame as f64 * 0.01;
            let points = [
                (t, 0.0, 0.0),
                (1.0 + t, 0.5, 0.2),
                (1.5 + t, -0.5, 0.1),
                (2.0 + t, 0.0, 0.3),
                (3.0 + t, 0.4, 0.5),
                (4.0 + t, -0.2, 0.2),
            ];
            let row: Vec<String> = points
                .iter()
                .flat_map(|(x, y, z)| [x.to_string(), y.to_string(), z.to_string()])
                .collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    fn build_archive(dir: &tempfile::TempDir) {
        let hop_dir = dir.path().join("Atlas").join("5");
        fs::create_dir_all(&hop_dir).unwrap();
        fs::write(hop_dir.join("xyz.csv"), xyz_content(40)).unwrap();

        // Flat force trace: no sustained rise, aligner falls back to
        // the start of the series
        let force: String = (0..12).map(|_| "0.1,0.2,0.3\n").collect();
        fs::write(hop_dir.join("force.csv"), force).unwrap();

        fs::write(
            dir.path().join("Atlas").join("time.csv"),
            "Hop,Onset,First Touch,Recovery\n5,10.0,20.0,60.0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("data.csv"),
            "ID,Hop,Hop Phase,Sight\nAtlas,5,Landing,Blind\n",
        )
        .unwrap();
    }

    /// Archive on disk -> CsvHopStore -> HopPipeline -> CSV sink.
    #[tokio::test]
    async fn test_archive_to_csv_sink() {
        let archive = tempfile::tempdir().unwrap();
        build_archive(&archive);
        let output = tempfile::tempdir().unwrap();

        let store = CsvHopStore::open(archive.path()).unwrap();
        let pipeline = HopPipeline::new(Arc::new(store), Default::default(), Default::default());

        let id = HopId::new("Atlas", 5);
        let hop = pipeline.process(&id).unwrap();

        // 20..60 ms window: frames 10..=30 (21 frames), stride 5
        // keeps rows at frames 10, 15, 20, 25, 30. The flat force
        // trace yields 6 aligned samples, so 5 rows survive.
        assert_eq!(hop.meta.contact_index, None);
        assert_eq!(hop.meta.kinematic_window_frames, 21);
        assert_eq!(hop.len(), 5);
        assert_eq!(hop.sight, SightLabel::Blind);

        // Dispatch to a CSV sink and verify the written table
        let (hop_tx, hop_rx) = mpsc::channel::<ProcessedHop>(10);
        let mut params = HashMap::new();
        params.insert(
            "base_path".to_string(),
            output.path().to_string_lossy().into_owned(),
        );
        let sink_configs = vec![SinkConfig {
            name: "csv_out".to_string(),
            sink_type: SinkType::Csv,
            queue_capacity: 10,
            params,
        }];

        let dispatcher = create_dispatcher(sink_configs, hop_rx).unwrap();
        let dispatcher_handle = dispatcher.spawn();

        hop_tx.send(hop).await.unwrap();
        drop(hop_tx);
        tokio::time::timeout(std::time::Duration::from_secs(2), dispatcher_handle)
            .await
            .unwrap()
            .unwrap();

        let table = fs::read_to_string(output.path().join("Atlas_5.csv")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6, "header plus five rows");
        assert!(lines[0].starts_with("Index,Elbow flexion/extension"));

        let sidecar: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(output.path().join("Atlas_5.meta.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["subject"], "Atlas");
        assert_eq!(sidecar["hop"], 5);
        assert_eq!(sidecar["sight"], "Blind");
    }

    /// Config file -> blueprint -> archive-backed run.
    #[tokio::test]
    async fn test_config_driven_run() {
        let archive = tempfile::tempdir().unwrap();
        build_archive(&archive);

        let config = format!(
            r#"
[data]
root = "{}"

[[subjects]]
name = "Atlas"
hops = [5]

[[sinks]]
name = "log_sink"
sink_type = "log"
"#,
            archive.path().display()
        );

        let blueprint =
            config_loader::ConfigLoader::load_from_str(&config, config_loader::ConfigFormat::Toml)
                .unwrap();
        assert_eq!(blueprint.hop_ids(), vec![HopId::new("Atlas", 5)]);

        let store = CsvHopStore::open(blueprint.data.root.clone()).unwrap();
        let pipeline = Arc::new(HopPipeline::new(
            Arc::new(store),
            blueprint.grid,
            blueprint.contact,
        ));

        let outcomes = hop_engine::process_batch(pipeline, blueprint.hop_ids(), 1).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_ok());
    }
}
