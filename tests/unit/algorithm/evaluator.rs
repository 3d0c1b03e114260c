//! Tests for batch region evaluation, verdicts and summaries

#[cfg(test)]
mod tests {
    use polypack::algorithm::evaluator::{
        EvaluationSummary, EvaluatorConfig, RegionEvaluator, RegionReport, Verdict,
    };
    use polypack::algorithm::feasibility::Infeasibility;
    use polypack::spatial::{Region, Shape, ShapeCatalog};
    use std::sync::Mutex;
    use std::time::Duration;

    fn catalog() -> ShapeCatalog {
        ShapeCatalog::new(vec![
            Shape::from_rows(0, &["#"]).unwrap(),
            Shape::from_rows(1, &["##", "##"]).unwrap(),
        ])
    }

    fn regions() -> Vec<Region> {
        vec![
            Region::new(2, 2, vec![0, 1]),
            Region::new(3, 3, vec![0, 2]),
            Region::new(1, 1, vec![2, 0]),
            Region::new(4, 2, vec![0, 2]),
        ]
    }

    fn sequential() -> EvaluatorConfig {
        EvaluatorConfig {
            timeout: None,
            max_depth: 100,
            jobs: 1,
        }
    }

    // Tests defaults match the documented budget and depth
    // Verified by changing the default timeout
    #[test]
    fn test_default_config() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.max_depth, 1000);
        assert_eq!(config.jobs, 0);
    }

    // Tests single-region verdicts for each search outcome
    // Verified by mapping exhausted searches to solvable
    #[test]
    fn test_evaluate_region_verdicts() {
        let catalog = catalog();
        let evaluator = RegionEvaluator::new(&catalog, sequential());
        let regions = regions();

        let solved = evaluator.evaluate_region(0, &regions[0]);
        assert_eq!(solved.verdict, Verdict::Solvable);
        assert_eq!((solved.width, solved.height), (2, 2));

        let blocked = evaluator.evaluate_region(1, &regions[1]);
        assert_eq!(blocked.verdict, Verdict::NotSolvable);
        assert!(blocked.nodes > 0);

        let overfull = evaluator.evaluate_region(2, &regions[2]);
        assert_eq!(
            overfull.verdict,
            Verdict::Infeasible(Infeasibility::AreaExceeded {
                required: 2,
                available: 1
            })
        );
        assert_eq!(overfull.nodes, 0);
    }

    // Tests batch counting and input-order reports
    // Verified by counting every finished region as solvable
    #[test]
    fn test_evaluate_batch() {
        let catalog = catalog();
        let evaluator = RegionEvaluator::new(&catalog, sequential());

        let summary = evaluator.evaluate(&regions(), |_| {}).unwrap();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.solvable_count(), 2);
        assert_eq!(summary.timed_out_count(), 0);

        let indices: Vec<usize> = summary.reports.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    // The callback sees every region exactly once, also in parallel
    // Verified by skipping the callback for unsolvable regions
    #[test]
    fn test_callback_per_region() {
        let catalog = catalog();
        let config = EvaluatorConfig {
            jobs: 4,
            ..sequential()
        };
        let evaluator = RegionEvaluator::new(&catalog, config);
        let seen = Mutex::new(Vec::new());

        let summary = evaluator
            .evaluate(&regions(), |report| {
                seen.lock().unwrap().push(report.index);
            })
            .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(summary.solvable_count(), 2);
        assert_eq!(evaluator.count_solvable(&regions()).unwrap(), 2);
    }

    // A zero budget classifies long searches as timed out, never solvable
    // Verified by treating timed out searches as solvable
    #[test]
    fn test_zero_budget_times_out() {
        let grids: [[&str; 3]; 6] = [
            ["###", "##.", "##."],
            ["###", "##.", ".##"],
            [".##", "###", "##."],
            ["##.", "###", "##."],
            ["###", "#..", "###"],
            ["###", ".#.", "###"],
        ];
        let catalog = ShapeCatalog::new(
            grids
                .iter()
                .enumerate()
                .map(|(index, grid)| Shape::from_rows(index, grid).unwrap())
                .collect(),
        );
        let config = EvaluatorConfig {
            timeout: Some(Duration::ZERO),
            ..sequential()
        };
        let evaluator = RegionEvaluator::new(&catalog, config);

        let report = evaluator.evaluate_region(0, &Region::new(12, 5, vec![1, 0, 1, 0, 3, 2]));
        assert_eq!(report.verdict, Verdict::TimedOut);
        assert!(!report.verdict.is_solvable());
    }

    // A tiny budget bounds the time spent on a huge board
    // Verified by building every placement of the board before searching
    #[test]
    fn test_large_board_within_budget() {
        let catalog = catalog();
        let config = EvaluatorConfig {
            timeout: Some(Duration::from_millis(10)),
            ..sequential()
        };
        let evaluator = RegionEvaluator::new(&catalog, config);

        let easy = evaluator.evaluate_region(0, &Region::new(1500, 1500, vec![3, 3]));
        assert_eq!(easy.verdict, Verdict::Solvable);
        assert!(easy.elapsed < Duration::from_secs(5));

        // 250001 squares fit by area but at most 250000 fit on the board
        let hopeless = evaluator.evaluate_region(1, &Region::new(1001, 1001, vec![0, 250_001]));
        assert_eq!(hopeless.verdict, Verdict::TimedOut);
        assert!(hopeless.elapsed < Duration::from_secs(5));
    }

    // Overflowing regions become verdicts rather than panics
    // Verified by multiplying counts by sizes unchecked
    #[test]
    fn test_overflowing_regions_not_solvable() {
        let catalog = catalog();
        let evaluator = RegionEvaluator::new(&catalog, sequential());

        let greedy = evaluator.evaluate_region(0, &Region::new(3, 3, vec![0, usize::MAX]));
        assert_eq!(
            greedy.verdict,
            Verdict::Infeasible(Infeasibility::AreaExceeded {
                required: usize::MAX,
                available: 9
            })
        );

        let huge = evaluator.evaluate_region(1, &Region::new(usize::MAX, 2, vec![1, 0]));
        assert_eq!(
            huge.verdict,
            Verdict::Infeasible(Infeasibility::BoardTooLarge {
                width: usize::MAX,
                height: 2
            })
        );
    }

    // Tests verdict labels and the report line
    // Verified by dropping the dimensions from the report line
    #[test]
    fn test_report_display() {
        let report = RegionReport {
            index: 2,
            width: 12,
            height: 5,
            verdict: Verdict::Solvable,
            elapsed: Duration::from_millis(250),
            nodes: 10,
        };
        assert_eq!(report.to_string(), "Region 3: SOLVABLE (12x5, 0.25s)");
        assert_eq!(Verdict::NotSolvable.to_string(), "NOT solvable");
        assert_eq!(Verdict::TimedOut.to_string(), "NOT solvable (timed out)");
    }

    // Tests average time handles empty and non-empty batches
    // Verified by dividing by the solvable count
    #[test]
    fn test_summary_average() {
        let empty = EvaluationSummary::default();
        assert_eq!(empty.average_time(), Duration::ZERO);

        let catalog = catalog();
        let evaluator = RegionEvaluator::new(&catalog, sequential());
        let mut summary = evaluator.evaluate(&regions(), |_| {}).unwrap();
        summary.elapsed = Duration::from_secs(8);
        assert_eq!(summary.average_time(), Duration::from_secs(2));
    }
}
