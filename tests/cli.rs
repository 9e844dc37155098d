mod aggregate_logs {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::{contains, starts_with};

    use std::fs;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "aggregate-logs";

    #[test]
    fn test_output__when_no_log_dir_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().failure().code(2).stderr(contains(
            "error: the following required arguments were not provided:\n  <LOG_DIR>",
        ));
        Ok(())
    }

    #[test]
    fn test_output__popularity_baseline() -> TestResult {
        let logs = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        fs::write(
            logs.path().join("CFPTest-Popularity-run1.log"),
            "INFO: loading data\nRPrecision: 0.42\nnDCG: 0.31\n",
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(logs.path())
            .arg("--output-dir")
            .arg(out.path())
            .arg("--no-config")
            .arg("--no-progress");

        cmd.assert().success().stdout(starts_with(
            "Scanned 1 file(s): 1 baseline run(s), 0 parameterized run(s), 0 skipped\n",
        ));
        assert_eq!(
            fs::read_to_string(out.path().join("popularity.tsv"))?,
            "ndcg\t0.31\nrprec\t0.42\n"
        );
        assert_eq!(
            fs::read_to_string(out.path().join("name.tsv"))?,
            "ndcg\t0.0\nrprec\t0.0\n"
        );
        assert_eq!(fs::read_to_string(out.path().join("sm_rprec.tsv"))?, "");
        Ok(())
    }

    #[test]
    fn test_output__parameter_tables_are_sorted() -> TestResult {
        let logs = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        for (parameter, score) in [(50, "0.25"), (5, "0.125"), (20, "0.5")] {
            fs::write(
                logs.path().join(format!("CFPTest-LFM-r1-f{parameter}.log")),
                format!("RPrecision: {score}\nnDCG: {score}\n"),
            )?;
        }
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(logs.path())
            .arg("-o")
            .arg(out.path())
            .arg("--no-config")
            .arg("--quiet");

        cmd.assert().success().stdout("");
        assert_eq!(
            fs::read_to_string(out.path().join("lfm_ndcg20.tsv"))?,
            "factor\tnDCG@20\n5\t0.125\n20\t0.5\n50\t0.25\n"
        );
        Ok(())
    }

    #[test]
    fn test_output__creates_output_dir() -> TestResult {
        let logs = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        let nested = out.path().join("tables").join("run1");
        fs::write(
            logs.path().join("CFPTest-UserCF-r1-b10.log"),
            "RPrecision: 0.2\nnDCG: 0.3\n",
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(logs.path())
            .arg("-o")
            .arg(&nested)
            .arg("--no-config")
            .arg("--quiet");

        cmd.assert().success();
        assert_eq!(fs::read_dir(&nested)?.count(), 20);
        Ok(())
    }

    #[test]
    fn test_output__when_log_misses_score() -> TestResult {
        let logs = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        fs::write(logs.path().join("CFPTest-SDM-r1-f5.log"), "RPrecision: 0.2\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(logs.path())
            .arg("-o")
            .arg(out.path())
            .arg("--no-config")
            .arg("--no-progress");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Error: "))
            .stderr(contains("nDCG:"));
        Ok(())
    }

    #[test]
    fn test_output__when_log_dir_missing() -> TestResult {
        let out = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(out.path().join("missing"))
            .arg("-o")
            .arg(out.path())
            .arg("--no-config");

        cmd.assert().failure().code(1).stderr(contains("Error: "));
        Ok(())
    }

    #[test]
    fn test_output__config_file_sets_output_dir() -> TestResult {
        let logs = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        let config_path = logs.path().join("eval.toml");
        fs::write(
            &config_path,
            format!(
                "output_dir = {:?}\nshow_progress = false\n",
                out.path().display().to_string()
            ),
        )?;
        fs::write(
            logs.path().join("CFPTest-Name-r2.log"),
            "RPrecision: 0.05\nnDCG: 0.07\n",
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(logs.path()).arg("--config").arg(&config_path);

        cmd.assert().success().stdout(contains("name.tsv (2 rows)"));
        assert_eq!(
            fs::read_to_string(out.path().join("name.tsv"))?,
            "ndcg\t0.07\nrprec\t0.05\n"
        );
        Ok(())
    }

    #[test]
    fn test_output__invalid_config_in_working_dir_warns() -> TestResult {
        let work = tempfile::tempdir()?;
        let logs = work.path().join("logs");
        fs::create_dir(&logs)?;
        fs::write(logs.join("CFPTest-Name-r2.log"), "RPrecision: 0.05\nnDCG: 0.07\n")?;
        fs::write(work.path().join(".recsys-eval.toml"), "output_dir = [")?;
        let out = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.current_dir(work.path())
            .env_remove("RUST_LOG")
            .arg(&logs)
            .arg("-o")
            .arg(out.path())
            .arg("--no-progress");

        cmd.assert()
            .success()
            .stderr(contains("Ignoring config file"))
            .stderr(contains("Invalid TOML"));
        assert!(out.path().join("name.tsv").exists());
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_invalid() -> TestResult {
        let logs = tempfile::tempdir()?;
        let config_path = logs.path().join("broken.toml");
        fs::write(&config_path, "output_dir = [")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.env_remove("RUST_LOG")
            .arg(logs.path())
            .arg("--config")
            .arg(&config_path);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Could not load configuration"))
            .stderr(contains("Error: "));
        Ok(())
    }

    #[test]
    fn test_output__rust_log_overrides_default_level() -> TestResult {
        let logs = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        fs::write(logs.path().join("CFPTest-Name-r2.log"), "RPrecision: 0.05\nnDCG: 0.07\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.env("RUST_LOG", "debug")
            .arg(logs.path())
            .arg("-o")
            .arg(out.path())
            .arg("--no-config")
            .arg("--no-progress");

        cmd.assert()
            .success()
            .stderr(contains("Logger initialized"));
        Ok(())
    }
}

mod compare_significance {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::contains;

    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "compare-significance";

    fn write_log(dir: &Path, name: &str, metric: &str, values: &[(u64, &str)]) -> std::io::Result<PathBuf> {
        let content: String = values
            .iter()
            .map(|(user, value)| format!("INFO: {metric} for user {user} is {value}\n"))
            .collect();
        let path = dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    #[test]
    fn test_output__single_identical_user_ind() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(dir.path(), "a.stderr", "RPrecision", &[(1, "0.5")])?;
        let second = write_log(dir.path(), "b.stderr", "RPrecision", &[(1, "0.5")])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(&second)
            .arg("RPrecision")
            .arg("ind")
            .arg("--no-config");

        cmd.assert().success().stdout("1.000000");
        Ok(())
    }

    #[test]
    fn test_output__identical_runs_paired() -> TestResult {
        let dir = tempfile::tempdir()?;
        let values = [(1, "0.5"), (2, "0.25"), (3, "0.75"), (4, "0.1")];
        let first = write_log(dir.path(), "a.stderr", "NDCG", &values)?;
        let second = write_log(dir.path(), "b.stderr", "NDCG", &values)?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(&second)
            .arg("NDCG")
            .arg("1samp")
            .arg("--no-config");

        cmd.assert().success().stdout("1.000000");
        Ok(())
    }

    #[test]
    fn test_output__ind_reference_value() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(dir.path(), "a.stderr", "Recall", &[(1, "1"), (2, "2"), (3, "3")])?;
        let second = write_log(dir.path(), "b.stderr", "Recall", &[(1, "2"), (2, "3"), (3, "4")])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(&second)
            .arg("Recall")
            .arg("ind")
            .arg("--no-config");

        cmd.assert().success().stdout("0.287864");
        Ok(())
    }

    #[test]
    fn test_output__json_format() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(dir.path(), "a.stderr", "Precision", &[(1, "0.5"), (2, "nan")])?;
        let second = write_log(dir.path(), "b.stderr", "Precision", &[(1, "0.5"), (2, "0.5")])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(&second)
            .arg("Precision")
            .arg("ind")
            .arg("--format")
            .arg("json")
            .arg("--no-config")
            .arg("--quiet");

        let output = cmd.assert().success().get_output().stdout.clone();
        let value: serde_json::Value = serde_json::from_slice(&output)?;
        assert_eq!(value["p_value"], 1.0);
        assert_eq!(value["dropped"], serde_json::json!([2]));
        assert_eq!(value["users_first"], 1);
        Ok(())
    }

    #[test]
    fn test_output__nan_values_warn() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(dir.path(), "a.stderr", "RNDCG", &[(1, "0.5"), (2, "nan")])?;
        let second = write_log(dir.path(), "b.stderr", "RNDCG", &[(1, "0.5"), (2, "0.4")])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(&second)
            .arg("RNDCG")
            .arg("1samp")
            .arg("--no-config");

        cmd.assert()
            .success()
            .stdout("1.000000")
            .stderr(contains("nan found"));
        Ok(())
    }

    #[test]
    fn test_output__inconsistent_users_warn() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(
            dir.path(),
            "a.stderr",
            "NDCG",
            &[(1, "0.5"), (2, "0.4"), (3, "0.3")],
        )?;
        let second = write_log(
            dir.path(),
            "b.stderr",
            "NDCG",
            &[(1, "0.5"), (2, "0.4"), (4, "0.3")],
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.env_remove("RUST_LOG")
            .arg(&first)
            .arg(&second)
            .arg("NDCG")
            .arg("ind")
            .arg("--no-config");

        cmd.assert()
            .success()
            .stdout("1.000000")
            .stderr(contains("keys not consistent"));
        Ok(())
    }

    #[test]
    fn test_output__when_invalid_test_type() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(dir.path(), "a.stderr", "NDCG", &[(1, "0.5")])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(&first)
            .arg("NDCG")
            .arg("2samp")
            .arg("--no-config");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("test type is limited to one of ind/1samp"));
        Ok(())
    }

    #[test]
    fn test_output__when_invalid_metric() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(dir.path(), "a.stderr", "NDCG", &[(1, "0.5")])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(&first)
            .arg("MAP")
            .arg("ind")
            .arg("--no-config");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("metric name is limited to one of"));
        Ok(())
    }

    #[test]
    fn test_output__when_file_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = write_log(dir.path(), "a.stderr", "NDCG", &[(1, "0.5")])?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&first)
            .arg(dir.path().join("missing.stderr"))
            .arg("NDCG")
            .arg("ind")
            .arg("--no-config");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Error: "))
            .stderr(contains("missing.stderr"));
        Ok(())
    }

    #[test]
    fn test_output__when_wrong_arity() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("a.stderr").arg("b.stderr").arg("NDCG");

        cmd.assert().failure().code(2);
        Ok(())
    }
}
