//! Tests for command-line parsing and the evaluation runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use dmcompare::io::cli::{Cli, EvaluationRunner};
    use dmcompare::io::configuration::{
        DEFAULT_BILINEAR_PROGRAM, DEFAULT_RASTERIZER_PROGRAM, PADDING,
    };
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Tests CLI parsing with only the positional arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "bayer", "0.5"]);

        assert_eq!(cli.pattern, "bayer");
        assert!((cli.alpha - 0.5).abs() < f64::EPSILON);
        assert_eq!(cli.workdir, PathBuf::from("."));
        assert!(cli.bin_dir.is_none());
        assert!(cli.ghostscript.is_none());
        assert!(!cli.quiet);
        assert!(!cli.verbose);
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming long flags
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "RGGB",
            "1.25",
            "--workdir",
            "/tmp/run",
            "--bin-dir",
            "/opt/demosaic/bin",
            "--ghostscript",
            "gswin64c",
            "--quiet",
            "--verbose",
        ]);

        assert_eq!(cli.pattern, "RGGB");
        assert!((cli.alpha - 1.25).abs() < f64::EPSILON);
        assert_eq!(cli.workdir, PathBuf::from("/tmp/run"));
        assert_eq!(cli.bin_dir, Some(PathBuf::from("/opt/demosaic/bin")));
        assert_eq!(cli.ghostscript, Some(PathBuf::from("gswin64c")));
        assert!(cli.quiet);
        assert!(cli.verbose);
    }

    // Tests short flag parsing (-d, -b, -q, -v)
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["program", "bayer", "0.5", "-d", "out", "-b", "bin", "-q"]);

        assert_eq!(cli.workdir, PathBuf::from("out"));
        assert_eq!(cli.bin_dir, Some(PathBuf::from("bin")));
        assert!(cli.quiet);
    }

    // Tests that alpha may be negative without being read as a flag
    // Verified by removing allow_negative_numbers
    #[test]
    fn test_cli_negative_alpha() {
        let cli = Cli::parse_from(["program", "bayer", "-0.5"]);
        assert!((cli.alpha + 0.5).abs() < f64::EPSILON);
    }

    // Tests that both positional arguments are required
    // Verified by giving alpha a default value
    #[test]
    fn test_cli_requires_alpha() {
        assert!(Cli::try_parse_from(["program", "bayer"]).is_err());
        assert!(Cli::try_parse_from(["program", "bayer", "not-a-number"]).is_err());
    }

    // Tests progress display based on --quiet and --verbose
    // Verified by inverting flag logic
    #[test]
    fn test_should_show_progress() {
        assert!(Cli::parse_from(["program", "bayer", "0.5"]).should_show_progress());
        assert!(!Cli::parse_from(["program", "bayer", "0.5", "-q"]).should_show_progress());
        assert!(!Cli::parse_from(["program", "bayer", "0.5", "-v"]).should_show_progress());
    }

    // Tests configuration built from arguments
    // Verified by ignoring --bin-dir
    #[test]
    fn test_pipeline_config_from_args() {
        let cli = Cli::parse_from(["program", "bayer", "0.5", "--bin-dir", "/opt/bin"]);
        let config = cli.pipeline_config();

        assert_eq!(config.mosaic_pattern, "bayer");
        assert_eq!(config.padding, PADDING);
        assert_eq!(
            config.tools.bilinear,
            PathBuf::from("/opt/bin").join(DEFAULT_BILINEAR_PROGRAM)
        );
        assert_eq!(
            config.tools.rasterizer,
            PathBuf::from(DEFAULT_RASTERIZER_PROGRAM)
        );
    }

    // Tests converter override
    // Verified by dropping the --ghostscript mapping
    #[test]
    fn test_pipeline_config_ghostscript_override() {
        let cli = Cli::parse_from(["program", "bayer", "0.5", "--ghostscript", "/usr/local/bin/gs"]);
        let config = cli.pipeline_config();

        assert_eq!(config.tools.rasterizer, PathBuf::from("/usr/local/bin/gs"));
    }

    // Tests error for a missing working directory
    // Verified by creating the directory on demand
    #[test]
    fn test_process_missing_workdir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent");

        let cli = Cli::parse_from([
            "program",
            "bayer",
            "0.5",
            "-q",
            "-d",
            missing.to_str().unwrap(),
        ]);

        assert!(EvaluationRunner::new(cli).process().is_err());
    }

    // Tests error when the working directory has no input image
    // Verified by skipping the input load
    #[test]
    fn test_process_missing_input() {
        let temp_dir = TempDir::new().unwrap();

        let cli = Cli::parse_from([
            "program",
            "bayer",
            "0.5",
            "-q",
            "-d",
            temp_dir.path().to_str().unwrap(),
        ]);

        assert!(EvaluationRunner::new(cli).process().is_err());
    }

    // Tests that invalid configuration is rejected before any stage
    // Verified by skipping validation in the pipeline constructor
    #[test]
    fn test_process_rejects_non_finite_alpha() {
        let temp_dir = TempDir::new().unwrap();

        let cli = Cli::parse_from([
            "program",
            "bayer",
            "NaN",
            "-q",
            "-d",
            temp_dir.path().to_str().unwrap(),
        ]);

        let error = EvaluationRunner::new(cli).process().unwrap_err();
        assert!(error.to_string().contains("alpha"));
    }
}
