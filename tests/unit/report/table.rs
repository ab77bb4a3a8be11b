//! Tests for the comparison table

#[cfg(test)]
mod tests {
    use dmcompare::PipelineError;
    use dmcompare::pipeline::artifacts::{Artifact, ArtifactStore, Method};
    use dmcompare::report::table::{HEADERS, Report};
    use tempfile::TempDir;

    fn populated_store() -> (TempDir, ArtifactStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        store.write(Artifact::MseBilinear, "25.13\n").unwrap();
        store.write(Artifact::MseContourStencil, "7.00\n").unwrap();
        store
            .write(Artifact::StdoutBilinear, "CPU Time: 0.01 s\n")
            .unwrap();
        store
            .write(
                Artifact::StdoutContourStencil,
                "alpha = 0.5\nCPU Time: 0.25 s\n",
            )
            .unwrap();
        (temp_dir, store)
    }

    // Tests rows are read in fixed order
    // Verified by iterating methods in reverse
    #[test]
    fn test_from_store_row_order() {
        let (_dir, store) = populated_store();
        let report = Report::from_store(&store).unwrap();

        let methods: Vec<Method> = report.rows().iter().map(|row| row.method).collect();
        assert_eq!(methods, [Method::Bilinear, Method::ContourStencil]);

        let bilinear = &report.rows()[0];
        assert!((bilinear.mse - 25.13).abs() < 1e-9);
        assert_eq!(bilinear.cpu_time, "0.01 s");
        assert_eq!(report.rows()[1].cpu_time, "0.25 s");
    }

    // Tests rendered layout and alignment
    // Verified by left-aligning the numeric column
    #[test]
    fn test_render_alignment() {
        let (_dir, store) = populated_store();
        let rendered = Report::from_store(&store).unwrap().render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        let header = lines[0];
        assert!(header.starts_with(HEADERS[0]));
        assert!(header.contains(HEADERS[1]));
        assert!(header.ends_with(HEADERS[2]));
        assert!(lines[1].chars().all(|ch| ch == '-' || ch == ' '));
        assert!(lines[2].starts_with("Bilinear demosaicking"));
        assert!(lines[3].starts_with("Contour stencils demosaicking"));

        // Numeric column is right-aligned under its header
        let mse_end = header.find(HEADERS[1]).unwrap() + HEADERS[1].len();
        assert_eq!(lines[2].find("25.13").unwrap() + "25.13".len(), mse_end);
        assert_eq!(lines[3].find("7.00").unwrap() + "7.00".len(), mse_end);

        // Text columns are left-aligned under their headers
        let cpu_start = header.find(HEADERS[2]).unwrap();
        assert_eq!(lines[2].find("0.01 s").unwrap(), cpu_start);
        assert_eq!(lines[3].find("0.25 s").unwrap(), cpu_start);
    }

    // Tests a CPU time column of bare numbers is right-aligned
    // Verified by always left-aligning the CPU time column
    #[test]
    fn test_render_numeric_cpu_time() {
        let (_dir, store) = populated_store();
        store
            .write(Artifact::StdoutBilinear, "CPU Time: 0.125\n")
            .unwrap();
        store
            .write(Artifact::StdoutContourStencil, "CPU Time: 12.5\n")
            .unwrap();
        let rendered = Report::from_store(&store).unwrap().render();
        let lines: Vec<&str> = rendered.lines().collect();

        let header = lines[0];
        assert!(header.ends_with(HEADERS[2]));
        assert!(lines[2].ends_with("  0.125"));
        assert!(lines[3].ends_with("  12.5"));
        assert_eq!(lines[2].len(), header.len());
        assert_eq!(lines[3].len(), header.len());
    }

    // Tests the table artifact is written
    // Verified by skipping the write
    #[test]
    fn test_persist() {
        let (_dir, store) = populated_store();
        let report = Report::from_store(&store).unwrap();

        report.persist(&store).unwrap();
        assert_eq!(store.read_text(Artifact::Report).unwrap(), report.render());
    }

    // Tests missing CPU time marker is fatal
    // Verified by substituting a placeholder
    #[test]
    fn test_missing_cpu_time_is_fatal() {
        let (_dir, store) = populated_store();
        store
            .write(Artifact::StdoutContourStencil, "finished\n")
            .unwrap();

        assert!(matches!(
            Report::from_store(&store),
            Err(PipelineError::Parse { what: "CPU time", .. })
        ));
    }

    // Tests missing metric file is fatal
    // Verified by defaulting missing values to zero
    #[test]
    fn test_missing_mse_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();

        assert!(matches!(
            Report::from_store(&store),
            Err(PipelineError::FileSystem { .. })
        ));
    }
}
