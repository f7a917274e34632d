//! Test helpers shared by the integration tests

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A trimmed copy of the refractiveindex.info `catalog-nk.yml` layout
pub const SAMPLE_CATALOG: &str = r#"# refractiveindex.info database catalog
- SHELF: main
  name: "MAIN - simple inorganic materials"
  content:
    - DIVIDER: "Ag - Silver"
    - BOOK: Ag
      name: "Ag (Silver)"
      content:
        - DIVIDER: "Experimental data: bulk, thick film"
        - PAGE: Johnson
          name: "Johnson and Christy 1972: n,k 0.188–1.94 µm"
        - PAGE: Hagemann
          name: "Hagemann et al. 1974: n,k 0.0000248–248 µm"
        - PAGE: Yang
          name: "Yang et al. 2015: n,k 0.27–24.9 µm"
        - DIVIDER: "Experimental data: thin film"
        - PAGE: Wu
          name: "Wu et al. 2014: n,k 0.3–2 µm"
          info: "thickness 40 nm"
        - PAGE: Babar
          name: "Babar and Weaver: n,k 0.207–12.4 µm"
    - DIVIDER: "Al - Aluminium"
    - BOOK: Al
      name: "Al (Aluminium)"
      content:
        - PAGE: Rakic
          name: "Rakić 1995: n,k 0.0000248–200 µm"
        - PAGE: Cheng
          name: "Cheng et al. 2016: n,k 0.2–1.2 µm"
        - PAGE: McPeak
          name: "McPeak et al. 2015: n,k 0.4–1 µm"
- SHELF: organic
  name: "ORGANIC - organic materials"
  content:
    - BOOK: C6H6
      name: "C6H6 (Benzene)"
      content:
        - PAGE: Moutzouris
          name: "Moutzouris et al. 2013: n 0.45–1.55 µm"
        - PAGE: Rheims
          name: "Rheims et al. 1997: n 0.44–1.06 µm"
"#;

/// Write the sample catalog into `dir` and return its path
pub fn write_sample_catalog(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("catalog-nk.yml");
    fs::write(&path, SAMPLE_CATALOG)?;
    Ok(path)
}
