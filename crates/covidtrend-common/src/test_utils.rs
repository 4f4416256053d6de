//! Test utilities and shared fixtures for covidtrend.
//!
//! Available to other crates through the `testing` feature.

use std::path::Path;
use std::sync::Once;

use crate::Case;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Date headers used by [`sample_csv`].
pub const SAMPLE_DATES: [&str; 10] = [
    "1/22/20", "1/23/20", "1/24/20", "1/25/20", "1/26/20", "1/27/20", "1/28/20", "1/29/20",
    "1/30/20", "1/31/20",
];

/// A small time-series table in the CSSE layout.
///
/// China has two provinces so a country-level lookup is ambiguous, and France
/// keeps its mainland row under `Province/State` next to an overseas territory.
pub fn sample_csv() -> String {
    let rows = [
        "Hubei,China,30.9756,112.2707,444,444,549,761,1058,1423,3554,3554,4903,5806",
        "Beijing,China,40.1824,116.4142,14,22,36,41,68,80,91,111,114,139",
        ",Italy,43.0,12.0,0,0,0,0,0,0,0,0,0,2",
        ",Spain,40.0,-4.0,0,0,0,0,0,0,0,0,0,0",
        ",Germany,51.0,9.0,0,0,0,0,0,1,4,4,4,5",
        ",Morocco,31.7917,-7.0926,0,0,0,0,0,0,0,0,0,0",
        ",Tunisia,33.8869,9.5375,0,0,0,0,0,0,0,0,0,0",
        "France,France,46.2276,2.2137,0,0,2,3,3,3,4,5,5,5",
        "French Guiana,France,3.9339,-53.1258,0,0,0,0,0,0,0,0,0,0",
    ];
    let mut csv = format!("Province/State,Country/Region,Lat,Long,{}\n", SAMPLE_DATES.join(","));
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

/// Number of data rows in [`sample_csv`].
pub const SAMPLE_ROWS: usize = 9;

/// Write [`sample_csv`] under every case file name in `dir`.
pub fn write_fixture_dir(dir: &Path) -> std::io::Result<()> {
    let csv = sample_csv();
    for case in Case::ALL {
        std::fs::write(dir.join(case.file_name()), &csv)?;
    }
    Ok(())
}

/// Create a temporary directory pre-populated with fixture files.
#[cfg(feature = "testing")]
pub fn fixture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    write_fixture_dir(dir.path()).expect("Failed to write fixture files");
    dir
}

/// Whether plotters can lay out text in the default chart font.
///
/// Chart tests return early when this is false.
#[cfg(feature = "plotters")]
pub fn fonts_available() -> bool {
    use plotters::style::IntoFont;
    ("sans-serif", 14.0).into_font().box_size("22/1").is_ok()
}

/// Text content of every `<text>` element in an SVG document, in order.
pub fn svg_texts(svg: &str) -> Vec<String> {
    let mut chunks: Vec<&str> = svg.split("</text>").collect();
    chunks.pop();
    chunks
        .into_iter()
        .filter_map(|chunk| chunk.rsplit('>').next())
        .map(|text| text.trim().to_string())
        .collect()
}
