use std::io::{Cursor, Write};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use super::{charts::svg_to_png, ChartKind, Error};

pub const BUNDLE_FILE_NAME: &str = "grafieken.zip";

/// Zip every chart as `<name>.png`.
pub fn chart_bundle(charts: &[(ChartKind, String)]) -> Result<Vec<u8>, Error> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (kind, svg) in charts {
        let png = svg_to_png(svg)?;
        zip.start_file(kind.png_file_name(), options)?;
        zip.write_all(&png)?;
    }

    Ok(zip.finish()?.into_inner())
}
