use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::marker::PhantomData;
use std::path::Path;

use log::info;
use xz::bufread::XzDecoder;

use osmapi_types::codec::{self, OsmDocument};
use osmapi_types::data::BoundsBox;
use osmapi_types::errors::Result;

use crate::etl::Etl;
use crate::UserConfig;

const ETL_NAME: &str = "reencode";
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub struct Output {
    xml: String,
    bounds: Vec<BoundsBox>,
}

/// Decodes the configured input as a `T` and writes it back out, optionally exporting the
/// bounding boxes it carries as JSON.
pub struct ReencodeEtl<'a, T> {
    config: &'a UserConfig,
    document: PhantomData<T>,
}

impl<'a, T: OsmDocument> ReencodeEtl<'a, T> {
    pub fn new(config: &'a UserConfig) -> Self {
        ReencodeEtl {
            config,
            document: PhantomData,
        }
    }

    /// Planet extracts and replication diffs are usually xz compressed.
    fn create_input_reader(path: &Path) -> Result<Box<dyn BufRead>> {
        let file = fs::File::open(path)?;
        let file_reader = BufReader::new(file);
        if path.extension().is_some_and(|ext| ext == "xz") {
            Ok(Box::new(BufReader::new(XzDecoder::new(file_reader))))
        } else {
            Ok(Box::new(file_reader))
        }
    }
}

impl<T: OsmDocument> Etl for ReencodeEtl<'_, T> {
    type Input = String;
    type Output = Output;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn is_cached(&self, dir: &Path) -> Result<bool> {
        Ok(!self.config.overwrite && dir.join(&self.config.output_path).try_exists()?)
    }

    fn extract(&mut self, dir: &Path) -> Result<Self::Input> {
        let mut reader = Self::create_input_reader(&dir.join(&self.config.input_path))?;
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        Ok(xml)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let document: T = codec::decode(&input)?;
        let bounds = document.bounds();
        info!(etl_name = ETL_NAME, root = T::ROOT, bounds = bounds.len(); "Decoded document");

        Ok(Output {
            xml: codec::encode(&document)?,
            bounds,
        })
    }

    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()> {
        let mut output_file = fs::File::create(dir.join(&self.config.output_path))?;
        output_file.write_all(XML_DECLARATION.as_bytes())?;
        output_file.write_all(output.xml.as_bytes())?;

        if let Some(bounds_path) = &self.config.bounds_path {
            let bounds_file = fs::File::create(dir.join(bounds_path))?;
            serde_json::to_writer_pretty(bounds_file, &output.bounds)?;
        }
        Ok(())
    }
}
