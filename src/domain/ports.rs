use crate::domain::model::{InputMode, RawReading};
use crate::domain::report::{BatchOutputFormat, RowErrorPolicy, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_mode(&self) -> InputMode;
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> BatchOutputFormat;
    fn on_invalid_row(&self) -> RowErrorPolicy;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<RawReading>>;
    fn transform(&self, data: Vec<RawReading>) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
