mod parquet_tools;

pub use parquet_tools::ParquetToolsRunnerPlugin;
