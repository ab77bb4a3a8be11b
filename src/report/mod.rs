/// Parsing of metric and CPU time output
pub mod metrics;
/// Comparison table rendering
pub mod table;
