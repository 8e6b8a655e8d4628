/// CSV file and directory backed review source.
pub mod csv_source;
