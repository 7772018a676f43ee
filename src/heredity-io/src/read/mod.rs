mod family_reader;
pub use family_reader::{read_family, FamilyReaderError};

mod tables_reader;
pub use tables_reader::read_tables;
