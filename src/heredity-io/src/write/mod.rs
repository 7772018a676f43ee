mod generic_writer;
pub use generic_writer::{GenericWriter, WriterError, WRITER_SEPARATOR};

mod results;
pub use results::write_results;
