/// Filesystem adapters for walking, reading and writing files
mod file_reader;
mod file_scanner;
mod file_writer;

pub use file_reader::FileSystemReader;
pub use file_scanner::WalkDirScanner;
pub use file_writer::FileSystemWriter;
