pub mod api;
pub mod audio_file;
pub mod entities;
pub mod format;
pub mod history;
pub mod soap;
pub mod storage;
