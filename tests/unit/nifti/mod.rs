mod file;
mod header;
