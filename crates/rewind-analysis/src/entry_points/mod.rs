//! Entry-point discovery: marker scanning and root registration.

pub mod scanner;

pub use scanner::EntryPointScanner;
