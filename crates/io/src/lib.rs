// File I/O operations

pub mod vcard;
