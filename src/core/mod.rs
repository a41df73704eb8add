pub mod bulk;
pub mod container;
pub mod dms;
pub mod formats;
pub mod link;
pub mod metadata;
pub mod scan;
