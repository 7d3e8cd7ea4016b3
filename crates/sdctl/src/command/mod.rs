pub mod check;
pub mod scrape;
pub mod set;
pub mod show;
