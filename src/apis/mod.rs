pub mod fortune;

pub use fortune::FortuneCompanyScraper;
