pub(crate) mod health;
pub(crate) mod meta;
pub(crate) mod posts;
pub(crate) mod sitemap;
pub(crate) mod tags;
